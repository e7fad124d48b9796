/// Encode parameters and search limits
pub mod parameters;
/// Greedy quality-then-scale parameter sequence
pub mod schedule;
/// The convergence loop over encode attempts
pub mod search;

pub use parameters::{ConvergenceConfig, EncodeParameters, Phase};
pub use schedule::ParameterSchedule;
pub use search::{Attempt, Convergence, converge};
