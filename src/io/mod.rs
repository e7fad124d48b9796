/// Command-line parsing and the batch driver
pub mod cli;
/// Defaults and fixed settings
pub mod configuration;
/// Operator confirmation before files are written
pub mod confirm;
/// Error type shared across the crate
pub mod error;
/// Output naming, candidate placement and promotion
pub mod output;
/// Progress bars for batch runs
pub mod progress;
/// Discovery of oversized source images
pub mod scan;
/// Parsing and formatting of byte sizes
pub mod size;
/// Per-file outcomes and batch totals
pub mod summary;
