//! Batch image shrinking by greedy re-encoding under a byte-size ceiling
//!
//! Each oversized image is re-encoded as JPEG at decreasing quality and, once the
//! minimum quality is reached, at decreasing scale, until the result fits.

#![forbid(unsafe_code)]

/// Size-convergence search over encode parameters
pub mod convergence;
/// Encoder capability and its backends
pub mod encoder;
/// Command line, scanning, output handling and error types
pub mod io;

pub use io::error::{Result, ShrinkError};
