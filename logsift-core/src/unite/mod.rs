//! Rotated-archive merge
//!
//! Web servers rotate access logs into `access.log.N.gz` files. [`unite`]
//! decompresses every `*.gz` in a directory, in file-name order, and appends
//! the text to a single log the pipeline can read in one pass.

mod error;
mod merge;

#[cfg(test)]
mod tests;

pub use error::*;
pub use merge::*;
