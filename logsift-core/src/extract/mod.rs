//! Line extraction
//!
//! Turns one raw access-log line into a [`Record`](crate::record::Record).
//! Two regular expressions drive it: the line grammar splits the line into
//! its eight request fields, and the date pattern pulls the calendar date out
//! of the timestamp field. Both are supplied by configuration so the same code
//! handles nginx, Apache and prefixed container logs.
//!
//! Extraction never panics and never aborts a run: a line that does not fit
//! comes back as an [`ExtractionFailure`] the caller logs and counts.

mod error;
mod extractor;
mod grammar;


pub use error::*;
pub use extractor::extract;
pub use grammar::*;
