//! Tabular filtering over `logsift run` output
//!
//! Loads a TSV table the sink wrote and narrows it down by a regex on one
//! column or by an inclusive date range, then writes it back out with the
//! same header.

mod error;
mod table;


pub use error::*;
pub use table::*;
