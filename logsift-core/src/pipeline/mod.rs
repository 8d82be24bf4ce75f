//! End-to-end run
//!
//! A [`Pipeline`] reads a log source in bounded chunks and pushes each chunk
//! through the enabled stages in a fixed order:
//!
//! extract -> identity -> bot validation -> classification -> sink
//!
//! Stages are opt-in. Whatever is enabled decides the column set of the
//! output, so the sink handed to [`Pipeline::run`] must be created with
//! [`Pipeline::columns`].

mod error;
mod run;
mod summary;

#[cfg(test)]
mod tests;

pub use error::*;
pub use run::*;
pub use summary::*;
