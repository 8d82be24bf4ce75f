//! Record stream and tabular sink
//!
//! [`RecordStream`] reads a log source once, front to back, and hands out
//! parsed records in input order, either one at a time or in bounded chunks.
//! Lines the extractor rejects are logged with their line number and counted;
//! they never stop the stream.
//!
//! [`TsvSink`] is the tab-separated output the records end up in. Its header
//! is written exactly once, so a run can append chunk after chunk, or resume a
//! file a previous run left behind.

mod error;
mod record_stream;
mod sink;


pub use error::*;
pub use record_stream::*;
pub use sink::*;
