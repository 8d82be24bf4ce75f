mod fixtures;
mod lookup;
pub mod tracing;

pub use fixtures::{access_line, fixture_config, fixture_log, gzip_to};
pub use lookup::ScriptedLookup;
pub use self::tracing::{CapturedEvent, capture_events};
