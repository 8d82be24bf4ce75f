mod bots;
mod entrypoint;
mod extract;
mod identity;
mod origin;
mod pipeline;
mod runtime;

pub use bots::*;
pub use entrypoint::*;
pub use extract::*;
pub use identity::*;
pub use origin::*;
pub use pipeline::*;
pub use runtime::*;
