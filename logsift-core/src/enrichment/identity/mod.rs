mod cache;
mod lookup;
mod resolver;

pub use cache::*;
pub use lookup::*;
pub use resolver::*;
