pub mod classify;
pub mod cli;
pub mod conf;
pub mod enrichment;
pub mod extract;
pub mod filter;
pub mod logging;
pub mod pipeline;
pub mod record;
pub mod stream;
pub mod unite;
