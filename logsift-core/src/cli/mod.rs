pub mod conf;
mod filter;
mod run;
mod summary;
mod unite;

#[cfg(test)]
mod tests;

pub use filter::{FilterArgs, filter};
pub use run::{RunArgs, run};
pub use summary::{render_run_summary, render_unite_summary};
pub use unite::unite;
