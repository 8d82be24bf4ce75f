mod discover;
mod error;
mod loader;
mod parse;
#[cfg(test)]
mod tests;
pub mod types;
pub(crate) mod validation;

pub use error::ConfigError;
pub use loader::{ENTRYPOINT_FILE, LoadedConfig, RuleFile, load_config, load_dsl_config};
pub use types::RuntimeConfig;
pub use validation::{ValidatedConfig, ValidationErrors};
