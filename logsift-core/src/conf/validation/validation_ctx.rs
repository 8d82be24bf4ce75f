use crate::conf::error::ConfigError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Default)]
pub struct ValidationCtx {
    errors: Vec<ConfigError>,
}

impl ValidationCtx {
    pub fn push(&mut self, err: ConfigError) {
        self.errors.push(err);
    }

    /// Record the error, if any, and hand back the value otherwise.
    pub fn check<T>(&mut self, result: Result<T, ConfigError>) -> Option<T> {
        result.map_err(|err| self.push(err)).ok()
    }

    /// Hand back `value` when nothing was recorded. A missing value fails
    /// even with no recorded error.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(ValidationErrors(self.errors)),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
#[error("configuration validation failed ({} errors)", .0.len())]
pub struct ValidationErrors(#[related] pub Vec<ConfigError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ConfigError] {
        &self.0
    }
}
