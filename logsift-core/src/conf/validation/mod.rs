mod validate;
mod validated_config;
mod validation_ctx;

pub use validate::validate_config;
pub use validated_config::ValidatedConfig;
pub use validation_ctx::ValidationErrors;
