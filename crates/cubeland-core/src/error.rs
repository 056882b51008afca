use thiserror::Error;

/// Errors raised while loading or validating a world configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse world config RON: {0}")]
    Parse(String),

    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Failed to read world config: {0}")]
    Io(#[from] std::io::Error),
}
