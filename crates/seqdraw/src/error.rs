//! CLI error types.

use seqdraw_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Diagram failed validation.
    #[error("{0}")]
    Invalid(String),

    /// Diagram could not be rendered.
    #[error("{0}")]
    Render(String),
}
