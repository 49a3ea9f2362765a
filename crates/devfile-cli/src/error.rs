//! Error types for devfile-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from devfile-parser
    #[error(transparent)]
    Parser(#[from] devfile_parser::Error),

    /// Error from devfile-context
    #[error(transparent)]
    Context(#[from] devfile_context::Error),

    /// Name validation error from devfile-api
    #[error(transparent)]
    Api(#[from] devfile_api::Error),

    /// Error from devfile-generator
    #[error(transparent)]
    Generator(#[from] devfile_generator::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
