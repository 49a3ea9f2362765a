//! Error types for devfile-context

use std::path::PathBuf;

/// Result type for devfile-context operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while acquiring or validating a devfile
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No devfile found in directory {path}")]
    DevfileNotFound { path: PathBuf },

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Devfile too large: {location} is {size} bytes (max {max})")]
    DocumentTooLarge { location: String, size: u64, max: u64 },

    #[error("Devfile {location} is not a valid YAML mapping: {message}")]
    InvalidContent { location: String, message: String },

    #[error("Devfile {location} declares neither schemaVersion nor apiVersion")]
    MissingSchemaVersion { location: String },

    #[error("Invalid schemaVersion '{version}' in {location}: {source}")]
    InvalidSchemaVersion {
        location: String,
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("Unsupported schemaVersion '{version}' in {location}")]
    UnsupportedSchemaVersion { location: String, version: String },

    #[error("Invalid reference '{uri}': {message}")]
    InvalidReference { uri: String, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
