//! Error types for devfile-api

use crate::ElementKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Document declares neither schemaVersion nor apiVersion")]
    MissingSchemaVersion,

    #[error("Invalid override entry: {message}")]
    InvalidPatch { message: String },

    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: ElementKind,
        name: String,
        reason: String,
    },

    #[error("Duplicate {kind} '{name}'")]
    DuplicateName { kind: ElementKind, name: String },

    #[error("{kind} '{name}' declares several variants ({}); exactly one is allowed", variants.join(", "))]
    MultipleVariants {
        kind: ElementKind,
        name: String,
        variants: Vec<String>,
    },

    #[error("Invalid {kind} '{name}': {message}")]
    InvalidElement {
        kind: ElementKind,
        name: String,
        message: String,
    },
}
