//! Error types for devfile-parser

use devfile_api::ElementKind;

/// Result type for devfile-parser operations
pub type Result<T> = std::result::Result<T, Error>;

/// The reference a resolution failure happened under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceContext {
    Parent,
    Plugin { component: String },
}

impl std::fmt::Display for ReferenceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceContext::Parent => write!(f, "parent"),
            ReferenceContext::Plugin { component } => write!(f, "plugin component '{component}'"),
        }
    }
}

/// Errors that can occur while parsing and flattening a devfile
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Loading or version validation failed
    #[error(transparent)]
    Context(#[from] devfile_context::Error),

    #[error("failed to decode devfile content from {location}: {source}")]
    Decode {
        location: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A parent or plugin could not be resolved; `source` is the underlying failure
    #[error("Failed to resolve {context} '{uri}': {source}")]
    Reference {
        context: ReferenceContext,
        uri: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Override targets {kind} '{key}', which the inherited content does not define")]
    OverrideTargetNotFound { kind: ElementKind, key: String },

    #[error("Override for {kind} '{key}' is invalid: {message}")]
    InvalidOverride {
        kind: ElementKind,
        key: String,
        message: String,
    },

    #[error(
        "{kind} '{key}' is defined differently by more than one layer; use overrides to change inherited elements"
    )]
    MergeConflict { kind: ElementKind, key: String },

    #[error("Reference cycle detected: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    #[error("Plugin component '{component}' has no uri")]
    PluginWithoutUri { component: String },
}

impl Error {
    /// The failure at the bottom of a chain of [`Error::Reference`] wrappers.
    pub fn innermost(&self) -> &Error {
        let mut current = self;
        while let Error::Reference { source, .. } = current {
            current = source;
        }
        current
    }

    /// URIs of the references that led to this error, outermost first.
    pub fn reference_trail(&self) -> Vec<&str> {
        let mut trail = Vec::new();
        let mut current = self;
        while let Error::Reference { uri, source, .. } = current {
            trail.push(uri.as_str());
            current = source;
        }
        trail
    }
}
