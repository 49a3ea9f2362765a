//! Error types for devfile-generator

/// Result type for devfile-generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// A project setting that cannot be turned into a container path
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The clonePath {clone_path} in the devfile project {project} must be a relative path")]
    AbsoluteClonePath { project: String, clone_path: String },

    #[error(
        "The clonePath {clone_path} in the devfile project {project} cannot escape the value defined by $PROJECTS_ROOT; avoid using \"..\" in clonePath"
    )]
    EscapingClonePath { project: String, clone_path: String },
}
