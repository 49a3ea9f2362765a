//! Well-known devfile file names.

use std::path::Path;

/// File names probed, in order, when a directory is given instead of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevfileName {
    /// `devfile.yaml`
    Devfile,
    /// `.devfile.yaml`
    HiddenDevfile,
    /// `devfile.yml`
    DevfileYml,
    /// `.devfile.yml`
    HiddenDevfileYml,
}

impl DevfileName {
    /// Probe order used by [`crate::DevfileLoader`].
    pub const ALL: [DevfileName; 4] = [
        Self::Devfile,
        Self::HiddenDevfile,
        Self::DevfileYml,
        Self::HiddenDevfileYml,
    ];

    /// Get the string representation of the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Devfile => "devfile.yaml",
            Self::HiddenDevfile => ".devfile.yaml",
            Self::DevfileYml => "devfile.yml",
            Self::HiddenDevfileYml => ".devfile.yml",
        }
    }
}

impl AsRef<Path> for DevfileName {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for DevfileName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for DevfileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
