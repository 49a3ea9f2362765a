//! Where a devfile comes from, and how references inside it are resolved

use crate::path::{NormalizedPath, clean};
use crate::{Error, Result};

/// The origin of a devfile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// A file on the local filesystem.
    Path(NormalizedPath),
    /// An `http` or `https` URL.
    Url(String),
    /// Content handed over directly as bytes.
    Memory,
}

impl Location {
    /// Resolve a parent or plugin `uri` found in a devfile loaded from `self`.
    ///
    /// URLs are taken as-is. `file://` URIs and bare paths are local files;
    /// relative paths resolve against the directory (or URL) of the
    /// referencing devfile, or against the working directory for in-memory
    /// content.
    pub fn resolve_reference(&self, uri: &str) -> Result<Location> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(Error::InvalidReference {
                uri: uri.to_string(),
                message: "reference is empty".into(),
            });
        }

        if is_http_url(uri) {
            return Ok(Location::Url(uri.to_string()));
        }

        if let Some(rest) = uri.strip_prefix("file://") {
            return Ok(Location::Path(NormalizedPath::new(rest)));
        }

        if let Some((scheme, _)) = uri.split_once("://") {
            return Err(Error::InvalidReference {
                uri: uri.to_string(),
                message: format!("unsupported scheme '{scheme}'"),
            });
        }

        let target = NormalizedPath::new(uri);
        if target.is_absolute() {
            return Ok(Location::Path(target));
        }

        match self {
            Location::Path(base) => {
                let dir = base.parent().unwrap_or_else(|| NormalizedPath::new("."));
                Ok(Location::Path(dir.join(uri)))
            }
            Location::Url(base) => Ok(Location::Url(join_url(base, uri))),
            Location::Memory => Ok(Location::Path(target)),
        }
    }

    /// Key identifying this document on a resolution chain.
    ///
    /// Existing local files are canonicalized so that symlinked or
    /// differently-spelled paths to the same file collide.
    pub fn identity(&self) -> String {
        match self {
            Location::Path(path) => match dunce::canonicalize(path.to_native()) {
                Ok(canonical) => NormalizedPath::new(canonical).as_str().to_string(),
                Err(_) => path.as_str().to_string(),
            },
            Location::Url(url) => url
                .split('#')
                .next()
                .unwrap_or(url.as_str())
                .to_string(),
            Location::Memory => "<memory>".to_string(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Path(path) => write!(f, "{path}"),
            Location::Url(url) => write!(f, "{url}"),
            Location::Memory => write!(f, "<memory>"),
        }
    }
}

pub(crate) fn is_http_url(uri: &str) -> bool {
    let lower = uri.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve a relative path against a base URL.
fn join_url(base: &str, relative: &str) -> String {
    let base = base.split(['?', '#']).next().unwrap_or(base);
    let (scheme, rest) = base.split_once("://").unwrap_or(("https", base));
    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };
    let dir = match path.rfind('/') {
        Some(idx) => &path[..=idx],
        None => "/",
    };
    format!("{scheme}://{authority}{}", clean(&format!("{dir}{relative}")))
}
