//! [`MemoryLoader`]: serves devfiles from a map instead of disk or network.

use devfile_context::{ContextLoader, DevfileCtx, Error, Location, NormalizedPath, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// A [`ContextLoader`] backed by a map from path or URL to content.
///
/// Every load attempt is recorded, hit or miss, so tests can assert which
/// references were (or were not) followed.
///
/// # Example
///
/// ```rust
/// use devfile_context::ContextLoader;
/// use devfile_test_utils::MemoryLoader;
///
/// let loader = MemoryLoader::new()
///     .with_document("https://example.com/parent.yaml", "schemaVersion: 2.2.0\n");
/// assert!(loader.load_url("https://example.com/parent.yaml").is_ok());
/// assert_eq!(loader.fetched(), vec!["https://example.com/parent.yaml"]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryLoader {
    documents: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `content` under `key` (a normalized path or a URL).
    pub fn with_document(mut self, key: impl Into<String>, content: impl Into<String>) -> Self {
        let key = key.into();
        let key = if key.contains("://") {
            key
        } else {
            NormalizedPath::new(&key).as_str().to_string()
        };
        self.documents.insert(key, content.into());
        self
    }

    /// Every key requested so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn serve(&self, key: &str, location: Location) -> Option<Result<DevfileCtx>> {
        self.fetched
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(key.to_string());
        self.documents
            .get(key)
            .map(|content| DevfileCtx::from_bytes(location, content.as_bytes().to_vec()))
    }
}

impl ContextLoader for MemoryLoader {
    fn load_path(&self, path: &NormalizedPath) -> Result<DevfileCtx> {
        self.serve(path.as_str(), Location::Path(path.clone()))
            .unwrap_or_else(|| {
                Err(Error::io(
                    path.to_native(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "not registered"),
                ))
            })
    }

    fn load_url(&self, url: &str) -> Result<DevfileCtx> {
        self.serve(url, Location::Url(url.to_string()))
            .unwrap_or_else(|| {
                Err(Error::Fetch {
                    url: url.to_string(),
                    message: "404 Not Found".into(),
                })
            })
    }
}
