//! Loading raw devfile content from disk, HTTP or memory

use std::fs;
use std::io::Read;
use std::time::Duration;

use crate::{DevfileCtx, DevfileName, Error, Location, NormalizedPath, Result};

/// Default upper bound on devfile size (10 MiB).
pub const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;

/// Acquires raw devfile content.
///
/// Implementations must be reentrant: one loader may serve several parse
/// calls running in parallel.
pub trait ContextLoader: Send + Sync {
    /// Load a devfile from the local filesystem.
    fn load_path(&self, path: &NormalizedPath) -> Result<DevfileCtx>;

    /// Load a devfile over HTTP(S).
    fn load_url(&self, url: &str) -> Result<DevfileCtx>;

    /// Wrap in-memory content.
    fn load_bytes(&self, bytes: &[u8]) -> Result<DevfileCtx> {
        DevfileCtx::from_bytes(Location::Memory, bytes.to_vec())
    }

    /// Load whatever `location` points at.
    fn load(&self, location: &Location) -> Result<DevfileCtx> {
        match location {
            Location::Path(path) => self.load_path(path),
            Location::Url(url) => self.load_url(url),
            Location::Memory => Err(Error::InvalidReference {
                uri: location.to_string(),
                message: "in-memory content cannot be loaded again".into(),
            }),
        }
    }
}

/// Settings for [`DevfileLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Overall timeout for a single HTTP fetch. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Largest accepted devfile, in bytes.
    pub max_size: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

/// The default [`ContextLoader`]: local files via `std::fs`, URLs via `ureq`.
#[derive(Debug)]
pub struct DevfileLoader {
    config: LoaderConfig,
    agent: ureq::Agent,
}

impl DevfileLoader {
    /// Create a loader with default settings.
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a loader with custom settings.
    pub fn with_config(config: LoaderConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            config,
            agent: builder.build(),
        }
    }

    /// The settings this loader was built with.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    fn check_size(&self, location: &dyn std::fmt::Display, size: u64) -> Result<()> {
        if size > self.config.max_size {
            return Err(Error::DocumentTooLarge {
                location: location.to_string(),
                size,
                max: self.config.max_size,
            });
        }
        Ok(())
    }
}

impl Default for DevfileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextLoader for DevfileLoader {
    fn load_path(&self, path: &NormalizedPath) -> Result<DevfileCtx> {
        let file = resolve_devfile_path(path)?;
        let native = file.to_native();

        let metadata = fs::metadata(&native).map_err(|e| Error::io(&native, e))?;
        self.check_size(&file, metadata.len())?;

        tracing::debug!(path = %file, "Loading devfile from path");
        let content = fs::read(&native).map_err(|e| Error::io(&native, e))?;
        DevfileCtx::from_bytes(Location::Path(file), content)
    }

    fn load_url(&self, url: &str) -> Result<DevfileCtx> {
        tracing::debug!(%url, "Fetching devfile");
        let response = self.agent.get(url).call().map_err(|e| Error::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let mut content = Vec::new();
        response
            .into_reader()
            .take(self.config.max_size + 1)
            .read_to_end(&mut content)
            .map_err(|e| Error::Fetch {
                url: url.to_string(),
                message: format!("failed to read response body: {e}"),
            })?;
        self.check_size(&url, content.len() as u64)?;

        DevfileCtx::from_bytes(Location::Url(url.to_string()), content)
    }

    fn load_bytes(&self, bytes: &[u8]) -> Result<DevfileCtx> {
        self.check_size(&Location::Memory, bytes.len() as u64)?;
        DevfileCtx::from_bytes(Location::Memory, bytes.to_vec())
    }
}

/// Map a directory to the devfile inside it; files are returned unchanged.
pub fn resolve_devfile_path(path: &NormalizedPath) -> Result<NormalizedPath> {
    if !path.is_dir() {
        return Ok(path.clone());
    }

    DevfileName::ALL
        .iter()
        .map(|name| path.join(name.as_str()))
        .find(|candidate| candidate.exists())
        .ok_or_else(|| Error::DevfileNotFound {
            path: path.to_native(),
        })
}
