//! Raw devfile content together with where it came from

use semver::Version;
use serde_yaml::Value;

use crate::{Error, Location, Result};

/// Schema major version the parser understands.
const SUPPORTED_MAJOR: u64 = 2;

/// A loaded but not yet decoded devfile.
///
/// Holds the raw bytes, their [`Location`] and the schema version declared
/// by the document. Construction only checks that the content is a YAML
/// mapping declaring a version; [`DevfileCtx::validate`] checks the version
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DevfileCtx {
    location: Location,
    content: Vec<u8>,
    api_version: String,
}

impl DevfileCtx {
    /// Build a context from raw content.
    ///
    /// The version is read from `schemaVersion`, falling back to
    /// `apiVersion`.
    pub fn from_bytes(location: Location, content: Vec<u8>) -> Result<Self> {
        let document: Value =
            serde_yaml::from_slice(&content).map_err(|e| Error::InvalidContent {
                location: location.to_string(),
                message: e.to_string(),
            })?;

        let Value::Mapping(mapping) = document else {
            return Err(Error::InvalidContent {
                location: location.to_string(),
                message: "top-level value is not a mapping".into(),
            });
        };

        let api_version = ["schemaVersion", "apiVersion"]
            .iter()
            .find_map(|key| mapping.get(*key).and_then(version_string))
            .ok_or_else(|| Error::MissingSchemaVersion {
                location: location.to_string(),
            })?;

        Ok(Self {
            location,
            content,
            api_version,
        })
    }

    /// Where the content was loaded from.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The raw document bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The declared schema version, verbatim.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Parse the declared schema version.
    pub fn schema_version(&self) -> Result<Version> {
        Version::parse(self.api_version.trim()).map_err(|source| Error::InvalidSchemaVersion {
            location: self.location.to_string(),
            version: self.api_version.clone(),
            source,
        })
    }

    /// Check that the declared schema version is one this parser supports.
    pub fn validate(&self) -> Result<()> {
        let version = self.schema_version()?;
        if version.major != SUPPORTED_MAJOR {
            return Err(Error::UnsupportedSchemaVersion {
                location: self.location.to_string(),
                version: self.api_version.clone(),
            });
        }
        Ok(())
    }
}

fn version_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
