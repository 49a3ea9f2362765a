//! Project definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::schema::variant::decode_single_variant;
use crate::{Attributes, ElementKind, Error};

/// A source project cloned into the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Map<String, Value>")]
pub struct Project {
    /// Unique project name within a devfile
    pub name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    /// Path relative to the projects root; defaults to the project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_path: Option<String>,
    #[serde(flatten)]
    pub source: ProjectSource,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectFields {
    name: String,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    clone_path: Option<String>,
    #[serde(flatten)]
    source: ProjectSource,
}

impl TryFrom<Map<String, Value>> for Project {
    type Error = Error;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: ProjectFields =
            decode_single_variant(ElementKind::Project, "name", ProjectSource::KEYS, fields)?;
        Ok(Self {
            name: fields.name,
            attributes: fields.attributes,
            clone_path: fields.clone_path,
            source: fields.source,
        })
    }
}

impl Project {
    pub fn new(name: impl Into<String>, source: ProjectSource) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::default(),
            clone_path: None,
            source,
        }
    }

    pub fn with_clone_path(mut self, clone_path: impl Into<String>) -> Self {
        self.clone_path = Some(clone_path.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectSource {
    Git(GitSource),
    Zip(ZipSource),
}

impl ProjectSource {
    /// Wire keys of the variants.
    pub const KEYS: &'static [&'static str] = &["git", "zip"];
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitSource {
    /// Remote name to URL
    #[serde(default)]
    pub remotes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_from: Option<CheckoutFrom>,
}

impl GitSource {
    /// A source with a single `origin` remote.
    pub fn origin(url: impl Into<String>) -> Self {
        Self {
            remotes: BTreeMap::from([("origin".to_string(), url.into())]),
            checkout_from: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckoutFrom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZipSource {
    pub location: String,
}
