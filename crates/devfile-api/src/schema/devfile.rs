//! The devfile document

use serde::{Deserialize, Serialize};

use crate::schema::{Command, Component, Project, Reference};
use crate::{Attributes, DevfileOptions, Error, WorkspaceContent};

/// A decoded devfile.
///
/// `components`, `commands` and `projects` are stored in
/// [`WorkspaceContent`] and serialized inline at the top level. The version
/// is read from `schemaVersion`, falling back to `apiVersion` when only that
/// key is present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DevfileFields")]
pub struct Devfile {
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Reference>,
    #[serde(flatten)]
    pub content: WorkspaceContent,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DevfileFields {
    #[serde(default)]
    schema_version: Option<String>,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    metadata: Option<Metadata>,
    #[serde(default)]
    parent: Option<Reference>,
    #[serde(flatten)]
    content: WorkspaceContent,
}

impl TryFrom<DevfileFields> for Devfile {
    type Error = Error;

    fn try_from(fields: DevfileFields) -> Result<Self, Self::Error> {
        let schema_version = fields
            .schema_version
            .or(fields.api_version)
            .ok_or(Error::MissingSchemaVersion)?;
        Ok(Self {
            schema_version,
            metadata: fields.metadata,
            parent: fields.parent,
            content: fields.content,
        })
    }
}

impl Devfile {
    pub fn new(schema_version: impl Into<String>) -> Self {
        Self {
            schema_version: schema_version.into(),
            ..Self::default()
        }
    }

    /// The parent reference, if one is declared with a non-empty URI.
    pub fn parent_reference(&self) -> Option<&Reference> {
        self.parent.as_ref().filter(|parent| parent.has_uri())
    }

    /// Whether flattening would have anything to resolve.
    pub fn has_references(&self) -> bool {
        self.parent.is_some() || self.content.components.iter().any(Component::is_plugin)
    }

    /// Components matching `options`, in declaration order.
    pub fn components(&self, options: &DevfileOptions) -> Vec<&Component> {
        self.content
            .components
            .iter()
            .filter(|c| options.matches_component(c))
            .collect()
    }

    /// Commands matching `options`, in declaration order.
    pub fn commands(&self, options: &DevfileOptions) -> Vec<&Command> {
        self.content
            .commands
            .iter()
            .filter(|c| options.matches_attributes(&c.attributes))
            .collect()
    }

    /// Projects matching `options`, in declaration order.
    pub fn projects(&self, options: &DevfileOptions) -> Vec<&Project> {
        self.content
            .projects
            .iter()
            .filter(|p| options.matches_attributes(&p.attributes))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}
