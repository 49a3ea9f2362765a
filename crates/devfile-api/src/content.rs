//! The mergeable part of a devfile

use serde::{Deserialize, Serialize};

use crate::schema::{Command, Component, Project, Reference};

/// Components, commands and projects: what a parent or plugin contributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkspaceContent {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
}

impl WorkspaceContent {
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.commands.is_empty() && self.projects.is_empty()
    }

    /// Plugin components together with their references, in declaration order.
    pub fn plugins(&self) -> impl Iterator<Item = (&Component, &Reference)> {
        self.components
            .iter()
            .filter_map(|component| component.plugin().map(|reference| (component, reference)))
    }

    /// A copy of this content with every plugin component removed.
    pub fn without_plugins(&self) -> Self {
        Self {
            components: self
                .components
                .iter()
                .filter(|c| !c.is_plugin())
                .cloned()
                .collect(),
            commands: self.commands.clone(),
            projects: self.projects.clone(),
        }
    }
}

/// The collection an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Component,
    Command,
    Project,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Component => write!(f, "component"),
            ElementKind::Command => write!(f, "command"),
            ElementKind::Project => write!(f, "project"),
        }
    }
}

/// Elements identified by a key unique within their collection.
///
/// Overrides and merges match elements through this key.
pub trait HasId {
    const KIND: ElementKind;

    /// Returns the unique identifier for this element
    fn id(&self) -> &str;
}

impl HasId for Component {
    const KIND: ElementKind = ElementKind::Component;

    fn id(&self) -> &str {
        &self.name
    }
}

impl HasId for Command {
    const KIND: ElementKind = ElementKind::Command;

    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for Project {
    const KIND: ElementKind = ElementKind::Project;

    fn id(&self) -> &str {
        &self.name
    }
}
