//! Command definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::EnvVar;
use crate::schema::variant::decode_single_variant;
use crate::{Attributes, ElementKind, Error};

/// A named workspace command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Command {
    /// Unique command id within a devfile
    pub id: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(flatten)]
    pub kind: CommandKind,
}

#[derive(Deserialize)]
struct CommandFields {
    id: String,
    #[serde(default)]
    attributes: Attributes,
    #[serde(flatten)]
    kind: CommandKind,
}

impl TryFrom<Map<String, Value>> for Command {
    type Error = Error;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: CommandFields =
            decode_single_variant(ElementKind::Command, "id", CommandKind::KEYS, fields)?;
        Ok(Self {
            id: fields.id,
            attributes: fields.attributes,
            kind: fields.kind,
        })
    }
}

impl Command {
    pub fn new(id: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::default(),
            kind,
        }
    }

    /// The group this command belongs to, if any.
    pub fn group(&self) -> Option<&CommandGroup> {
        match &self.kind {
            CommandKind::Exec(exec) => exec.group.as_ref(),
            CommandKind::Apply(apply) => apply.group.as_ref(),
            CommandKind::Composite(composite) => composite.group.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandKind {
    Exec(ExecCommand),
    Apply(ApplyCommand),
    Composite(CompositeCommand),
}

impl CommandKind {
    /// Wire keys of the variants.
    pub const KEYS: &'static [&'static str] = &["exec", "apply", "composite"];
}

/// Runs a command line inside a container component.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecCommand {
    pub command_line: String,
    pub component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_reload_capable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Applies a non-container component (image build, kubernetes manifest).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplyCommand {
    pub component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Runs other commands, by id, in sequence or in parallel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompositeCommand {
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<CommandGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandGroup {
    pub kind: CommandGroupKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandGroupKind {
    Build,
    Run,
    Test,
    Debug,
    Deploy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_rejects_two_variants() {
        let fields = json!({
            "id": "build",
            "exec": {"commandLine": "make", "component": "tools"},
            "apply": {"component": "image"},
        });
        let err = serde_json::from_value::<Command>(fields).unwrap_err();
        assert!(err.to_string().contains("exec, apply"), "got {err}");
    }

    #[test]
    fn test_decode_single_variant() {
        let fields = json!({"id": "deploy", "apply": {"component": "manifests"}});
        let command: Command = serde_json::from_value(fields).unwrap();
        assert_eq!(command.id, "deploy");
        assert!(matches!(command.kind, CommandKind::Apply(_)));
    }
}
