//! Parent and plugin references with their override directives

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Error;

/// Directive key selecting how a patch applies to its target.
pub const PATCH_DIRECTIVE: &str = "$patch";

/// Fields that can identify a patch target, in lookup order.
const KEY_FIELDS: [&str; 2] = ["name", "id"];

/// A reference to another devfile.
///
/// Used for the document-level `parent` and for `plugin` components. An
/// empty `uri` means there is nothing to fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<OverrideSet>,
}

impl Reference {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            overrides: None,
        }
    }

    pub fn with_overrides(mut self, overrides: OverrideSet) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Whether the reference points anywhere.
    pub fn has_uri(&self) -> bool {
        !self.uri.trim().is_empty()
    }
}

/// Patches applied to the content inherited through a [`Reference`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverrideSet {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ElementPatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<ElementPatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ElementPatch>,
}

impl OverrideSet {
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.commands.is_empty() && self.projects.is_empty()
    }
}

/// How a patch changes its target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchAction {
    /// Merge the patch fields into the target; nested objects merge key by
    /// key, scalars and lists are replaced.
    Merge,
    /// Replace the target with the patch fields.
    Replace,
    /// Remove the target.
    Delete,
}

impl PatchAction {
    fn as_str(&self) -> &'static str {
        match self {
            PatchAction::Merge => "merge",
            PatchAction::Replace => "replace",
            PatchAction::Delete => "delete",
        }
    }
}

/// One override entry, targeting an element by `name` (or `id`).
///
/// On the wire a patch is the partial element itself, optionally carrying a
/// `$patch: merge | replace | delete` directive:
///
/// ```yaml
/// - name: runtime
///   container:
///     image: node:20
/// - name: debug
///   $patch: delete
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ElementPatch {
    key: String,
    action: PatchAction,
    fields: Map<String, Value>,
}

impl ElementPatch {
    /// Build a patch targeting the element whose `key_field` equals `key`.
    pub fn new(
        key_field: &str,
        key: impl Into<String>,
        action: PatchAction,
        mut fields: Map<String, Value>,
    ) -> Self {
        let key = key.into();
        fields.insert(key_field.to_string(), Value::String(key.clone()));
        Self {
            key,
            action,
            fields,
        }
    }

    /// The name or id of the targeted element.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn action(&self) -> PatchAction {
        self.action
    }

    /// The patch body, including the identifying field.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Map<String, Value>> for ElementPatch {
    type Error = Error;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let action = match fields.remove(PATCH_DIRECTIVE) {
            None => PatchAction::Merge,
            Some(Value::String(directive)) => match directive.as_str() {
                "merge" => PatchAction::Merge,
                "replace" => PatchAction::Replace,
                "delete" => PatchAction::Delete,
                other => {
                    return Err(Error::InvalidPatch {
                        message: format!("unknown {PATCH_DIRECTIVE} directive '{other}'"),
                    });
                }
            },
            Some(other) => {
                return Err(Error::InvalidPatch {
                    message: format!("{PATCH_DIRECTIVE} must be a string, got {other}"),
                });
            }
        };

        let key = KEY_FIELDS
            .iter()
            .find_map(|field| fields.get(*field).and_then(Value::as_str))
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidPatch {
                message: "entry has neither a name nor an id".into(),
            })?;

        Ok(Self {
            key,
            action,
            fields,
        })
    }
}

impl From<ElementPatch> for Map<String, Value> {
    fn from(patch: ElementPatch) -> Self {
        let mut fields = patch.fields;
        if patch.action != PatchAction::Merge {
            fields.insert(
                PATCH_DIRECTIVE.to_string(),
                Value::String(patch.action.as_str().to_string()),
            );
        }
        fields
    }
}
