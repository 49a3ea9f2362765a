//! Applying override patches to inherited content

use devfile_api::{
    Command, CommandKind, Component, ComponentKind, ElementPatch, OverrideSet, PatchAction, Project,
    ProjectSource, WorkspaceContent,
};
use devfile_api::HasId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

/// Elements an [`ElementPatch`] can target.
pub(crate) trait Patchable: HasId + Clone + Serialize + DeserializeOwned {
    /// Keys naming the element's variant; exactly one must be present.
    const VARIANT_KEYS: &'static [&'static str];

    /// Variant keys an override may not introduce.
    const FORBIDDEN_KEYS: &'static [&'static str] = &[];
}

impl Patchable for Component {
    const VARIANT_KEYS: &'static [&'static str] = ComponentKind::KEYS;
    const FORBIDDEN_KEYS: &'static [&'static str] = &["plugin"];
}

impl Patchable for Command {
    const VARIANT_KEYS: &'static [&'static str] = CommandKind::KEYS;
}

impl Patchable for Project {
    const VARIANT_KEYS: &'static [&'static str] = ProjectSource::KEYS;
}

/// Apply `overrides` to `content`, returning the patched copy.
///
/// Each patch must match an existing element by name (or id). `merge`
/// patches deep-merge into the target, `replace` patches substitute it and
/// `delete` patches remove it. Elements nobody patches keep their position.
/// An empty override set returns `content` unchanged.
pub fn apply_overrides(content: &WorkspaceContent, overrides: &OverrideSet) -> Result<WorkspaceContent> {
    Ok(WorkspaceContent {
        components: patch_elements(&content.components, &overrides.components)?,
        commands: patch_elements(&content.commands, &overrides.commands)?,
        projects: patch_elements(&content.projects, &overrides.projects)?,
    })
}

fn patch_elements<T: Patchable>(elements: &[T], patches: &[ElementPatch]) -> Result<Vec<T>> {
    let mut result = elements.to_vec();

    for patch in patches {
        let position = result
            .iter()
            .position(|element| element.id() == patch.key())
            .ok_or_else(|| Error::OverrideTargetNotFound {
                kind: T::KIND,
                key: patch.key().to_string(),
            })?;

        match patch.action() {
            PatchAction::Delete => {
                tracing::debug!(kind = %T::KIND, key = patch.key(), "Deleting inherited element");
                result.remove(position);
            }
            PatchAction::Merge => {
                let mut value = serde_json::to_value(&result[position])
                    .map_err(|e| invalid::<T>(patch, e.to_string()))?;
                deep_merge_value(&mut value, &Value::Object(patch.fields().clone()));
                result[position] = decode_patched(value, patch)?;
            }
            PatchAction::Replace => {
                result[position] = decode_patched(Value::Object(patch.fields().clone()), patch)?;
            }
        }
    }

    Ok(result)
}

fn decode_patched<T: Patchable>(value: Value, patch: &ElementPatch) -> Result<T> {
    if let Value::Object(map) = &value {
        if let Some(key) = T::FORBIDDEN_KEYS.iter().find(|key| map.contains_key(**key)) {
            return Err(invalid::<T>(patch, format!("overrides cannot introduce a '{key}' variant")));
        }
        let variants: Vec<&str> = T::VARIANT_KEYS
            .iter()
            .copied()
            .filter(|key| map.contains_key(*key))
            .collect();
        if variants.len() > 1 {
            return Err(invalid::<T>(
                patch,
                format!(
                    "result declares several variants ({}); use $patch: replace to change the variant",
                    variants.join(", ")
                ),
            ));
        }
    }

    serde_json::from_value(value).map_err(|e| invalid::<T>(patch, e.to_string()))
}

fn invalid<T: Patchable>(patch: &ElementPatch, message: String) -> Error {
    Error::InvalidOverride {
        kind: T::KIND,
        key: patch.key().to_string(),
        message,
    }
}

/// Deep merge two JSON values
///
/// If both values are objects, merge them recursively with `other` taking precedence.
/// A `null` in `other` removes the key. Otherwise, `other` replaces `base`.
pub(crate) fn deep_merge_value(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                if other_val.is_null() {
                    base_map.remove(key);
                } else if let Some(base_val) = base_map.get_mut(key) {
                    deep_merge_value(base_val, other_val);
                } else {
                    base_map.insert(key.clone(), other_val.clone());
                }
            }
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}
