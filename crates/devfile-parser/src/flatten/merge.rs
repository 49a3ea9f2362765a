//! Merging a devfile's own content with what its parent and plugins contribute

use std::collections::HashMap;

use devfile_api::{HasId, WorkspaceContent};

use crate::{Error, Result};

/// Merge layered content into one [`WorkspaceContent`].
///
/// Layers are taken in the order parent, plugins (declaration order), local,
/// and elements keep that order. An element defined by several layers is
/// kept once when every definition is identical; differing definitions are
/// a [`Error::MergeConflict`], since inherited elements are changed through
/// overrides rather than by redefinition.
pub fn merge_content(
    local: &WorkspaceContent,
    parent: &WorkspaceContent,
    plugins: &[WorkspaceContent],
) -> Result<WorkspaceContent> {
    let layers: Vec<&WorkspaceContent> = std::iter::once(parent)
        .chain(plugins.iter())
        .chain(std::iter::once(local))
        .collect();

    Ok(WorkspaceContent {
        components: merge_elements(layers.iter().map(|layer| layer.components.as_slice()))?,
        commands: merge_elements(layers.iter().map(|layer| layer.commands.as_slice()))?,
        projects: merge_elements(layers.iter().map(|layer| layer.projects.as_slice()))?,
    })
}

fn merge_elements<'a, T>(layers: impl IntoIterator<Item = &'a [T]>) -> Result<Vec<T>>
where
    T: HasId + Clone + PartialEq + 'a,
{
    let mut merged: Vec<T> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for element in layers.into_iter().flatten() {
        match positions.get(element.id()) {
            Some(&position) if merged[position] == *element => {
                tracing::debug!(kind = %T::KIND, key = element.id(), "Skipping identical duplicate");
            }
            Some(_) => {
                return Err(Error::MergeConflict {
                    kind: T::KIND,
                    key: element.id().to_string(),
                });
            }
            None => {
                positions.insert(element.id().to_string(), merged.len());
                merged.push(element.clone());
            }
        }
    }

    Ok(merged)
}
