//! Project sync folders

use devfile_api::{ContainerComponent, EnvVar, Project};
use devfile_context::NormalizedPath;

use crate::{Error, Result};

/// Mount point of project sources when a container declares no source mapping.
pub const DEFAULT_PROJECTS_ROOT: &str = "/projects";

/// Environment variable holding the directory all projects live under.
pub const ENV_PROJECTS_ROOT: &str = "PROJECTS_ROOT";

/// Environment variable holding the directory of the synced project.
pub const ENV_PROJECT_SOURCE: &str = "PROJECT_SOURCE";

/// The directory project sources are mounted at.
pub fn sync_root_folder(source_mapping: Option<&str>) -> String {
    source_mapping
        .map(str::trim)
        .filter(|mapping| !mapping.is_empty())
        .unwrap_or(DEFAULT_PROJECTS_ROOT)
        .to_string()
}

/// The directory sources are synced to.
///
/// Only the first project counts: its `clonePath` when set, its name
/// otherwise, under `source_root`. Without projects it is `source_root`
/// itself.
pub fn sync_folder(source_root: &str, projects: &[Project]) -> Result<String> {
    let Some(project) = projects.first() else {
        return Ok(source_root.to_string());
    };

    let root = NormalizedPath::new(source_root);
    let folder = match project.clone_path.as_deref().filter(|path| !path.is_empty()) {
        None => root.join(&project.name),
        Some(clone_path) => {
            validate_clone_path(&project.name, clone_path)?;
            root.join(clone_path)
        }
    };

    tracing::debug!(project = %project.name, folder = %folder, "Computed sync folder");
    Ok(folder.as_str().to_string())
}

fn validate_clone_path(project: &str, clone_path: &str) -> Result<()> {
    if clone_path.starts_with('/') {
        return Err(Error::AbsoluteClonePath {
            project: project.to_string(),
            clone_path: clone_path.to_string(),
        });
    }
    if clone_path.contains("..") {
        return Err(Error::EscapingClonePath {
            project: project.to_string(),
            clone_path: clone_path.to_string(),
        });
    }
    Ok(())
}

/// `PROJECTS_ROOT` and `PROJECT_SOURCE` for a container with `source_mapping`.
pub fn project_env_vars(source_mapping: Option<&str>, projects: &[Project]) -> Result<Vec<EnvVar>> {
    let root = sync_root_folder(source_mapping);
    let source = sync_folder(&root, projects)?;
    Ok(vec![
        EnvVar::new(ENV_PROJECTS_ROOT, root),
        EnvVar::new(ENV_PROJECT_SOURCE, source),
    ])
}

/// A copy of `container` with the project variables appended to its env.
///
/// Variables the container already sets keep their value.
pub fn with_project_env(container: &ContainerComponent, projects: &[Project]) -> Result<ContainerComponent> {
    let mut container = container.clone();
    for var in project_env_vars(container.source_mapping.as_deref(), projects)? {
        if container.env.iter().any(|existing| existing.name == var.name) {
            tracing::debug!(name = %var.name, "Container already sets project variable");
            continue;
        }
        container.env.push(var);
    }
    Ok(container)
}
