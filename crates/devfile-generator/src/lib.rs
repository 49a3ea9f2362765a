//! Container settings derived from a flattened devfile
//!
//! Computes where project sources are synced inside a container and the
//! environment variables that advertise those locations.

pub mod error;
pub mod sync;

pub use error::{Error, Result};
pub use sync::{
    DEFAULT_PROJECTS_ROOT, ENV_PROJECT_SOURCE, ENV_PROJECTS_ROOT, project_env_vars, sync_folder,
    sync_root_folder, with_project_env,
};
