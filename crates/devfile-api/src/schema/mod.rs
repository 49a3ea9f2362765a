//! Schema definitions for devfile documents
//!
//! The variant-bearing elements (components, commands, project sources) are
//! closed sum types: exactly one variant key is present on the wire, e.g.
//!
//! ```yaml
//! components:
//!   - name: runtime
//!     container:
//!       image: node:18
//!   - name: tooling
//!     plugin:
//!       uri: https://example.com/plugin.yaml
//! ```

pub mod command;
pub mod component;
pub mod devfile;
pub mod project;
pub mod reference;
mod variant;

pub use command::{
    ApplyCommand, Command, CommandGroup, CommandGroupKind, CommandKind, CompositeCommand,
    ExecCommand,
};
pub use component::{
    Component, ComponentKind, ComponentType, ContainerComponent, DockerfileImage, Endpoint,
    EndpointExposure, EnvVar, ImageComponent, KubernetesComponent, VolumeComponent, VolumeMount,
};
pub use devfile::{Devfile, Metadata};
pub use project::{CheckoutFrom, GitSource, Project, ProjectSource, ZipSource};
pub use reference::{ElementPatch, OverrideSet, PatchAction, Reference};
