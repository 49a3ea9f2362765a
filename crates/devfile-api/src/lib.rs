//! Data model for devfiles.
//!
//! This crate provides the strongly-typed devfile schema: the document
//! itself, its parent and plugin references with their override
//! directives, and the mergeable [`WorkspaceContent`] that flattening
//! operates on.

pub mod attributes;
pub mod content;
pub mod error;
pub mod options;
pub mod schema;
pub mod validation;

pub use attributes::Attributes;
pub use content::{ElementKind, HasId, WorkspaceContent};
pub use error::{Error, Result};
pub use options::DevfileOptions;
pub use schema::{
    ApplyCommand, CheckoutFrom, Command, CommandGroup, CommandGroupKind, CommandKind, Component,
    ComponentKind, ComponentType, CompositeCommand, ContainerComponent, Devfile, DockerfileImage,
    ElementPatch, Endpoint, EndpointExposure, EnvVar, ExecCommand, GitSource, ImageComponent,
    KubernetesComponent, Metadata, OverrideSet, PatchAction, Project, ProjectSource, Reference,
    VolumeComponent, VolumeMount, ZipSource,
};
