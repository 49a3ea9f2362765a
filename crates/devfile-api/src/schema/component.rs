//! Component definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::Reference;
use crate::schema::variant::decode_single_variant;
use crate::{Attributes, ElementKind, Error};

/// A named workspace component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Component {
    /// Unique component name within a devfile
    pub name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    /// The component variant, serialized as its own key (`container`, `plugin`, ...)
    #[serde(flatten)]
    pub kind: ComponentKind,
}

#[derive(Deserialize)]
struct ComponentFields {
    name: String,
    #[serde(default)]
    attributes: Attributes,
    #[serde(flatten)]
    kind: ComponentKind,
}

impl TryFrom<Map<String, Value>> for Component {
    type Error = Error;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: ComponentFields =
            decode_single_variant(ElementKind::Component, "name", ComponentKind::KEYS, fields)?;
        Ok(Self {
            name: fields.name,
            attributes: fields.attributes,
            kind: fields.kind,
        })
    }
}

impl Component {
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::default(),
            kind,
        }
    }

    /// The plugin reference, if this is a plugin component.
    pub fn plugin(&self) -> Option<&Reference> {
        match &self.kind {
            ComponentKind::Plugin(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn is_plugin(&self) -> bool {
        self.plugin().is_some()
    }

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }
}

/// The variants a component can take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    Container(ContainerComponent),
    Kubernetes(KubernetesComponent),
    Openshift(KubernetesComponent),
    Volume(VolumeComponent),
    /// An image built from a Dockerfile
    Image(ImageComponent),
    /// A reference to another devfile, expanded during flattening
    Plugin(Reference),
}

impl ComponentKind {
    /// Wire keys of the variants.
    pub const KEYS: &'static [&'static str] =
        &["container", "kubernetes", "openshift", "volume", "image", "plugin"];

    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::Container(_) => ComponentType::Container,
            ComponentKind::Kubernetes(_) => ComponentType::Kubernetes,
            ComponentKind::Openshift(_) => ComponentType::Openshift,
            ComponentKind::Volume(_) => ComponentType::Volume,
            ComponentKind::Image(_) => ComponentType::Image,
            ComponentKind::Plugin(_) => ComponentType::Plugin,
        }
    }
}

/// Discriminant of [`ComponentKind`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Container,
    Kubernetes,
    Openshift,
    Volume,
    Image,
    Plugin,
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ComponentType::Container => "container",
            ComponentType::Kubernetes => "kubernetes",
            ComponentType::Openshift => "openshift",
            ComponentType::Volume => "volume",
            ComponentType::Image => "image",
            ComponentType::Plugin => "plugin",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "container" => Ok(ComponentType::Container),
            "kubernetes" => Ok(ComponentType::Kubernetes),
            "openshift" => Ok(ComponentType::Openshift),
            "volume" => Ok(ComponentType::Volume),
            "image" => Ok(ComponentType::Image),
            "plugin" => Ok(ComponentType::Plugin),
            other => Err(format!("unknown component type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerComponent {
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,
    /// Kubernetes quantity string, e.g. `512Mi`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_sources: Option<bool>,
    /// Where project sources are mounted; `/projects` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_mapping: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedicated_pod: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub name: String,
    pub target_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure: Option<EndpointExposure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointExposure {
    Public,
    Internal,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMount {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Kubernetes or OpenShift manifests, referenced by URI or inlined.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KubernetesComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inlined: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VolumeComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageComponent {
    pub image_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<DockerfileImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_build: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerfileImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_context: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_required: Option<bool>,
}
