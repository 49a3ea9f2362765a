//! Filtering options for listing devfile elements

use serde_json::Value;
use std::collections::BTreeMap;

use crate::{Attributes, Component, ComponentType};

/// Selects elements by attribute values and, for components, by variant.
///
/// An element passes the attribute filter when every filter key is present
/// in its attributes with an equal value. Empty options select everything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DevfileOptions {
    pub filter: BTreeMap<String, Value>,
    pub component_type: Option<ComponentType>,
}

impl DevfileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require attribute `key` to equal `value`.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(key.into(), value.into());
        self
    }

    pub fn with_component_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = Some(component_type);
        self
    }

    pub fn matches_attributes(&self, attributes: &Attributes) -> bool {
        self.filter
            .iter()
            .all(|(key, expected)| attributes.get(key) == Some(expected))
    }

    pub fn matches_component(&self, component: &Component) -> bool {
        self.component_type
            .is_none_or(|ty| component.component_type() == ty)
            && self.matches_attributes(&component.attributes)
    }
}
