//! Small devfile documents for tests.

/// Schema version used by generated documents.
pub const SCHEMA_VERSION: &str = "2.2.0";

/// YAML list entries for container components named `names`.
///
/// Each container uses the image `<name>:latest`.
pub fn container_entries(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("  - name: {name}\n    container:\n      image: {name}:latest\n"))
        .collect()
}

/// A devfile declaring one container component per name.
pub fn containers_devfile(names: &[&str]) -> String {
    let mut doc = format!("schemaVersion: {SCHEMA_VERSION}\n");
    if !names.is_empty() {
        doc.push_str("components:\n");
        doc.push_str(&container_entries(names));
    }
    doc
}

/// A devfile with a parent reference and local containers.
pub fn child_devfile(parent_uri: &str, names: &[&str]) -> String {
    let mut doc = format!("schemaVersion: {SCHEMA_VERSION}\nparent:\n  uri: {parent_uri}\n");
    if !names.is_empty() {
        doc.push_str("components:\n");
        doc.push_str(&container_entries(names));
    }
    doc
}

/// A YAML list entry for a plugin component.
pub fn plugin_entry(name: &str, uri: &str) -> String {
    format!("  - name: {name}\n    plugin:\n      uri: {uri}\n")
}
