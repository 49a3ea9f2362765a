//! End-to-end tests over the fixture devfiles
//!
//! These exercise the complete flow: load -> flatten -> generate container settings.

use devfile_api::{CommandGroupKind, ComponentKind, ComponentType, DevfileOptions};
use devfile_generator::{project_env_vars, with_project_env};
use devfile_parser::{DevfileObj, Parser, parse, parse_raw_devfile};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/devfiles")
        .join(relative)
}

fn web() -> DevfileObj {
    parse(fixture("apps/web")).unwrap()
}

fn container<'a>(obj: &'a DevfileObj, name: &str) -> &'a devfile_api::ContainerComponent {
    let component = obj
        .data
        .content
        .components
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("no component {name}"));
    match &component.kind {
        ComponentKind::Container(container) => container,
        other => panic!("{name} is not a container: {other:?}"),
    }
}

#[test]
fn test_fixture_flattens_all_layers() {
    let obj = web();

    assert!(obj.data.parent.is_none());
    let components: Vec<_> = obj.data.content.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(components, vec!["runtime", "otel-collector", "cache"]);

    let commands: Vec<_> = obj.data.content.commands.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(commands, vec!["install", "run", "test"]);

    assert_eq!(obj.data.metadata.as_ref().unwrap().name.as_deref(), Some("web"));
}

#[test]
fn test_fixture_overrides_are_applied() {
    let obj = web();

    let runtime = container(&obj, "runtime");
    assert_eq!(runtime.image, "registry.access.redhat.com/ubi8/nodejs-20:1-9");
    assert_eq!(runtime.source_mapping.as_deref(), Some("/workspace"));
    assert_eq!(runtime.memory_limit.as_deref(), Some("1024Mi"));
    assert_eq!(runtime.endpoints[0].target_port, 3000);

    let collector = container(&obj, "otel-collector");
    assert_eq!(collector.memory_limit.as_deref(), Some("512Mi"));
    assert_eq!(collector.image, "otel/opentelemetry-collector:0.88.0");
}

#[test]
fn test_fixture_filters_after_flattening() {
    let obj = web();

    let node = obj.data.components(&DevfileOptions::new().with_filter("tool", "node"));
    assert_eq!(node.len(), 1);
    assert_eq!(node[0].name, "runtime");

    let containers = obj
        .data
        .components(&DevfileOptions::new().with_component_type(ComponentType::Container));
    assert_eq!(containers.len(), 2);

    let tests: Vec<_> = obj
        .data
        .content
        .commands
        .iter()
        .filter(|c| c.group().is_some_and(|g| g.kind == CommandGroupKind::Test))
        .collect();
    assert_eq!(tests.len(), 1);
}

#[test]
fn test_fixture_raw_parse_keeps_references() {
    let obj = parse_raw_devfile(fixture("apps/web/devfile.yaml")).unwrap();

    assert_eq!(
        obj.data.parent.as_ref().map(|p| p.uri.as_str()),
        Some("../../stacks/nodejs/devfile.yaml")
    );
    assert_eq!(obj.data.content.plugins().count(), 1);
    assert_eq!(obj.data.content.components.len(), 2);
}

#[test]
fn test_fixture_flatten_after_raw_matches_parse() {
    let parser = Parser::new();
    let raw = parser.parse_raw(fixture("apps/web")).unwrap();

    let flattened = parser.flatten(raw).unwrap();
    assert_eq!(flattened.data, web().data);

    let again = parser.flatten(flattened.clone()).unwrap();
    assert_eq!(again.data, flattened.data);
}

#[test]
fn test_fixture_sync_folder() {
    let obj = web();
    let runtime = container(&obj, "runtime");

    let vars = project_env_vars(runtime.source_mapping.as_deref(), &obj.data.content.projects).unwrap();
    let rendered: Vec<_> = vars.iter().map(|v| format!("{}={}", v.name, v.value)).collect();
    assert_eq!(rendered, vec!["PROJECTS_ROOT=/workspace", "PROJECT_SOURCE=/workspace/src/web"]);

    let collector = with_project_env(container(&obj, "otel-collector"), &obj.data.content.projects).unwrap();
    assert!(collector.env.iter().any(|v| v.name == "PROJECT_SOURCE" && v.value == "/projects/src/web"));
}

#[test]
fn test_fixture_names_are_valid() {
    web().data.validate_names().unwrap();
}

#[test]
fn test_fixture_files_are_not_modified() {
    let path = fixture("apps/web/devfile.yaml");
    let before = std::fs::read_to_string(&path).unwrap();
    web();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}
