//! Flattening behaviour against an in-memory document store

use devfile_api::{ComponentKind, ComponentType, DevfileOptions, ElementKind, ProjectSource};
use devfile_parser::{Error, Parser, ParserOptions, ReferenceContext};
use devfile_test_utils::MemoryLoader;
use devfile_test_utils::devfiles::{child_devfile, container_entries, containers_devfile, plugin_entry};
use pretty_assertions::assert_eq;
use rstest::rstest;

const REGISTRY: &str = "https://registry.example.com/stacks";

fn url(path: &str) -> String {
    format!("{REGISTRY}/{path}")
}

fn component_names(parser: &Parser, data: &[u8]) -> Vec<String> {
    parser
        .parse_from_data(data)
        .unwrap()
        .data
        .content
        .components
        .into_iter()
        .map(|c| c.name)
        .collect()
}

#[test]
fn test_parent_plugin_and_local_are_combined() {
    let loader = MemoryLoader::new()
        .with_document(url("base/devfile.yaml"), containers_devfile(&["a"]))
        .with_document(url("plugins/tools.yaml"), containers_devfile(&["b"]));
    let parser = Parser::new().with_loader(loader);

    let local = format!(
        "{}{}",
        child_devfile(&url("base/devfile.yaml"), &["c"]),
        plugin_entry("tools", &url("plugins/tools.yaml"))
    );
    let obj = parser.parse_from_data(local.as_bytes()).unwrap();

    assert!(obj.data.parent.is_none());
    assert!(obj.data.content.plugins().next().is_none());
    let names: Vec<_> = obj.data.content.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_document_without_references_is_unchanged() {
    let parser = Parser::new().with_loader(MemoryLoader::new());
    let content = containers_devfile(&["x", "y"]);

    let raw = parser.parse_from_data(content.as_bytes()).unwrap();
    let flat = parser.flatten(raw.clone()).unwrap();

    assert_eq!(flat.data, raw.data);
}

#[test]
fn test_flattening_is_idempotent() {
    let loader = MemoryLoader::new().with_document(url("base/devfile.yaml"), containers_devfile(&["a"]));
    let parser = Parser::new().with_loader(loader);

    let once = parser
        .parse_from_data(child_devfile(&url("base/devfile.yaml"), &["c"]).as_bytes())
        .unwrap();
    let twice = parser.flatten(once.clone()).unwrap();

    assert_eq!(twice.data, once.data);
}

#[test]
fn test_grandparent_content_is_inherited() {
    let loader = MemoryLoader::new()
        .with_document(url("root/devfile.yaml"), containers_devfile(&["root"]))
        .with_document(url("mid/devfile.yaml"), child_devfile("../root/devfile.yaml", &["mid"]));
    let parser = Parser::new().with_loader(loader);

    let names = component_names(&parser, child_devfile(&url("mid/devfile.yaml"), &["leaf"]).as_bytes());
    assert_eq!(names, vec!["root", "mid", "leaf"]);
}

#[test]
fn test_parent_plugins_are_expanded() {
    let parent = format!(
        "{}{}",
        containers_devfile(&["runtime"]),
        plugin_entry("lint", "lint.yaml")
    );
    let loader = MemoryLoader::new()
        .with_document(url("base/devfile.yaml"), parent)
        .with_document(url("base/lint.yaml"), containers_devfile(&["linter"]));
    let parser = Parser::new().with_loader(loader);

    let names = component_names(&parser, child_devfile(&url("base/devfile.yaml"), &[]).as_bytes());
    assert_eq!(names, vec!["linter", "runtime"]);
}

#[test]
fn test_parent_overrides_patch_inherited_content() {
    let loader = MemoryLoader::new()
        .with_document(url("base/devfile.yaml"), containers_devfile(&["runtime", "db"]));
    let parser = Parser::new().with_loader(loader);

    let local = format!(
        r#"schemaVersion: 2.2.0
parent:
  uri: {}
  overrides:
    components:
      - name: runtime
        container:
          image: node:20
      - name: db
        $patch: delete
"#,
        url("base/devfile.yaml")
    );
    let obj = parser.parse_from_data(local.as_bytes()).unwrap();

    assert_eq!(obj.data.content.components.len(), 1);
    match &obj.data.content.components[0].kind {
        ComponentKind::Container(container) => assert_eq!(container.image, "node:20"),
        other => panic!("expected container, got {other:?}"),
    }

    // The referenced document is not modified by applying overrides to it.
    let parent = parser.parse_from_url(&url("base/devfile.yaml")).unwrap();
    assert_eq!(parent.data.content.components.len(), 2);
}

#[test]
fn test_plugin_overrides_patch_plugin_content() {
    let loader = MemoryLoader::new().with_document(url("plugins/tools.yaml"), containers_devfile(&["tools"]));
    let parser = Parser::new().with_loader(loader);

    let local = format!(
        r#"schemaVersion: 2.2.0
components:
  - name: tooling
    plugin:
      uri: {}
      overrides:
        components:
          - name: tools
            container:
              memoryLimit: 2Gi
"#,
        url("plugins/tools.yaml")
    );
    let obj = parser.parse_from_data(local.as_bytes()).unwrap();

    match &obj.data.content.components[0].kind {
        ComponentKind::Container(container) => {
            assert_eq!(container.image, "tools:latest");
            assert_eq!(container.memory_limit.as_deref(), Some("2Gi"));
        }
        other => panic!("expected container, got {other:?}"),
    }
}

#[test]
fn test_override_cannot_target_local_element() {
    let loader = MemoryLoader::new().with_document(url("base/devfile.yaml"), containers_devfile(&["a"]));
    let parser = Parser::new().with_loader(loader);

    let local = format!(
        "schemaVersion: 2.2.0\nparent:\n  uri: {}\n  overrides:\n    components:\n      - name: c\n        container:\n          image: x\ncomponents:\n{}",
        url("base/devfile.yaml"),
        container_entries(&["c"])
    );
    let err = parser.parse_from_data(local.as_bytes()).unwrap_err();

    assert!(matches!(
        err.innermost(),
        Error::OverrideTargetNotFound { kind: ElementKind::Component, key } if key == "c"
    ));
    assert!(matches!(&err, Error::Reference { context: ReferenceContext::Parent, .. }));
}

#[test]
fn test_redefining_inherited_element_conflicts() {
    let loader = MemoryLoader::new().with_document(url("base/devfile.yaml"), containers_devfile(&["a"]));
    let parser = Parser::new().with_loader(loader);

    let local = format!(
        "schemaVersion: 2.2.0\nparent:\n  uri: {}\ncomponents:\n  - name: a\n    container:\n      image: other\n",
        url("base/devfile.yaml")
    );
    let err = parser.parse_from_data(local.as_bytes()).unwrap_err();

    assert!(matches!(&err, Error::MergeConflict { key, .. } if key == "a"), "got {err}");
}

#[test]
fn test_identical_redefinition_collapses() {
    let loader = MemoryLoader::new().with_document(url("base/devfile.yaml"), containers_devfile(&["a"]));
    let parser = Parser::new().with_loader(loader);

    let names = component_names(&parser, child_devfile(&url("base/devfile.yaml"), &["a"]).as_bytes());
    assert_eq!(names, vec!["a"]);
}

const BASE_WITH_COMMANDS_AND_PROJECTS: &str = r#"schemaVersion: 2.2.0
commands:
  - id: build
    exec:
      commandLine: make
      component: runtime
projects:
  - name: web
    git:
      remotes:
        origin: https://example.com/web.git
  - name: docs
    zip:
      location: https://example.com/docs.zip
"#;

fn base_loader() -> MemoryLoader {
    MemoryLoader::new().with_document(url("base/devfile.yaml"), BASE_WITH_COMMANDS_AND_PROJECTS)
}

#[rstest]
#[case::command(
    "commands:\n  - id: build\n    exec:\n      commandLine: make all\n      component: runtime\n",
    ElementKind::Command,
    "build"
)]
#[case::project(
    "projects:\n  - name: web\n    git:\n      remotes:\n        origin: https://example.com/fork.git\n",
    ElementKind::Project,
    "web"
)]
fn test_redefining_inherited_command_or_project_conflicts(
    #[case] local: &str,
    #[case] kind: ElementKind,
    #[case] key: &str,
) {
    let parser = Parser::new().with_loader(base_loader());

    let document = format!("schemaVersion: 2.2.0\nparent:\n  uri: {}\n{local}", url("base/devfile.yaml"));
    let err = parser.parse_from_data(document.as_bytes()).unwrap_err();

    assert!(
        matches!(&err, Error::MergeConflict { kind: found, key: found_key } if *found == kind && found_key == key),
        "got {err}"
    );
}

#[test]
fn test_identical_command_and_project_redefinitions_collapse() {
    let parser = Parser::new().with_loader(base_loader());

    let document = format!(
        "schemaVersion: 2.2.0\nparent:\n  uri: {}\n{}",
        url("base/devfile.yaml"),
        BASE_WITH_COMMANDS_AND_PROJECTS.trim_start_matches("schemaVersion: 2.2.0\n")
    );
    let obj = parser.parse_from_data(document.as_bytes()).unwrap();

    let commands: Vec<_> = obj.data.content.commands.iter().map(|c| c.id.as_str()).collect();
    let projects: Vec<_> = obj.data.content.projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(commands, vec!["build"]);
    assert_eq!(projects, vec!["web", "docs"]);
}

#[test]
fn test_parent_overrides_patch_and_delete_projects() {
    let parser = Parser::new().with_loader(base_loader());

    let document = format!(
        r#"schemaVersion: 2.2.0
parent:
  uri: {}
  overrides:
    projects:
      - name: web
        clonePath: src/web
        git:
          checkoutFrom:
            revision: release
      - name: docs
        $patch: delete
"#,
        url("base/devfile.yaml")
    );
    let obj = parser.parse_from_data(document.as_bytes()).unwrap();

    let projects = &obj.data.content.projects;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "web");
    assert_eq!(projects[0].clone_path.as_deref(), Some("src/web"));
    match &projects[0].source {
        ProjectSource::Git(git) => {
            assert_eq!(git.remotes["origin"], "https://example.com/web.git");
            assert_eq!(git.checkout_from.as_ref().unwrap().revision.as_deref(), Some("release"));
        }
        other => panic!("expected git, got {other:?}"),
    }
}

#[test]
fn test_project_override_for_unknown_project_fails() {
    let parser = Parser::new().with_loader(base_loader());

    let document = format!(
        "schemaVersion: 2.2.0\nparent:\n  uri: {}\n  overrides:\n    projects:\n      - name: api\n        clonePath: api\n",
        url("base/devfile.yaml")
    );
    let err = parser.parse_from_data(document.as_bytes()).unwrap_err();

    assert!(matches!(
        err.innermost(),
        Error::OverrideTargetNotFound { kind: ElementKind::Project, key } if key == "api"
    ));
}

#[test]
fn test_sibling_plugins_may_share_a_reference() {
    let loader = MemoryLoader::new().with_document(url("plugins/shared.yaml"), containers_devfile(&["shared"]));
    let parser = Parser::new().with_loader(loader);

    let local = format!(
        "schemaVersion: 2.2.0\ncomponents:\n{}{}",
        plugin_entry("first", &url("plugins/shared.yaml")),
        plugin_entry("second", &url("plugins/shared.yaml"))
    );
    let names = component_names(&parser, local.as_bytes());
    assert_eq!(names, vec!["shared"]);
}

#[rstest]
#[case::self_reference(&[("a.yaml", "a.yaml")], "a.yaml")]
#[case::two_documents(&[("a.yaml", "b.yaml"), ("b.yaml", "a.yaml")], "a.yaml")]
#[case::three_documents(&[("a.yaml", "b.yaml"), ("b.yaml", "c.yaml"), ("c.yaml", "a.yaml")], "a.yaml")]
fn test_reference_cycle_is_reported(#[case] edges: &[(&str, &str)], #[case] start: &str) {
    let loader = edges.iter().fold(MemoryLoader::new(), |loader, (from, to)| {
        loader.with_document(url(from), child_devfile(to, &[]))
    });
    let parser = Parser::new().with_loader(loader);

    let err = parser.parse_from_url(&url(start)).unwrap_err();

    match err.innermost() {
        Error::Cycle { chain } => {
            assert_eq!(chain.first(), chain.last());
            assert_eq!(chain.len(), edges.len() + 1);
        }
        other => panic!("expected cycle, got {other}"),
    }
}

#[test]
fn test_failing_parent_fetch_names_the_reference() {
    let parser = Parser::new().with_loader(MemoryLoader::new());

    let err = parser
        .parse_from_data(child_devfile(&url("missing.yaml"), &["c"]).as_bytes())
        .unwrap_err();

    assert_eq!(err.reference_trail(), vec![url("missing.yaml").as_str()]);
    assert!(matches!(
        err.innermost(),
        Error::Context(devfile_context::Error::Fetch { .. })
    ));
    assert!(err.to_string().contains("parent"));
}

#[test]
fn test_nested_failure_keeps_every_hop() {
    let loader = MemoryLoader::new().with_document(url("mid.yaml"), child_devfile("gone.yaml", &[]));
    let parser = Parser::new().with_loader(loader);

    let err = parser
        .parse_from_data(child_devfile(&url("mid.yaml"), &[]).as_bytes())
        .unwrap_err();

    assert_eq!(err.reference_trail(), vec![url("mid.yaml").as_str(), "gone.yaml"]);
}

#[test]
fn test_raw_parse_never_fetches() {
    let loader = MemoryLoader::new();
    let parser = Parser::new().with_loader(loader);
    let content = format!(
        "{}{}",
        child_devfile(&url("base/devfile.yaml"), &["c"]),
        plugin_entry("tools", &url("plugins/tools.yaml"))
    );

    let ctx = devfile_context::DevfileCtx::from_bytes(
        devfile_context::Location::Memory,
        content.into_bytes(),
    )
    .unwrap();
    let obj = parser.parse_devfile(ctx, false).unwrap();

    assert_eq!(obj.data.parent.as_ref().unwrap().uri, url("base/devfile.yaml"));
    let plugins = obj
        .data
        .components(&DevfileOptions::new().with_component_type(ComponentType::Plugin));
    assert_eq!(plugins.len(), 1);
}

#[test]
fn test_raw_parse_records_no_fetch() {
    let loader = std::sync::Arc::new(MemoryLoader::new());
    let parser = Parser::new().with_loader(SharedLoader(loader.clone()));

    parser
        .parse_from_data(child_devfile(&url("base/devfile.yaml"), &[]).as_bytes())
        .unwrap_err();
    assert_eq!(loader.fetched(), vec![url("base/devfile.yaml")]);

    let ctx = devfile_context::DevfileCtx::from_bytes(
        devfile_context::Location::Memory,
        child_devfile(&url("other.yaml"), &[]).into_bytes(),
    )
    .unwrap();
    parser.parse_devfile(ctx, false).unwrap();
    assert_eq!(loader.fetched().len(), 1);
}

#[test]
fn test_plugin_without_uri_contributes_nothing() {
    let parser = Parser::new().with_loader(MemoryLoader::new());
    let local = "schemaVersion: 2.2.0\ncomponents:\n  - name: empty\n    plugin: {}\n  - name: c\n    volume: {}\n";

    let names = component_names(&parser, local.as_bytes());
    assert_eq!(names, vec!["c"]);
}

#[test]
fn test_plugin_without_uri_is_rejected_when_strict() {
    let parser = Parser::new()
        .with_loader(MemoryLoader::new())
        .with_options(ParserOptions {
            strict_plugins: true,
        });
    let local = "schemaVersion: 2.2.0\ncomponents:\n  - name: empty\n    plugin:\n      uri: ''\n";

    let err = parser.parse_from_data(local.as_bytes()).unwrap_err();
    assert!(matches!(&err, Error::PluginWithoutUri { component } if component == "empty"));
}

#[test]
fn test_invalid_reference_scheme() {
    let parser = Parser::new().with_loader(MemoryLoader::new());

    let err = parser
        .parse_from_data(child_devfile("ftp://example.com/devfile.yaml", &[]).as_bytes())
        .unwrap_err();
    assert!(matches!(
        err.innermost(),
        Error::Context(devfile_context::Error::InvalidReference { .. })
    ));
}

/// Lets a test keep a handle on the loader after handing it to the parser.
struct SharedLoader(std::sync::Arc<MemoryLoader>);

impl devfile_context::ContextLoader for SharedLoader {
    fn load_path(
        &self,
        path: &devfile_context::NormalizedPath,
    ) -> devfile_context::Result<devfile_context::DevfileCtx> {
        self.0.load_path(path)
    }

    fn load_url(&self, url: &str) -> devfile_context::Result<devfile_context::DevfileCtx> {
        self.0.load_url(url)
    }
}
