//! Flattening devfiles served over HTTP

use axum::Router;
use axum::routing::get;
use devfile_context::{DevfileLoader, LoaderConfig};
use devfile_parser::{Error, Parser};
use devfile_test_utils::devfiles::{child_devfile, containers_devfile, plugin_entry};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Runtime;

/// An axum server answering GET requests from a fixed map of documents.
///
/// Unknown paths get axum's default 404. The server stops when the value is
/// dropped.
struct DevfileServer {
    url: String,
    _runtime: Runtime,
}

impl DevfileServer {
    fn start(documents: HashMap<&'static str, String>) -> Self {
        let router = documents.into_iter().fold(Router::new(), |router, (path, body)| {
            router.route(path, get(move || async move { body }))
        });

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        runtime.spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url,
            _runtime: runtime,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.url)
    }
}

fn parser() -> Parser {
    Parser::new().with_loader(DevfileLoader::with_config(LoaderConfig {
        timeout: Some(Duration::from_secs(10)),
        ..LoaderConfig::default()
    }))
}

#[test]
fn test_remote_parent_with_relative_plugin() {
    let base = format!("{}{}", containers_devfile(&["runtime"]), plugin_entry("lint", "../plugins/lint.yaml"));
    let server = DevfileServer::start(HashMap::from([
        ("/stacks/base.yaml", base),
        ("/plugins/lint.yaml", containers_devfile(&["linter"])),
    ]));

    let local = child_devfile(&server.url("/stacks/base.yaml"), &["app"]);
    let obj = parser().parse_from_data(local.as_bytes()).unwrap();

    let names: Vec<_> = obj.data.content.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["linter", "runtime", "app"]);
}

#[test]
fn test_parse_from_url() {
    let server = DevfileServer::start(HashMap::from([
        ("/app/devfile.yaml", child_devfile("../base/devfile.yaml", &["app"])),
        ("/base/devfile.yaml", containers_devfile(&["base"])),
    ]));

    let obj = parser().parse_from_url(&server.url("/app/devfile.yaml")).unwrap();

    assert_eq!(obj.ctx.location().to_string(), server.url("/app/devfile.yaml"));
    let names: Vec<_> = obj.data.content.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["base", "app"]);
}

#[test]
fn test_remote_not_found_is_a_fetch_error() {
    let server = DevfileServer::start(HashMap::from([("/present.yaml", containers_devfile(&["a"]))]));

    let local = child_devfile(&server.url("/missing.yaml"), &["app"]);
    let err = parser().parse_from_data(local.as_bytes()).unwrap_err();

    assert!(matches!(
        err.innermost(),
        Error::Context(devfile_context::Error::Fetch { .. })
    ));
}

#[test]
fn test_remote_document_over_size_limit() {
    let server = DevfileServer::start(HashMap::from([("/big.yaml", containers_devfile(&["a", "b", "c"]))]));
    let parser = Parser::new().with_loader(DevfileLoader::with_config(LoaderConfig {
        timeout: Some(Duration::from_secs(10)),
        max_size: 16,
    }));

    let err = parser.parse_from_url(&server.url("/big.yaml")).unwrap_err();
    assert!(matches!(
        err,
        Error::Context(devfile_context::Error::DocumentTooLarge { .. })
    ));
}
