//! The `sync-folder` command

use colored::Colorize;
use devfile_api::{ComponentKind, ContainerComponent};
use devfile_generator::project_env_vars;
use devfile_parser::Parser;
use serde_json::{Map, Value};

use crate::error::{CliError, Result};
use crate::source::{Source, parse_source};

/// Print `PROJECTS_ROOT` and `PROJECT_SOURCE` for a container component.
pub fn run_sync_folder(parser: &Parser, source: &Source, component: Option<&str>, json: bool) -> Result<()> {
    let obj = parse_source(parser, source, false)?;
    let (name, container) = select_container(&obj.data.content.components, component)?;

    let vars = project_env_vars(container.source_mapping.as_deref(), &obj.data.content.projects)?;
    tracing::debug!(component = name, "Computed project variables");

    if json {
        let output: Map<String, Value> = vars
            .into_iter()
            .map(|var| (var.name, Value::String(var.value)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for var in vars {
        println!("{}={}", var.name.cyan(), var.value);
    }
    Ok(())
}

fn select_container<'a>(
    components: &'a [devfile_api::Component],
    wanted: Option<&str>,
) -> Result<(&'a str, &'a ContainerComponent)> {
    let mut containers = components.iter().filter_map(|c| match &c.kind {
        ComponentKind::Container(container) => Some((c.name.as_str(), container)),
        _ => None,
    });

    match wanted {
        Some(wanted) => containers
            .find(|(name, _)| *name == wanted)
            .ok_or_else(|| CliError::user(format!("No container component named '{wanted}'"))),
        None => containers
            .next()
            .ok_or_else(|| CliError::user("The devfile declares no container component")),
    }
}
