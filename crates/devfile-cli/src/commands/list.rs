//! The `list` command

use colored::Colorize;
use devfile_api::{Command, CommandKind, ComponentType, DevfileOptions, Project, ProjectSource};
use devfile_parser::Parser;
use serde_json::{Value, json};

use crate::cli::ListKind;
use crate::error::Result;
use crate::source::{Source, parse_source};

/// List the elements of one collection, filtered by attributes and type.
pub fn run_list(
    parser: &Parser,
    source: &Source,
    kind: ListKind,
    filter: &[(String, Value)],
    component_type: Option<ComponentType>,
    raw: bool,
    json: bool,
) -> Result<()> {
    let obj = parse_source(parser, source, raw)?;
    let options = build_options(filter, component_type);

    let rows: Vec<(String, String)> = match kind {
        ListKind::Components => obj
            .data
            .components(&options)
            .into_iter()
            .map(|c| (c.name.clone(), c.component_type().to_string()))
            .collect(),
        ListKind::Commands => obj
            .data
            .commands(&options)
            .into_iter()
            .map(|c| (c.id.clone(), command_kind(c).to_string()))
            .collect(),
        ListKind::Projects => obj
            .data
            .projects(&options)
            .into_iter()
            .map(|p| (p.name.clone(), project_kind(p).to_string()))
            .collect(),
    };

    if json {
        let output: Vec<Value> = rows
            .iter()
            .map(|(name, ty)| json!({ "name": name, "type": ty }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let title = match kind {
        ListKind::Components => "Components",
        ListKind::Commands => "Commands",
        ListKind::Projects => "Projects",
    };
    println!("{} ({})", title.bold(), rows.len());

    if rows.is_empty() {
        println!("  {}", "(none)".dimmed());
        return Ok(());
    }

    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, ty) in &rows {
        println!("  {} {:<width$}  {}", "+".green(), name, ty.dimmed());
    }
    Ok(())
}

fn build_options(filter: &[(String, Value)], component_type: Option<ComponentType>) -> DevfileOptions {
    let options = filter
        .iter()
        .fold(DevfileOptions::new(), |options, (key, value)| {
            options.with_filter(key.clone(), value.clone())
        });
    match component_type {
        Some(ty) => options.with_component_type(ty),
        None => options,
    }
}

fn command_kind(command: &Command) -> &'static str {
    match command.kind {
        CommandKind::Exec(_) => "exec",
        CommandKind::Apply(_) => "apply",
        CommandKind::Composite(_) => "composite",
    }
}

fn project_kind(project: &Project) -> &'static str {
    match project.source {
        ProjectSource::Git(_) => "git",
        ProjectSource::Zip(_) => "zip",
    }
}
