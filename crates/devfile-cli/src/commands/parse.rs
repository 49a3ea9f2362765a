//! The `parse` command

use devfile_parser::Parser;

use crate::error::Result;
use crate::source::{Source, parse_source};

/// Print the (flattened) devfile as YAML or JSON.
pub fn run_parse(parser: &Parser, source: &Source, raw: bool, json: bool) -> Result<()> {
    let obj = parse_source(parser, source, raw)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&obj.data)?);
    } else {
        print!("{}", serde_yaml::to_string(&obj.data)?);
    }
    Ok(())
}
