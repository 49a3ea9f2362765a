//! Where the CLI reads a devfile from

use std::io::Read;
use std::path::PathBuf;

use devfile_context::{DevfileCtx, Location, NormalizedPath};
use devfile_parser::{DevfileObj, Parser};

use crate::error::{CliError, Result};

/// A devfile location given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
    Stdin,
}

impl Source {
    pub fn new(raw: &str) -> Self {
        let lower = raw.to_ascii_lowercase();
        if raw == "-" {
            Source::Stdin
        } else if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(raw.to_string())
        } else {
            Source::Path(PathBuf::from(raw))
        }
    }

    fn load(&self, parser: &Parser) -> Result<DevfileCtx> {
        let ctx = match self {
            Source::Path(path) => parser.loader().load_path(&NormalizedPath::new(path))?,
            Source::Url(url) => parser.loader().load(&Location::Url(url.clone()))?,
            Source::Stdin => {
                let mut buffer = Vec::new();
                std::io::stdin().read_to_end(&mut buffer)?;
                if buffer.is_empty() {
                    return Err(CliError::user("No devfile content on stdin"));
                }
                parser.loader().load_bytes(&buffer)?
            }
        };
        Ok(ctx)
    }
}

/// Load, decode and (unless `raw`) flatten `source`, then check element names.
pub fn parse_source(parser: &Parser, source: &Source, raw: bool) -> Result<DevfileObj> {
    let ctx = source.load(parser)?;
    tracing::debug!(location = %ctx.location(), raw, "Parsing devfile");

    let obj = parser.parse_devfile(ctx, !raw)?;
    obj.data.validate_names()?;
    Ok(obj)
}
