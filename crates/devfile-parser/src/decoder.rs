//! Decoding raw devfile content into the typed model

use devfile_api::Devfile;
use devfile_context::DevfileCtx;

use crate::{Error, Result};

/// Turns a validated [`DevfileCtx`] into a [`Devfile`].
pub trait DocumentDecoder: Send + Sync {
    fn decode(&self, ctx: &DevfileCtx) -> Result<Devfile>;
}

/// Decodes YAML (and therefore JSON) documents, dispatching on the
/// declared schema major version.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlDecoder;

impl DocumentDecoder for YamlDecoder {
    fn decode(&self, ctx: &DevfileCtx) -> Result<Devfile> {
        let version = ctx.schema_version()?;
        match version.major {
            2 => serde_yaml::from_slice(ctx.content()).map_err(|source| Error::Decode {
                location: ctx.location().to_string(),
                source,
            }),
            _ => Err(devfile_context::Error::UnsupportedSchemaVersion {
                location: ctx.location().to_string(),
                version: ctx.api_version().to_string(),
            }
            .into()),
        }
    }
}
