//! Parse entry points

use std::path::Path;

use devfile_api::Devfile;
use devfile_context::{ContextLoader, DevfileCtx, DevfileLoader, Location, NormalizedPath};

use crate::Result;
use crate::decoder::{DocumentDecoder, YamlDecoder};
use crate::flatten::Resolver;

/// Behaviour switches for [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserOptions {
    /// Reject plugin components without a uri instead of skipping them.
    pub strict_plugins: bool,
}

/// A parsed devfile together with the raw context it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct DevfileObj {
    pub ctx: DevfileCtx,
    pub data: Devfile,
}

/// Loads, decodes and optionally flattens devfiles.
///
/// A parser holds no per-parse state: each call starts a fresh resolution,
/// so one parser may serve several threads at once.
///
/// # Example
///
/// ```ignore
/// use devfile_parser::Parser;
///
/// let obj = Parser::new().parse("./devfile.yaml")?;
/// for component in &obj.data.content.components {
///     println!("{}", component.name);
/// }
/// ```
pub struct Parser {
    loader: Box<dyn ContextLoader>,
    decoder: Box<dyn DocumentDecoder>,
    options: ParserOptions,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Parser {
    /// A parser reading from disk and HTTP with default settings.
    pub fn new() -> Self {
        Self {
            loader: Box::new(DevfileLoader::new()),
            decoder: Box::new(YamlDecoder),
            options: ParserOptions::default(),
        }
    }

    pub fn with_loader(mut self, loader: impl ContextLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    pub fn with_decoder(mut self, decoder: impl DocumentDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The loader this parser fetches documents with.
    pub fn loader(&self) -> &dyn ContextLoader {
        self.loader.as_ref()
    }

    /// Validate the declared schema version, then decode.
    pub(crate) fn decode(&self, ctx: &DevfileCtx) -> Result<Devfile> {
        ctx.validate()?;
        self.decoder.decode(ctx)
    }

    /// Parse and flatten the devfile at `path` (a file or a directory holding one).
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<DevfileObj> {
        let ctx = self.loader.load_path(&NormalizedPath::new(path))?;
        self.parse_devfile(ctx, true)
    }

    /// Parse and flatten the devfile served at `url`.
    pub fn parse_from_url(&self, url: &str) -> Result<DevfileObj> {
        let ctx = self.loader.load(&Location::Url(url.to_string()))?;
        self.parse_devfile(ctx, true)
    }

    /// Parse and flatten devfile content held in memory.
    ///
    /// Relative references in the content resolve against the working directory.
    pub fn parse_from_data(&self, data: &[u8]) -> Result<DevfileObj> {
        let ctx = self.loader.load_bytes(data)?;
        self.parse_devfile(ctx, true)
    }

    /// Parse the devfile at `path` without following any reference.
    pub fn parse_raw(&self, path: impl AsRef<Path>) -> Result<DevfileObj> {
        let ctx = self.loader.load_path(&NormalizedPath::new(path))?;
        self.parse_devfile(ctx, false)
    }

    /// Decode an already loaded context and, if `flatten` is set, resolve
    /// its parent and plugins.
    ///
    /// A flattened result has no parent and no plugin components. Without
    /// flattening the document is returned exactly as written.
    pub fn parse_devfile(&self, ctx: DevfileCtx, flatten: bool) -> Result<DevfileObj> {
        let data = self.decode(&ctx)?;
        tracing::debug!(location = %ctx.location(), version = ctx.api_version(), flatten, "Decoded devfile");

        let data = if flatten {
            Resolver::new(self).flatten(data, ctx.location())?
        } else {
            data
        };
        Ok(DevfileObj { ctx, data })
    }

    /// Flatten a previously parsed (raw) devfile.
    pub fn flatten(&self, obj: DevfileObj) -> Result<DevfileObj> {
        let data = Resolver::new(self).flatten(obj.data, obj.ctx.location())?;
        Ok(DevfileObj { ctx: obj.ctx, data })
    }
}

/// Parse and flatten the devfile at `path` with a default [`Parser`].
pub fn parse(path: impl AsRef<Path>) -> Result<DevfileObj> {
    Parser::new().parse(path)
}

/// Parse and flatten the devfile served at `url` with a default [`Parser`].
pub fn parse_from_url(url: &str) -> Result<DevfileObj> {
    Parser::new().parse_from_url(url)
}

/// Parse and flatten in-memory devfile content with a default [`Parser`].
pub fn parse_from_data(data: &[u8]) -> Result<DevfileObj> {
    Parser::new().parse_from_data(data)
}

/// Parse the devfile at `path` without resolving references.
pub fn parse_raw_devfile(path: impl AsRef<Path>) -> Result<DevfileObj> {
    Parser::new().parse_raw(path)
}
