//! Devfile parsing and flattening
//!
//! Turns a devfile (from disk, a URL or memory) into the typed
//! [`devfile_api::Devfile`] model and, on request, flattens it: the parent
//! and every plugin are fetched, flattened in turn, patched with the
//! referencing document's overrides and merged into one self-contained
//! document.
//!
//! # Example
//!
//! ```ignore
//! use devfile_parser::parse;
//!
//! let obj = parse("./devfile.yaml")?;
//! assert!(obj.data.parent.is_none());
//! ```

pub mod decoder;
pub mod error;
pub mod flatten;
pub mod parser;

pub use decoder::{DocumentDecoder, YamlDecoder};
pub use error::{Error, ReferenceContext, Result};
pub use flatten::{apply_overrides, merge_content};
pub use parser::{
    DevfileObj, Parser, ParserOptions, parse, parse_from_data, parse_from_url, parse_raw_devfile,
};
