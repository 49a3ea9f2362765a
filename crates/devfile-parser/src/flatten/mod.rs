//! Flattening: inlining parent and plugin content into a devfile
//!
//! A devfile may inherit from one parent and pull in any number of plugin
//! components, each a reference to another devfile. Flattening resolves
//! those references recursively and produces a self-contained document.
//!
//! # Layers
//!
//! For each document, in order:
//!
//! 1. **Parent** - the flattened parent content, with the parent's overrides applied
//! 2. **Plugins** - each plugin's flattened content, with its overrides applied
//! 3. **Local** - the document's own components (minus plugins), commands and projects
//!
//! Layers are then merged; see [`merge_content`].

mod merge;
mod overrides;
mod resolver;

pub use merge::merge_content;
pub use overrides::apply_overrides;
pub(crate) use resolver::Resolver;
