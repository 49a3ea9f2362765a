//! Devfile acquisition for the devfile resolver
//!
//! Locates devfiles on disk or over HTTP, reads their raw content and
//! extracts the schema version the rest of the pipeline dispatches on.

pub mod constants;
pub mod context;
pub mod error;
pub mod loader;
pub mod location;
pub mod path;

pub use constants::DevfileName;
pub use context::DevfileCtx;
pub use error::{Error, Result};
pub use loader::{ContextLoader, DevfileLoader, LoaderConfig};
pub use location::Location;
pub use path::NormalizedPath;
