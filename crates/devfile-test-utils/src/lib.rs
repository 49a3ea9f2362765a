//! Shared test utilities for the devfile-resolver workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`loader`]: [`MemoryLoader`], an in-memory [`devfile_context::ContextLoader`]
//! - [`tree`]: [`TestDevfileTree`], devfiles written to a temporary directory
//! - [`devfiles`]: small devfile documents built from component names

pub mod devfiles;
pub mod loader;
pub mod tree;

pub use loader::MemoryLoader;
pub use tree::TestDevfileTree;
