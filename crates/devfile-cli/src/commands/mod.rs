//! Command implementations for devfile-cli

pub mod list;
pub mod parse;
pub mod sync_folder;

pub use list::run_list;
pub use parse::run_parse;
pub use sync_folder::run_sync_folder;
