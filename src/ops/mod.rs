//! Pipeline operations: build, install, clean, and tag indexing.

pub mod build;
pub mod clean;
pub mod install;
pub mod tags;

pub use build::{build, BuildOptions};
pub use clean::clean;
pub use install::install;
pub use tags::{update_tag_index, TagIndexOutcome};
