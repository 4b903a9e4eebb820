//! Core data model: descriptors, dependencies, patterns, and the
//! build environment.

pub mod dependency;
pub mod descriptor;
pub mod environment;
pub mod patterns;

pub use dependency::{Dependency, LinkLib};
pub use descriptor::{InstallEntry, PackageDescriptor, SubdirDescriptor};
pub use environment::{Environment, EnvironmentBuilder};
pub use patterns::{CleanPatterns, IgnorePatterns, PatternSet};
