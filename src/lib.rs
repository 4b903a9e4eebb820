//! Slipway - A declarative build, install, and tag-index pipeline runner
//!
//! This crate provides the core library functionality for Slipway,
//! including descriptor parsing, dependency probing, action-graph
//! planning, and pipeline execution.

pub mod core;
pub mod error;
pub mod graph;
pub mod ops;
pub mod probe;
pub mod util;

pub use core::{
    dependency::Dependency, descriptor::PackageDescriptor, environment::Environment,
    environment::EnvironmentBuilder, patterns::CleanPatterns, patterns::IgnorePatterns,
};

pub use error::PipelineError;
pub use graph::ActionGraph;
pub use util::context::GlobalContext;
