//! Command implementations.

pub mod build;
pub mod clean;
pub mod completions;
pub mod info;
pub mod install;
pub mod plan;
pub mod tags;

use std::path::PathBuf;

use anyhow::Result;

use slipway::core::descriptor::PackageDescriptor;
use slipway::util::config::{load_config, Config};
use slipway::util::GlobalContext;

/// Everything a command needs: the descriptor, its root, and config.
pub struct Pipeline {
    pub descriptor: PackageDescriptor,
    pub root: PathBuf,
    pub config: Config,
}

/// Locate and load the package descriptor and merged configuration.
pub fn load_pipeline() -> Result<Pipeline> {
    let ctx = GlobalContext::new()?;
    let descriptor_path = ctx.find_descriptor()?;
    let root = descriptor_path
        .parent()
        .expect("descriptor path has a parent")
        .to_path_buf();

    let descriptor = PackageDescriptor::load(&descriptor_path)?;

    let global = ctx.global_config_path().unwrap_or_default();
    let project = ctx.project_config_path()?;
    let config = load_config(&global, &project);

    Ok(Pipeline {
        descriptor,
        root,
        config,
    })
}
