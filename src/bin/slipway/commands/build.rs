//! `slipway build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use slipway::core::environment::Environment;
use slipway::ops::build::{build, BuildOptions};
use slipway::probe;

use super::load_pipeline;

pub fn execute(args: BuildArgs, verbose: bool) -> Result<()> {
    let pipeline = load_pipeline()?;

    // Probe before anything is compiled; a missing required dependency
    // aborts the whole run here.
    let report = probe::probe_with_defaults(
        pipeline.descriptor.dependencies(),
        &pipeline.config.probe.include_dirs,
    )?;

    let env = Environment::create(&pipeline.descriptor, &pipeline.root, &report, None)?;

    let opts = BuildOptions {
        keep_going: args.keep_going,
        jobs: args.jobs,
        verbose,
    };

    build(&env, &opts)
}
