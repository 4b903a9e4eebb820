//! `slipway clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use slipway::core::environment::Environment;
use slipway::ops::clean::{clean, collect_cleanable};
use slipway::probe::ProbeReport;
use slipway::util::fs::relative_path;

use super::load_pipeline;

pub fn execute(args: CleanArgs) -> Result<()> {
    let pipeline = load_pipeline()?;

    let report = ProbeReport::assume_all(pipeline.descriptor.dependencies());
    let env = Environment::create(&pipeline.descriptor, &pipeline.root, &report, None)?;

    if args.dry_run {
        let matched = collect_cleanable(&env)?;
        for path in &matched {
            println!("{}", relative_path(env.root(), path).display());
        }
        eprintln!("     Removed {} file(s) (dry run)", matched.len());
        return Ok(());
    }

    clean(&env)?;
    Ok(())
}
