//! `slipway install` command

use anyhow::{bail, Result};

use crate::cli::InstallArgs;
use slipway::core::environment::Environment;
use slipway::ops::install::install;
use slipway::probe::ProbeReport;

use super::load_pipeline;

pub fn execute(args: InstallArgs) -> Result<()> {
    let pipeline = load_pipeline()?;

    let prefix = match pipeline.config.resolve_prefix(args.prefix.as_deref()) {
        Some(prefix) => prefix,
        None => bail!(
            "no install prefix configured; pass --prefix, set SLIPWAY_PREFIX, \
             or set install.prefix in .slipway/config.toml"
        ),
    };

    // Install copies existing artifacts; the host is not probed again.
    let report = ProbeReport::assume_all(pipeline.descriptor.dependencies());
    let env = Environment::create(
        &pipeline.descriptor,
        &pipeline.root,
        &report,
        Some(prefix.clone()),
    )?;

    if env.install_manifest().is_empty() {
        eprintln!("   Installed nothing (empty install manifest)");
        return Ok(());
    }

    install(&env, &prefix)?;
    Ok(())
}
