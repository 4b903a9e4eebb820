//! `slipway info` command

use anyhow::Result;

use crate::cli::InfoArgs;
use slipway::core::environment::Environment;
use slipway::probe::ProbeReport;

use super::load_pipeline;

pub fn execute(_args: InfoArgs) -> Result<()> {
    let pipeline = load_pipeline()?;

    let report = ProbeReport::assume_all(pipeline.descriptor.dependencies());
    let env = Environment::create(&pipeline.descriptor, &pipeline.root, &report, None)?;

    println!("{} {}", env.name(), env.version());
    if !env.help().is_empty() {
        println!("{}", env.help());
    }

    if !pipeline.descriptor.dependencies().is_empty() {
        println!("\ndependencies:");
        for dep in pipeline.descriptor.dependencies() {
            let required = if dep.is_required() { "" } else { " (optional)" };
            println!("  {}{}", dep, required);
        }
    }

    if !env.libs().is_empty() {
        let libs: Vec<String> = env.libs().iter().map(|l| l.to_string()).collect();
        println!("\nlibs: {}", libs.join(" "));
    }

    if !env.subdirs().is_empty() {
        println!("\nsubdirectories:");
        for subdir in env.subdirs() {
            println!("  {}", subdir.display());
        }
    }

    println!("\ninstall entries: {}", env.install_manifest().len());
    println!("clean patterns:  {}", env.clean_patterns().raw().join(" "));
    println!("ignore patterns: {}", env.ignore_patterns().raw().join(" "));

    Ok(())
}
