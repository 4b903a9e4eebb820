//! Subdirectory build execution with progress reporting.
//!
//! Each declared subdirectory carries a nested descriptor whose steps
//! are delegated to the host's tools. Subdirectories run in declared
//! order; the first failure is fatal unless `--keep-going` is set.

use std::time::Instant;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::descriptor::SubdirDescriptor;
use crate::core::environment::Environment;
use crate::error::PipelineError;
use crate::util::context::DESCRIPTOR_FILE;
use crate::util::process::ProcessBuilder;

/// Options for the build operation.
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Continue with remaining subdirectories after a failure
    pub keep_going: bool,

    /// Parallelism hint forwarded to build steps as `SLIPWAY_JOBS`
    pub jobs: Option<usize>,

    /// Print each step as it runs
    pub verbose: bool,
}

/// Build every declared subdirectory in order.
pub fn build(env: &Environment, opts: &BuildOptions) -> Result<()> {
    let start = Instant::now();
    let subdirs = env.subdirs();

    if subdirs.is_empty() {
        eprintln!("    Finished nothing to build");
        return Ok(());
    }

    let pb = if !opts.verbose && subdirs.len() > 1 {
        let pb = ProgressBar::new(subdirs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut failures: Vec<PipelineError> = Vec::new();

    for subdir in subdirs {
        if let Some(ref pb) = pb {
            pb.set_message(subdir.display().to_string());
        }

        match build_subdir(env, subdir, opts) {
            Ok(()) => {}
            Err(e) if opts.keep_going => {
                tracing::warn!("continuing past failure in `{}`", subdir.display());
                failures.push(e);
            }
            Err(e) => {
                if let Some(pb) = pb {
                    pb.abandon();
                }
                return Err(e.into());
            }
        }

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    if let Some(first) = failures.into_iter().next() {
        return Err(first.into());
    }

    let elapsed = start.elapsed();
    eprintln!(
        "    Finished {} subdirectory(ies) in {:.2}s",
        subdirs.len(),
        elapsed.as_secs_f64()
    );

    Ok(())
}

/// Build one subdirectory by running its nested descriptor's steps.
fn build_subdir(
    env: &Environment,
    subdir: &std::path::Path,
    opts: &BuildOptions,
) -> Result<(), PipelineError> {
    let dir = env.root().join(subdir);
    let descriptor_path = dir.join(DESCRIPTOR_FILE);

    if !descriptor_path.is_file() {
        return Err(PipelineError::MissingDescriptor {
            subdir: subdir.to_path_buf(),
        });
    }

    let nested =
        SubdirDescriptor::load(&descriptor_path).map_err(|e| PipelineError::CompileFailure {
            subdir: subdir.to_path_buf(),
            message: format!("{:#}", e),
        })?;

    for step in nested.steps() {
        if opts.verbose {
            eprintln!("     Running [{}] {}", subdir.display(), step);
        }
        tracing::debug!("step in `{}`: {}", subdir.display(), step);

        let mut process = ProcessBuilder::from_step(step)
            .map_err(|e| PipelineError::CompileFailure {
                subdir: subdir.to_path_buf(),
                message: format!("{:#}", e),
            })?
            .cwd(&dir);

        if let Some(jobs) = opts.jobs {
            process = process.env("SLIPWAY_JOBS", jobs.to_string());
        }

        process
            .exec_and_check()
            .map_err(|e| PipelineError::CompileFailure {
                subdir: subdir.to_path_buf(),
                message: format!("{:#}", e),
            })?;
    }

    Ok(())
}
