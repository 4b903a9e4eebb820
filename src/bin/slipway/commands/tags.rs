//! `slipway tags` command

use anyhow::Result;

use crate::cli::TagsArgs;
use slipway::core::environment::Environment;
use slipway::ops::tags::{update_tag_index, TagIndexOutcome};
use slipway::probe::ProbeReport;

use super::load_pipeline;

pub fn execute(_args: TagsArgs) -> Result<()> {
    let pipeline = load_pipeline()?;

    let report = ProbeReport::assume_all(pipeline.descriptor.dependencies());
    let env = Environment::create(&pipeline.descriptor, &pipeline.root, &report, None)?;

    match update_tag_index(&env)? {
        TagIndexOutcome::NoTaggableFiles => {
            eprintln!("    Skipping no taggable files");
        }
        TagIndexOutcome::Fresh => {
            eprintln!("    Skipping TAGS is up to date");
        }
        TagIndexOutcome::Regenerated { .. } => {}
    }

    Ok(())
}
