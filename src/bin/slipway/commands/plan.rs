//! `slipway plan` command

use anyhow::Result;

use crate::cli::PlanArgs;
use slipway::core::environment::Environment;
use slipway::graph::{Action, ActionGraph};
use slipway::ops::tags::collect_taggable;
use slipway::probe::ProbeReport;

use super::load_pipeline;

pub fn execute(args: PlanArgs) -> Result<()> {
    let pipeline = load_pipeline()?;

    // Planning describes the pipeline; the host is not probed.
    let report = ProbeReport::assume_all(pipeline.descriptor.dependencies());
    let env = Environment::create(&pipeline.descriptor, &pipeline.root, &report, None)?;

    let has_taggable = !collect_taggable(&env).is_empty();
    let graph = ActionGraph::from_environment(&env, has_taggable);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&graph.to_json())?);
        return Ok(());
    }

    for (i, action) in graph.execution_order().iter().enumerate() {
        match action {
            Action::BuildSubdir { subdir } => {
                println!("{:>3}. build {}", i + 1, subdir.display())
            }
            Action::Install => println!("{:>3}. install", i + 1),
            Action::TagIndex => println!("{:>3}. tag-index", i + 1),
        }
    }

    Ok(())
}
