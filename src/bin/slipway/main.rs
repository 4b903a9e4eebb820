//! Slipway CLI - a declarative build/install/tag pipeline runner

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use slipway::error::PipelineError;
use slipway::util::diagnostic;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<PipelineError>() {
            Some(pipeline_err) => diagnostic::emit(&pipeline_err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("slipway=debug")
    } else {
        EnvFilter::new("slipway=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // `slipway` with no subcommand runs the default build target.
    match cli.command.unwrap_or_default() {
        Commands::Build(args) => commands::build::execute(args, cli.verbose),
        Commands::Install(args) => commands::install::execute(args),
        Commands::Clean(args) => commands::clean::execute(args),
        Commands::Tags(args) => commands::tags::execute(args),
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
