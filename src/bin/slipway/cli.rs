//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Slipway - a declarative build, install, and tag-index pipeline runner
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe dependencies and build the declared subdirectories (default)
    Build(BuildArgs),

    /// Copy built artifacts into the install prefix
    Install(InstallArgs),

    /// Remove generated files matching the clean patterns
    Clean(CleanArgs),

    /// Regenerate the TAGS cross-reference index
    Tags(TagsArgs),

    /// Show the pipeline's action graph
    Plan(PlanArgs),

    /// Describe the package and its declared pipeline
    Info(InfoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Build(BuildArgs::default())
    }
}

#[derive(Args, Default)]
pub struct BuildArgs {
    /// Continue with remaining subdirectories after a failure
    #[arg(short, long)]
    pub keep_going: bool,

    /// Parallelism hint forwarded to build steps
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct InstallArgs {
    /// Install prefix (overrides SLIPWAY_PREFIX and config)
    #[arg(long)]
    pub prefix: Option<PathBuf>,
}

#[derive(Args)]
pub struct CleanArgs {
    /// List what would be removed without deleting anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct TagsArgs {}

#[derive(Args)]
pub struct PlanArgs {
    /// Emit the plan as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct InfoArgs {}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
