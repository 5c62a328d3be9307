//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// pod-xcconfig - Aggregate build settings for pod-based native projects
#[derive(Parser)]
#[command(name = "pod-xcconfig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate xcconfig files for every aggregate target
    Generate(GenerateArgs),

    /// Print the generated settings of one target
    Show(ShowArgs),

    /// Verify that xcconfig files on disk are up to date
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Facts manifest (defaults to the nearest Pods.facts.toml)
    pub facts: Option<PathBuf>,

    /// Output directory (defaults to `Target Support Files` next to the manifest)
    #[arg(long, env = "POD_XCCONFIG_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Only generate this aggregate target
    #[arg(long)]
    pub target: Option<String>,

    /// Generate without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Facts manifest (defaults to the nearest Pods.facts.toml)
    pub facts: Option<PathBuf>,

    /// Aggregate target to show
    #[arg(long)]
    pub target: String,

    /// Build configuration (defaults to the target's first)
    #[arg(long, short = 'c')]
    pub configuration: Option<String>,

    /// Print the settings as a JSON object
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Facts manifest (defaults to the nearest Pods.facts.toml)
    pub facts: Option<PathBuf>,

    /// Output directory to check
    #[arg(long, env = "POD_XCCONFIG_OUT_DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
