//! pod-xcconfig CLI - Aggregate build settings for pod-based native projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("pod_xcconfig=debug")
    } else {
        EnvFilter::new("pod_xcconfig=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Show(args) => commands::show::execute(args),
        Commands::Check(args) => commands::check::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
