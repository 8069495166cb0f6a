use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod analyze_cmd;
mod cli;
mod stats_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(args) => analyze_cmd::run_analyze(args),
        Command::Stats(args) => stats_cmd::run_stats(args),
    }
}
