use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "opn-audit")]
#[command(about = "Analyze firewall configuration documents and report findings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Analyze one configuration document and emit a report.
    Analyze(AnalyzeArgs),
    /// Compute statistics for one configuration document.
    Stats(StatsArgs),
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Configuration document (JSON) to analyze.
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Optional analysis settings TOML file.
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Enable statistics and every analyzer.
    #[arg(long)]
    pub all: bool,
    /// Enable dead/duplicate rule detection.
    #[arg(long)]
    pub dead_rules: bool,
    /// Enable security analysis.
    #[arg(long)]
    pub security: bool,
    /// Enable performance analysis.
    #[arg(long)]
    pub performance: bool,
    /// Enable consistency/compliance checks.
    #[arg(long)]
    pub compliance: bool,
    /// Skip statistics calculation.
    #[arg(long)]
    pub no_stats: bool,
    /// Exit nonzero when critical findings are present.
    #[arg(long)]
    pub strict: bool,
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Configuration document (JSON) to summarize.
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
    Markdown,
}
