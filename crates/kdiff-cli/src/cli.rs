use std::path::PathBuf;

use clap::Parser;

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "k8s-diff",
    about = "Semantic diff of Kubernetes manifests",
    version
)]
pub struct Cli {
    /// Old manifest
    pub file1: PathBuf,
    /// New manifest
    pub file2: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Output format, overriding the configuration file
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log debug events to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Exit with status 1 when the manifests differ
    #[arg(long)]
    pub exit_code: bool,
}
