//! CLI parse: clap types for assetgen. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// assetgen - incremental asset copy and dump generators
#[derive(Parser)]
#[command(name = "assetgen")]
#[command(about = "Incremental asset copy and byte-array dump generators for C/C++ builds")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (holds assetgen.toml; base for relative deploy dirs)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Descriptor, tracked header and build overrides shared by every command.
#[derive(Args, Clone, Debug)]
pub struct TargetArgs {
    /// Descriptor (YAML) to process
    pub descriptor: PathBuf,

    /// Generated header the build system tracks
    #[arg(long)]
    pub header: PathBuf,

    /// Deploy directory (overrides config)
    #[arg(long)]
    pub deploy_dir: Option<PathBuf>,

    /// Target platform (overrides config)
    #[arg(long)]
    pub target: Option<String>,

    /// Dirty policy: mtime or content (overrides config)
    #[arg(long)]
    pub dirty_policy: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stage the files a descriptor lists into the deploy directory
    Copy {
        #[command(flatten)]
        target: TargetArgs,
        /// Regenerate even if outputs are up to date
        #[arg(long)]
        force: bool,
    },
    /// Embed the files a descriptor lists as C byte arrays
    Dump {
        #[command(flatten)]
        target: TargetArgs,
        /// Regenerate even if outputs are up to date
        #[arg(long)]
        force: bool,
    },
    /// Report whether a generator would run, without writing anything
    Check {
        /// Generator to check (copy or dump)
        generator: String,
        #[command(flatten)]
        target: TargetArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
