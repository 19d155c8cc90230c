//! assetgen CLI Binary
//!
//! Runs one generator per invocation and exits non-zero on any error so the
//! enclosing build stops.

use anyhow::Context;
use assetgen::cli::{Cli, RunContext};
use assetgen::config::ConfigLoader;
use assetgen::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", assetgen::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            debug!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", assetgen::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = load_file_logging(cli).unwrap_or_else(|e| {
        // Reported properly once RunContext loads the same config.
        eprintln!("{:#}", e);
        LoggingConfig::default()
    });

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }
    if config.output == "file" && config.file.is_none() {
        config.file = Some(assetgen::logging::default_log_file(&cli.workspace));
    }

    config
}

fn load_file_logging(cli: &Cli) -> anyhow::Result<LoggingConfig> {
    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConfigLoader::load(&cli.workspace)
            .with_context(|| format!("failed to load config for {}", cli.workspace.display()))?,
    };
    Ok(config.logging)
}
