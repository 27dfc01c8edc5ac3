//! Envmerge CLI Binary
//!
//! Command-line interface for environment resolution and configuration
//! assembly. Fails fast and loudly: any resolution or merge defect exits
//! non-zero before anything else runs.

use anyhow::Context;
use clap::Parser;
use envmerge::cli::{execute, Cli};
use envmerge::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Envmerge CLI starting");

    match execute(&cli.command).context("configuration assembly failed") {
        Ok(output) => {
            info!("Command completed successfully");
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI arguments
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    // If --verbose is not set, disable logging
    if !cli.verbose {
        let mut config = LoggingConfig::default();
        config.level = "off".to_string();
        return config;
    }

    let mut config = LoggingConfig::default();
    config.level = cli.log_level.clone().unwrap_or_else(|| "debug".to_string());
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    config
}
