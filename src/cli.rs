//! CLI definitions and command execution for the envmerge binary.

use crate::error::SetupError;
use crate::loader::{ranges_from_file, rules_from_file, Loader};
use crate::merge::Settings;
use crate::resolve::{self, host};
use crate::rules::RuleSet;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Envmerge CLI - Environment resolution and typed configuration assembly
#[derive(Parser)]
#[command(name = "envmerge")]
#[command(about = "Resolve the deployment environment and assemble typed configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and print the active environment
    Resolve {
        /// Explicit environment override (live, staging, testing, development)
        #[arg(long)]
        environment: Option<String>,

        /// Range table file (TOML)
        #[arg(long)]
        ranges: Option<PathBuf>,
    },
    /// Assemble and print the merged settings
    Show {
        /// Rule set file (TOML)
        #[arg(long)]
        rules: PathBuf,

        /// Range table file (TOML)
        #[arg(long)]
        ranges: Option<PathBuf>,

        /// Explicit environment override
        #[arg(long)]
        environment: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Execute a parsed command, returning the output to print on stdout.
pub fn execute(command: &Commands) -> Result<String, SetupError> {
    match command {
        Commands::Resolve {
            environment,
            ranges,
        } => {
            let table = match ranges {
                Some(path) => ranges_from_file(path)?,
                None => Vec::new(),
            };
            let env = resolve::resolve(environment.as_deref(), &table, host::detect_ipv4())?;
            Ok(env.to_string())
        }
        Commands::Show {
            rules,
            ranges,
            environment,
            format,
        } => {
            let rule_set: RuleSet = rules_from_file(rules)?;
            let table = match ranges {
                Some(path) => ranges_from_file(path)?,
                None => Vec::new(),
            };
            let mut source: std::collections::BTreeMap<String, String> =
                std::env::vars().collect();
            if let Some(env) = environment {
                source.insert(crate::types::ENVIRONMENT_KEY.to_string(), env.clone());
            }
            let settings =
                Loader::load_with(&rule_set, &table, &source, host::detect_ipv4())?;
            render(&settings, format)
        }
    }
}

fn render(settings: &Settings, format: &str) -> Result<String, SetupError> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(settings)?),
        _ => {
            let mut out = String::new();
            for (key, value) in settings.iter() {
                out.push_str(&format!("{} = {}\n", key, value));
            }
            Ok(out)
        }
    }
}
