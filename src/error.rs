//! Error types for environment resolution and configuration merging.

use crate::resolve::NetworkRange;
use crate::rules::ValueType;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Environment resolution errors
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Host address {host} matches multiple network ranges: {}", format_ranges(.matches))]
    AmbiguousEnvironment {
        host: Ipv4Addr,
        matches: Vec<NetworkRange>,
    },
}

fn format_ranges(matches: &[NetworkRange]) -> String {
    matches
        .iter()
        .map(|r| format!("{} ({})", r.environment, r.cidr))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Configuration merge errors
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Required variable not set and no default provided: {key}")]
    MissingRequiredVariable { key: String },

    #[error("Variable {key} cannot be coerced to {expected}: '{value}'")]
    InvalidVariableType {
        key: String,
        expected: ValueType,
        value: String,
    },
}

/// Facade-level errors for settings assembly
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Environment resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Configuration merge failed: {0}")]
    Merge(#[from] MergeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging error: {0}")]
    Logging(String),
}
