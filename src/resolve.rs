//! Environment resolution: explicit override reconciled with CIDR inference.
//!
//! An explicit override always wins when it names a supported environment.
//! Otherwise the host's IPv4 address is matched against the configured range
//! table; zero matches fall back to development, more than one is a fatal
//! configuration conflict.

use crate::error::ResolveError;
use crate::types::EnvironmentName;
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use tracing::debug;

pub mod host;

/// A CIDR block associated with one environment.
///
/// Multiple ranges may map to the same environment. Disjointness is not
/// enforced at declaration time; overlap is only detected when the host
/// address actually falls into more than one range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRange {
    pub cidr: Ipv4Net,
    pub environment: EnvironmentName,
}

impl NetworkRange {
    pub fn new(cidr: Ipv4Net, environment: EnvironmentName) -> Self {
        Self { cidr, environment }
    }
}

/// Range table declaration file:
///
/// ```toml
/// [[range]]
/// cidr = "10.117.0.0/16"
/// environment = "live"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeTable {
    #[serde(default, rename = "range")]
    pub ranges: Vec<NetworkRange>,
}

/// Resolve the active environment.
///
/// 1. A supported override value wins unconditionally.
/// 2. Otherwise the host address is matched against `ranges`.
/// 3. Exactly one match resolves to that range's environment; zero matches
///    fall back to [`EnvironmentName::Development`]; two or more abort with
///    [`ResolveError::AmbiguousEnvironment`] naming every matched range.
///
/// Deterministic for a given override, host address, and range table.
pub fn resolve(
    override_value: Option<&str>,
    ranges: &[NetworkRange],
    host: Ipv4Addr,
) -> Result<EnvironmentName, ResolveError> {
    if let Some(value) = override_value {
        if let Ok(env) = value.parse::<EnvironmentName>() {
            debug!("Environment set by explicit override: {}", env);
            return Ok(env);
        }
        debug!(
            "Override '{}' is not a supported environment, falling back to address matching",
            value
        );
    }

    let matches: Vec<NetworkRange> = ranges
        .iter()
        .filter(|r| r.cidr.contains(&host))
        .cloned()
        .collect();

    if matches.len() > 1 {
        return Err(ResolveError::AmbiguousEnvironment { host, matches });
    }

    match matches.first() {
        Some(only) => {
            debug!(
                "Host {} matched range {} -> {}",
                host, only.cidr, only.environment
            );
            Ok(only.environment)
        }
        None => {
            debug!(
                "Host {} matched no configured range, defaulting to development",
                host
            );
            Ok(EnvironmentName::Development)
        }
    }
}
