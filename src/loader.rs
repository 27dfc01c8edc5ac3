//! Loader facade: resolve environment, derive flags, merge settings.
//!
//! Thin composition over [`resolve`](crate::resolve), [`FlagSet`] and
//! [`merge`](crate::merge). Built once at process startup; the returned
//! [`Settings`] is the only object handed to the rest of the application.

use crate::error::SetupError;
use crate::flags::FlagSet;
use crate::merge::{self, Settings};
use crate::resolve::{self, host, NetworkRange, RangeTable};
use crate::rules::RuleSet;
use crate::types::ENVIRONMENT_KEY;
use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::path::Path;
use tracing::info;

/// Settings loader facade.
pub struct Loader;

impl Loader {
    /// Load settings from the process environment.
    ///
    /// The `ENVIRONMENT` variable, when present, acts as the explicit
    /// override; the host address is detected via [`host::detect_ipv4`].
    pub fn load(rules: &RuleSet, ranges: &[NetworkRange]) -> Result<Settings, SetupError> {
        let source: BTreeMap<String, String> = std::env::vars().collect();
        Self::load_with(rules, ranges, &source, host::detect_ipv4())
    }

    /// Load settings from an injected source map and host address.
    ///
    /// The source is read-only; nothing here mutates the process
    /// environment. This is the seam tests use to supply fixtures.
    pub fn load_with(
        rules: &RuleSet,
        ranges: &[NetworkRange],
        source: &BTreeMap<String, String>,
        host: Ipv4Addr,
    ) -> Result<Settings, SetupError> {
        let override_value = source.get(ENVIRONMENT_KEY).map(String::as_str);
        let env = resolve::resolve(override_value, ranges, host)?;
        let flags = FlagSet::build(env);
        let settings = merge::merge(env, &flags, source, rules)?;
        info!(
            "Settings assembled: environment={}, {} entries",
            env,
            settings.len()
        );
        Ok(settings)
    }
}

/// Read a rule set from a TOML declaration file.
pub fn rules_from_file(path: &Path) -> Result<RuleSet, SetupError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Read a range table from a TOML declaration file.
pub fn ranges_from_file(path: &Path) -> Result<Vec<NetworkRange>, SetupError> {
    let content = std::fs::read_to_string(path)?;
    let table: RangeTable = toml::from_str(&content)?;
    Ok(table.ranges)
}
