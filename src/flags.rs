//! Environment membership flags derived from the resolved environment.

use crate::types::{EnvironmentName, PRODUCTION_FLAG};
use std::collections::BTreeMap;

/// One boolean per supported environment (`IN_LIVE`, `IN_STAGING`, ...) plus
/// the derived `IN_PRODUCTION` (live or staging). Exactly one membership
/// flag is true. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet {
    entries: BTreeMap<String, bool>,
}

impl FlagSet {
    /// Derive the flag set for `env`. Pure; no failure modes.
    pub fn build(env: EnvironmentName) -> Self {
        let mut entries = BTreeMap::new();
        for candidate in EnvironmentName::ALL {
            entries.insert(candidate.flag_key(), candidate == env);
        }
        entries.insert(PRODUCTION_FLAG.to_string(), env.is_production());
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries.get(key).copied()
    }

    pub fn is_production(&self) -> bool {
        self.get(PRODUCTION_FLAG).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
