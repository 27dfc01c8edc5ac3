//! Core types for environment resolution and configuration merging.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reserved key under which the active environment name is stored in the
/// merged settings. Also the variable read as the explicit override.
pub const ENVIRONMENT_KEY: &str = "ENVIRONMENT";

/// Derived flag set true when the environment is live or staging.
pub const PRODUCTION_FLAG: &str = "IN_PRODUCTION";

/// Named deployment context. Exactly one is active per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentName {
    Live,
    Staging,
    Testing,
    Development,
}

impl EnvironmentName {
    /// All supported environments, in flag-derivation order.
    pub const ALL: [EnvironmentName; 4] = [
        EnvironmentName::Live,
        EnvironmentName::Staging,
        EnvironmentName::Testing,
        EnvironmentName::Development,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentName::Live => "live",
            EnvironmentName::Staging => "staging",
            EnvironmentName::Testing => "testing",
            EnvironmentName::Development => "development",
        }
    }

    /// Membership flag key for this environment (`IN_LIVE`, `IN_STAGING`, ...).
    pub fn flag_key(&self) -> String {
        format!("IN_{}", self.as_str().to_uppercase())
    }

    pub fn is_production(&self) -> bool {
        matches!(self, EnvironmentName::Live | EnvironmentName::Staging)
    }
}

impl FromStr for EnvironmentName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(EnvironmentName::Live),
            "staging" => Ok(EnvironmentName::Staging),
            "testing" => Ok(EnvironmentName::Testing),
            "development" => Ok(EnvironmentName::Development),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved configuration value.
///
/// Untagged on the serde side so rule defaults can be written naturally in
/// TOML (`default = 3000`, `default = false`, `default = "x"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(i64),
    String(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
