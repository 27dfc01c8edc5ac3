//! Configuration merge: rule-driven whitelist, validation, coercion.
//!
//! Produces the single frozen settings mapping handed to the rest of the
//! application. Only rule-declared keys appear, plus the flag entries and
//! the active environment under its reserved key.

use crate::error::MergeError;
use crate::flags::FlagSet;
use crate::rules::{RuleSet, ValueType};
use crate::types::{EnvironmentName, Value, ENVIRONMENT_KEY};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Frozen configuration mapping. No public mutators; constructed only by
/// [`merge`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Settings {
    entries: BTreeMap<String, Value>,
}

impl Settings {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// The active environment recorded under the reserved key.
    pub fn environment(&self) -> Option<EnvironmentName> {
        self.get_str(ENVIRONMENT_KEY).and_then(|s| s.parse().ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merge the variable source against the rule set.
///
/// Each rule key is processed independently: source value first, then
/// default substitution, then the `required` check, then coercion of
/// source-supplied values to the declared type. Flags and the environment
/// key are unioned last and win on collision. Any failure aborts the merge;
/// no partial mapping is produced.
pub fn merge(
    env: EnvironmentName,
    flags: &FlagSet,
    source: &BTreeMap<String, String>,
    rules: &RuleSet,
) -> Result<Settings, MergeError> {
    let mut entries = BTreeMap::new();

    for (key, rule) in rules {
        let value = match source.get(key) {
            Some(raw) => match rule.value_type {
                Some(value_type) => coerce(key, raw, value_type)?,
                None => Value::String(raw.clone()),
            },
            None => match &rule.default {
                // Defaults carry their final type; no coercion applied.
                Some(default) => default.clone(),
                None if rule.required => {
                    return Err(MergeError::MissingRequiredVariable { key: key.clone() });
                }
                None => {
                    debug!("Optional variable {} has no value, omitting", key);
                    continue;
                }
            },
        };
        entries.insert(key.clone(), value);
    }

    for (key, value) in flags.iter() {
        if entries.insert(key.to_string(), Value::Bool(value)).is_some() {
            warn!("Rule-produced key {} overwritten by derived flag", key);
        }
    }
    if entries
        .insert(ENVIRONMENT_KEY.to_string(), Value::String(env.to_string()))
        .is_some()
    {
        warn!(
            "Rule-produced key {} overwritten by resolved environment",
            ENVIRONMENT_KEY
        );
    }

    debug!("Merged {} configuration entries for {}", entries.len(), env);
    Ok(Settings { entries })
}

fn coerce(key: &str, raw: &str, value_type: ValueType) -> Result<Value, MergeError> {
    match value_type {
        ValueType::Boolean => coerce_bool(key, raw),
        ValueType::Number => parse_int_prefix(raw).map(Value::Number).ok_or_else(|| {
            MergeError::InvalidVariableType {
                key: key.to_string(),
                expected: ValueType::Number,
                value: raw.to_string(),
            }
        }),
        // Source values are already strings; this arm exists to keep the
        // declared type honest rather than to transform anything.
        ValueType::String => Ok(Value::String(raw.to_string())),
    }
}

fn coerce_bool(key: &str, raw: &str) -> Result<Value, MergeError> {
    match raw.to_lowercase().as_str() {
        "yes" | "true" | "y" | "t" => Ok(Value::Bool(true)),
        "false" | "no" | "f" | "n" => Ok(Value::Bool(false)),
        lowered => match lowered.parse::<i64>() {
            Ok(n) => Ok(Value::Bool(n != 0)),
            Err(_) => Err(MergeError::InvalidVariableType {
                key: key.to_string(),
                expected: ValueType::Boolean,
                value: raw.to_string(),
            }),
        },
    }
}

/// Leading-numeric-prefix integer parse: `"42abc"` -> 42, `"-7"` -> -7.
/// Returns None when no digits lead the value.
fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (sign, digits_start) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1i64, 1),
        Some(b'+') => (1, 1),
        _ => (1, 0),
    };
    let digits: String = trimmed[digits_start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok().map(|n| sign * n)
}
