//! Declarative variable rules: required/default/type constraints per key.

use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Coercion target for a source-supplied value.
///
/// Closed set: a rule file declaring any other tag fails at parse time, so
/// an unrecognized type is a setup-time error rather than a lookup-time one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Boolean,
    Number,
    String,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Boolean => f.write_str("boolean"),
            ValueType::Number => f.write_str("number"),
            ValueType::String => f.write_str("string"),
        }
    }
}

/// Constraint attached to one configuration key.
///
/// All fields are optional in rule files:
///
/// ```toml
/// [PORT]
/// required = true
/// type = "number"
///
/// [DEBUG]
/// default = false
/// type = "boolean"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableRule {
    /// Fail the merge if the key has no source value and no default.
    #[serde(default)]
    pub required: bool,

    /// Fallback value, used as-is when the source has no entry for the key.
    #[serde(default)]
    pub default: Option<Value>,

    /// Coercion applied to source-supplied values. Defaults are never coerced.
    #[serde(default, rename = "type")]
    pub value_type: Option<ValueType>,
}

impl VariableRule {
    /// A rule with no constraints: optional, no default, pass-through string.
    pub fn passthrough() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn typed(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }
}

/// Rule set keyed by configuration variable name.
///
/// Ordered map so merge diagnostics come out in a stable order; the merge
/// result itself does not depend on iteration order.
pub type RuleSet = BTreeMap<String, VariableRule>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_builder() {
        let rule = VariableRule::passthrough()
            .required()
            .typed(ValueType::Number);
        assert!(rule.required);
        assert_eq!(rule.value_type, Some(ValueType::Number));
        assert!(rule.default.is_none());
    }

    #[test]
    fn test_rule_set_from_toml() {
        let rules: RuleSet = toml::from_str(
            r#"
            [PORT]
            required = true
            type = "number"

            [DEBUG]
            default = false
            type = "boolean"

            [GREETING]
            default = "hello"
            "#,
        )
        .unwrap();

        assert_eq!(rules.len(), 3);
        assert!(rules["PORT"].required);
        assert_eq!(rules["PORT"].value_type, Some(ValueType::Number));
        assert_eq!(rules["DEBUG"].default, Some(Value::Bool(false)));
        assert_eq!(
            rules["GREETING"].default,
            Some(Value::String("hello".to_string()))
        );
        assert!(rules["GREETING"].value_type.is_none());
    }

    #[test]
    fn test_unrecognized_type_tag_fails_at_parse_time() {
        let result: Result<RuleSet, _> = toml::from_str(
            r#"
            [PORT]
            type = "float"
            "#,
        );
        assert!(result.is_err());
    }
}
