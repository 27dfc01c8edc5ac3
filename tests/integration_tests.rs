//! End-to-end settings assembly scenarios.

use envmerge::loader::{ranges_from_file, rules_from_file, Loader};
use envmerge::rules::{RuleSet, ValueType, VariableRule};
use envmerge::types::{EnvironmentName, Value};
use envmerge::{NetworkRange, SetupError};
use std::collections::BTreeMap;
use std::io::Write;
use std::net::Ipv4Addr;

fn source(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn live_staging_ranges() -> Vec<NetworkRange> {
    vec![
        NetworkRange::new("10.117.0.0/16".parse().unwrap(), EnvironmentName::Live),
        NetworkRange::new("10.118.0.0/16".parse().unwrap(), EnvironmentName::Staging),
    ]
}

#[test]
fn full_assembly_from_host_address() {
    let mut rules = RuleSet::new();
    rules.insert(
        "PORT".to_string(),
        VariableRule::passthrough().required().typed(ValueType::Number),
    );
    rules.insert(
        "DEBUG".to_string(),
        VariableRule::passthrough()
            .with_default(false)
            .typed(ValueType::Boolean),
    );
    rules.insert("APP_NAME".to_string(), VariableRule::passthrough());

    let settings = Loader::load_with(
        &rules,
        &live_staging_ranges(),
        &source(&[("PORT", "3000"), ("APP_NAME", "api")]),
        "10.117.3.4".parse().unwrap(),
    )
    .unwrap();

    assert_eq!(settings.environment(), Some(EnvironmentName::Live));
    assert_eq!(settings.get_i64("PORT"), Some(3000));
    assert_eq!(settings.get_bool("DEBUG"), Some(false));
    assert_eq!(settings.get_str("APP_NAME"), Some("api"));
    assert_eq!(settings.get_bool("IN_LIVE"), Some(true));
    assert_eq!(settings.get_bool("IN_STAGING"), Some(false));
    assert_eq!(settings.get_bool("IN_PRODUCTION"), Some(true));
}

#[test]
fn override_beats_host_address() {
    let settings = Loader::load_with(
        &RuleSet::new(),
        &live_staging_ranges(),
        &source(&[("ENVIRONMENT", "testing")]),
        "10.117.3.4".parse().unwrap(),
    )
    .unwrap();
    assert_eq!(settings.environment(), Some(EnvironmentName::Testing));
    assert_eq!(settings.get_bool("IN_PRODUCTION"), Some(false));
}

#[test]
fn unknown_host_defaults_to_development() {
    let settings = Loader::load_with(
        &RuleSet::new(),
        &live_staging_ranges(),
        &source(&[]),
        "192.168.0.10".parse().unwrap(),
    )
    .unwrap();
    assert_eq!(settings.environment(), Some(EnvironmentName::Development));
}

#[test]
fn ambiguous_host_aborts_assembly() {
    let ranges = vec![
        NetworkRange::new("10.0.0.0/8".parse().unwrap(), EnvironmentName::Live),
        NetworkRange::new("10.117.0.0/16".parse().unwrap(), EnvironmentName::Staging),
    ];
    let err = Loader::load_with(
        &RuleSet::new(),
        &ranges,
        &source(&[]),
        "10.117.3.4".parse().unwrap(),
    )
    .unwrap_err();
    match err {
        SetupError::Resolve(inner) => {
            let msg = inner.to_string();
            assert!(msg.contains("10.117.3.4"));
            assert!(msg.contains("live (10.0.0.0/8)"));
            assert!(msg.contains("staging (10.117.0.0/16)"));
        }
        other => panic!("expected resolve error, got {:?}", other),
    }
}

#[test]
fn merge_failure_produces_no_settings() {
    let mut rules = RuleSet::new();
    rules.insert(
        "DATABASE_URL".to_string(),
        VariableRule::passthrough().required(),
    );
    let err = Loader::load_with(
        &rules,
        &[],
        &source(&[("ENVIRONMENT", "live")]),
        Ipv4Addr::UNSPECIFIED,
    )
    .unwrap_err();
    assert!(err.to_string().contains("DATABASE_URL"));
}

#[test]
fn declaration_files_round_trip_through_loader() {
    let mut rules_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        rules_file,
        r#"
[PORT]
required = true
type = "number"

[RETRIES]
default = 3
type = "number"

[MOTD]
default = "welcome"
"#
    )
    .unwrap();

    let mut ranges_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        ranges_file,
        r#"
[[range]]
cidr = "10.117.0.0/16"
environment = "live"
"#
    )
    .unwrap();

    let rules = rules_from_file(rules_file.path()).unwrap();
    let ranges = ranges_from_file(ranges_file.path()).unwrap();

    let settings = Loader::load_with(
        &rules,
        &ranges,
        &source(&[("PORT", "8080")]),
        "10.117.200.5".parse().unwrap(),
    )
    .unwrap();

    assert_eq!(settings.environment(), Some(EnvironmentName::Live));
    assert_eq!(settings.get_i64("PORT"), Some(8080));
    assert_eq!(settings.get("RETRIES"), Some(&Value::Number(3)));
    assert_eq!(settings.get_str("MOTD"), Some("welcome"));
}

#[test]
fn settings_serialize_to_json() {
    let settings = Loader::load_with(
        &RuleSet::new(),
        &[],
        &source(&[("ENVIRONMENT", "staging")]),
        Ipv4Addr::UNSPECIFIED,
    )
    .unwrap();
    let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&settings).unwrap())
        .unwrap();
    assert_eq!(json["ENVIRONMENT"], "staging");
    assert_eq!(json["IN_STAGING"], true);
}
