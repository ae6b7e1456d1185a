//! Tests for configuration validation

use std::collections::HashMap;
use std::path::PathBuf;

use procsim::config::{ClockConfig, SchedulerConfig, StoreBackendConfig};
use procsim::core::ReleasePolicy;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_default_config_is_valid() {
    let cfg = SchedulerConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.memory_limit, 100_000);
    assert_eq!(cfg.quantum_ms, 500);
    assert_eq!(cfg.release_policy, ReleasePolicy::Reserved);
    assert_eq!(cfg.clock, ClockConfig::Virtual);
    assert_eq!(cfg.store, StoreBackendConfig::InMemory);
}

#[test]
fn test_config_invalid_memory_limit() {
    let invalid = SchedulerConfig {
        memory_limit: 0,
        ..SchedulerConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_quantum() {
    let invalid = SchedulerConfig {
        quantum_ms: 0,
        ..SchedulerConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_file_path() {
    let invalid = SchedulerConfig {
        store: StoreBackendConfig::File {
            path: PathBuf::new(),
        },
        ..SchedulerConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_from_json_fills_defaults() {
    let cfg = SchedulerConfig::from_json_str(
        r#"{"memory_limit": 2048, "release_policy": "stepped_remainder"}"#,
    )
    .unwrap();
    assert_eq!(cfg.memory_limit, 2048);
    assert_eq!(cfg.quantum_ms, 500);
    assert_eq!(cfg.release_policy, ReleasePolicy::SteppedRemainder);
}

#[test]
fn test_config_from_json_file_store() {
    let cfg =
        SchedulerConfig::from_json_str(r#"{"store": {"file": {"path": "/tmp/procsim"}}}"#).unwrap();
    assert_eq!(
        cfg.store,
        StoreBackendConfig::File {
            path: PathBuf::from("/tmp/procsim")
        }
    );
}

#[test]
fn test_config_from_json_rejects_zero_quantum() {
    assert!(SchedulerConfig::from_json_str(r#"{"quantum_ms": 0}"#).is_err());
    assert!(SchedulerConfig::from_json_str("not json").is_err());
}

#[test]
fn test_config_from_lookup_overlays_defaults() {
    let cfg = SchedulerConfig::from_lookup(lookup(&[
        ("PROCSIM_MEMORY_LIMIT", "5000"),
        ("PROCSIM_QUANTUM_MS", " 250 "),
        ("PROCSIM_RELEASE_POLICY", "Stepped_Remainder"),
        ("PROCSIM_CLOCK", "real"),
        ("PROCSIM_STORE_PATH", "none"),
    ]))
    .unwrap();

    assert_eq!(cfg.memory_limit, 5000);
    assert_eq!(cfg.quantum_ms, 250);
    assert_eq!(cfg.release_policy, ReleasePolicy::SteppedRemainder);
    assert_eq!(cfg.clock, ClockConfig::Real);
    assert_eq!(cfg.store, StoreBackendConfig::None);
    assert_eq!(cfg.audit_capacity, 1024);
}

#[test]
fn test_config_from_lookup_rejects_garbage() {
    assert!(SchedulerConfig::from_lookup(lookup(&[("PROCSIM_MEMORY_LIMIT", "lots")])).is_err());
    assert!(SchedulerConfig::from_lookup(lookup(&[("PROCSIM_CLOCK", "sundial")])).is_err());
    assert!(SchedulerConfig::from_lookup(lookup(&[("PROCSIM_MEMORY_LIMIT", "0")])).is_err());
}

#[test]
fn test_config_from_lookup_store_path() {
    let cfg = SchedulerConfig::from_lookup(lookup(&[("PROCSIM_STORE_PATH", "./data")])).unwrap();
    assert_eq!(
        cfg.store,
        StoreBackendConfig::File {
            path: PathBuf::from("./data")
        }
    );
}
