//! Tests for builder modules

use procsim::builders::SchedulerBuilder;
use procsim::config::{SchedulerConfig, StoreBackendConfig};
use procsim::core::{AuditAction, ReleasePolicy};
use procsim::infra::InMemoryProcessStore;
use procsim::util::VirtualClock;

#[test]
fn test_scheduler_builder_config() {
    let builder = SchedulerBuilder::new(SchedulerConfig {
        memory_limit: 4096,
        ..SchedulerConfig::default()
    });
    assert_eq!(builder.config().memory_limit, 4096);
    assert_eq!(builder.config().quantum_ms, 500);
}

#[test]
fn test_scheduler_builder_rejects_invalid_config() {
    let builder = SchedulerBuilder::new(SchedulerConfig {
        quantum_ms: 0,
        ..SchedulerConfig::default()
    });
    assert!(builder.build().is_err());
}

#[test]
fn test_build_with_applies_limits() {
    let store = InMemoryProcessStore::new();
    let mut scheduler = SchedulerBuilder::new(SchedulerConfig {
        memory_limit: 1000,
        release_policy: ReleasePolicy::SteppedRemainder,
        ..SchedulerConfig::default()
    })
    .build_with(store.clone(), VirtualClock::new())
    .unwrap();

    assert_eq!(scheduler.release_policy(), ReleasePolicy::SteppedRemainder);
    assert_eq!(scheduler.stats().memory_limit, 1000);
    assert!(scheduler.create("big", 1001, 0).is_err());
    assert_eq!(scheduler.create("fits", 1000, 0).unwrap(), 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_build_attaches_audit_log() {
    let (mut scheduler, audit) = SchedulerBuilder::new(SchedulerConfig {
        store: StoreBackendConfig::None,
        ..SchedulerConfig::default()
    })
    .build()
    .unwrap();

    scheduler.create("init", 100, 0).unwrap();
    scheduler.terminate(1).unwrap();

    let actions: Vec<AuditAction> = audit.lock().events().iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![AuditAction::Admit, AuditAction::Terminate]);
}

#[test]
fn test_build_discards_rows_from_previous_session() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("processes.jsonl"),
        concat!(
            r#"{"pid":1,"name":"old-a","remaining_work":100,"priority":0}"#,
            "\n",
            r#"{"pid":9,"name":"old-b","remaining_work":200,"priority":0}"#,
            "\n"
        ),
    )
    .unwrap();

    let (mut scheduler, _audit) = SchedulerBuilder::new(SchedulerConfig {
        store: StoreBackendConfig::File {
            path: dir.path().to_path_buf(),
        },
        ..SchedulerConfig::default()
    })
    .build()
    .unwrap();
    scheduler.create("fresh", 300, 0).unwrap();

    let contents = std::fs::read_to_string(dir.path().join("processes.jsonl")).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("\"fresh\""));
    assert!(!contents.contains("old-b"));
}

#[test]
fn test_build_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let (mut scheduler, _audit) = SchedulerBuilder::new(SchedulerConfig {
        store: StoreBackendConfig::File {
            path: dir.path().to_path_buf(),
        },
        ..SchedulerConfig::default()
    })
    .build()
    .unwrap();

    scheduler.create("init", 100, 0).unwrap();
    scheduler.create("shell", 200, 1).unwrap();
    scheduler.terminate(1).unwrap();

    let contents = std::fs::read_to_string(dir.path().join("processes.jsonl")).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("\"shell\""));
}
