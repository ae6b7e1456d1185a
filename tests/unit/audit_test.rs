//! Tests for audit sink

use std::sync::Arc;

use parking_lot::Mutex;
use procsim::core::{build_audit_event, AuditAction, AuditSink, InMemoryAuditSink};

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);

    let event = build_audit_event(Some(1), AuditAction::Admit, Some("init".to_string()));

    sink.record(event.clone());
    assert_eq!(sink.events().len(), 1);

    let events = sink.events();
    assert_eq!(events[0].event_id, event.event_id);
    assert_eq!(events[0].pid, Some(1));
    assert_eq!(events[0].action, AuditAction::Admit);
    assert_eq!(events[0].detail.as_deref(), Some("init"));
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);

    sink.record(build_audit_event(Some(1), AuditAction::Admit, None));
    sink.record(build_audit_event(Some(2), AuditAction::Admit, None));
    sink.record(build_audit_event(Some(3), AuditAction::Admit, None));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].pid, Some(2)); // First one popped
    assert_eq!(events[1].pid, Some(3));
}

#[test]
fn test_shared_sink_records_through_lock() {
    let shared = Arc::new(Mutex::new(InMemoryAuditSink::new(8)));
    let mut handle = Arc::clone(&shared);

    handle.record(build_audit_event(None, AuditAction::Reject, None));

    let events = shared.lock().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].pid, None);
    assert_eq!(events[0].action, AuditAction::Reject);
}

#[test]
fn test_audit_event_serializes_action_in_snake_case() {
    let event = build_audit_event(Some(4), AuditAction::Requeue, None);
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["action"], "requeue");
    assert_eq!(json["pid"], 4);
}
