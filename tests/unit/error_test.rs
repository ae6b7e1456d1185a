//! Tests for error types

use procsim::core::SchedulerError;
use procsim::runtime::{ErrorKind, Response};

#[test]
fn test_not_found_error() {
    let err = SchedulerError::NotFound(7);
    assert_eq!(format!("{}", err), "process 7 not found");
}

#[test]
fn test_empty_queue_error() {
    let err = SchedulerError::EmptyQueue;
    assert_eq!(format!("{}", err), "no processes in the ready queue");
}

#[test]
fn test_persistence_error() {
    let err = SchedulerError::Persistence("disk full".to_string());
    assert_eq!(format!("{}", err), "persistence error: disk full");
}

#[test]
fn test_invalid_input_error() {
    let err = SchedulerError::InvalidInput("burst time must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid input: burst time must be greater than 0"
    );
}

#[test]
fn test_error_converts_to_response() {
    let response = Response::from(SchedulerError::InsufficientMemory {
        requested: 10,
        used: 95,
        limit: 100,
    });
    match response {
        Response::Error { kind, message } => {
            assert_eq!(kind, ErrorKind::InsufficientMemory);
            assert!(message.contains("requested 10"));
        }
        other => panic!("expected error response, got {other:?}"),
    }
}
