//! Audit sink implementations.
//!
//! Every lifecycle transition the scheduler performs can be mirrored to a sink:
//! an in-memory ring for tests and display, or a channel feeding an external notifier.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::process::Pid;
use crate::util::clock::now_ms;

/// Lifecycle action recorded by an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Process admitted.
    Admit,
    /// Admission refused for lack of memory.
    Reject,
    /// Ready process cancelled.
    Terminate,
    /// Process selected by a scheduling run.
    Start,
    /// Process ran to completion.
    Complete,
    /// Process returned to the ready queue after an aborted run.
    Requeue,
}

/// Audit event structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Event identifier.
    pub event_id: String,
    /// Related process; `None` for rejected admissions, which never receive one.
    pub pid: Option<Pid>,
    /// Action taken.
    pub action: AuditAction,
    /// Wall-clock timestamp in milliseconds.
    pub at_ms: u128,
    /// Additional context.
    pub detail: Option<String>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);
}

/// Shared sink: the scheduler records through the lock while the caller keeps a handle.
impl<A: AuditSink> AuditSink for Arc<Mutex<A>> {
    fn record(&mut self, event: AuditEvent) {
        self.lock().record(event);
    }
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: VecDeque<AuditEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events.min(1024)),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Forwards events to a receiver owned by some notifier (mail, webhook, UI).
///
/// Sends to a disconnected receiver are dropped with a debug log.
#[cfg(not(target_arch = "wasm32"))]
pub struct ChannelAuditSink {
    tx: crossbeam_channel::Sender<AuditEvent>,
}

#[cfg(not(target_arch = "wasm32"))]
impl ChannelAuditSink {
    /// Wrap an existing sender.
    pub const fn new(tx: crossbeam_channel::Sender<AuditEvent>) -> Self {
        Self { tx }
    }

    /// Create a sink together with an unbounded receiver.
    pub fn unbounded() -> (Self, crossbeam_channel::Receiver<AuditEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AuditSink for ChannelAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::debug!("audit receiver gone, dropping event {}", e.0.event_id);
        }
    }
}

/// Helper to build an audit event stamped with a fresh id and the current time.
pub fn build_audit_event(
    pid: Option<Pid>,
    action: AuditAction,
    detail: Option<String>,
) -> AuditEvent {
    AuditEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        pid,
        action,
        at_ms: now_ms(),
        detail,
    }
}
