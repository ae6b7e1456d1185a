//! Time sources for simulated CPU bursts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::core::SchedulerError;

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Source of simulated time injected into the execution engine.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Let `ms` units of simulated time pass.
    async fn advance(&self, ms: u64) -> Result<(), SchedulerError>;

    /// Simulated time elapsed since the clock was created.
    fn elapsed_ms(&self) -> u64;
}

#[async_trait]
impl<C: Clock + ?Sized> Clock for Box<C> {
    async fn advance(&self, ms: u64) -> Result<(), SchedulerError> {
        (**self).advance(ms).await
    }

    fn elapsed_ms(&self) -> u64 {
        (**self).elapsed_ms()
    }
}

/// Deterministic clock: advancing returns immediately and only moves a counter.
///
/// Clones share the same counter, so a test can keep a handle and read the
/// time the engine consumed.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Arc<AtomicU64>,
}

impl VirtualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Clock for VirtualClock {
    async fn advance(&self, ms: u64) -> Result<(), SchedulerError> {
        self.now.fetch_add(ms, Ordering::AcqRel);
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        self.now.load(Ordering::Acquire)
    }
}

/// Wall-clock time source that really sleeps on the tokio timer.
#[cfg(feature = "tokio-runtime")]
#[derive(Debug, Clone)]
pub struct TokioClock {
    started: tokio::time::Instant,
}

#[cfg(feature = "tokio-runtime")]
impl TokioClock {
    /// Start measuring from now.
    pub fn new() -> Self {
        Self {
            started: tokio::time::Instant::now(),
        }
    }
}

#[cfg(feature = "tokio-runtime")]
impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tokio-runtime")]
#[async_trait]
impl Clock for TokioClock {
    async fn advance(&self, ms: u64) -> Result<(), SchedulerError> {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
