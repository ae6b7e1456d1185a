//! Scheduler configuration structures.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{ReleasePolicy, SchedulerError, DEFAULT_MEMORY_LIMIT, DEFAULT_QUANTUM_MS};

/// Environment variable prefix read by [`SchedulerConfig::from_env`].
pub const ENV_PREFIX: &str = "PROCSIM_";

/// Time source selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockConfig {
    /// Deterministic virtual time; runs finish instantly.
    #[default]
    Virtual,
    /// Real delays on the tokio timer.
    Real,
}

/// Persistence backend selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackendConfig {
    /// In-memory table.
    #[default]
    InMemory,
    /// JSON-lines table under a directory.
    File {
        /// Directory holding the table file.
        path: PathBuf,
    },
    /// Persistence disabled.
    None,
}

/// Root scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Memory budget in abstract units.
    pub memory_limit: u64,
    /// Stepped-mode quantum in simulated milliseconds.
    pub quantum_ms: u64,
    /// Memory returned by completed processes.
    pub release_policy: ReleasePolicy,
    /// Time source.
    pub clock: ClockConfig,
    /// Persistence backend.
    pub store: StoreBackendConfig,
    /// Events kept by the in-memory audit sink.
    pub audit_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            memory_limit: DEFAULT_MEMORY_LIMIT,
            quantum_ms: DEFAULT_QUANTUM_MS,
            release_policy: ReleasePolicy::Reserved,
            clock: ClockConfig::Virtual,
            store: StoreBackendConfig::InMemory,
            audit_capacity: 1024,
        }
    }
}

impl SchedulerConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.memory_limit == 0 {
            return Err(SchedulerError::InvalidConfig(
                "memory_limit must be greater than 0".into(),
            ));
        }
        if self.quantum_ms == 0 {
            return Err(SchedulerError::InvalidConfig(
                "quantum_ms must be greater than 0".into(),
            ));
        }
        if self.audit_capacity == 0 {
            return Err(SchedulerError::InvalidConfig(
                "audit_capacity must be greater than 0".into(),
            ));
        }
        if let StoreBackendConfig::File { path } = &self.store {
            if path.as_os_str().is_empty() {
                return Err(SchedulerError::InvalidConfig(
                    "file store path must not be empty".into(),
                ));
            }
        }
        Ok(())
    }

    /// Parse scheduler configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, SchedulerError> {
        let cfg: Self = serde_json::from_str(input)
            .map_err(|e| SchedulerError::InvalidConfig(format!("parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `.env` if present, then overlay `PROCSIM_*` variables on the defaults.
    pub fn from_env() -> Result<Self, SchedulerError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values produced by `lookup` (keyed by full variable name) on the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SchedulerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        let mut cfg = Self::default();

        if let Some(v) = var("MEMORY_LIMIT") {
            cfg.memory_limit = parse_number("MEMORY_LIMIT", &v)?;
        }
        if let Some(v) = var("QUANTUM_MS") {
            cfg.quantum_ms = parse_number("QUANTUM_MS", &v)?;
        }
        if let Some(v) = var("AUDIT_CAPACITY") {
            cfg.audit_capacity = parse_number("AUDIT_CAPACITY", &v)?;
        }
        if let Some(v) = var("RELEASE_POLICY") {
            cfg.release_policy = parse_enum("RELEASE_POLICY", &v)?;
        }
        if let Some(v) = var("CLOCK") {
            cfg.clock = parse_enum("CLOCK", &v)?;
        }
        if let Some(v) = var("STORE_PATH") {
            cfg.store = match v.trim() {
                "none" => StoreBackendConfig::None,
                "memory" | "in_memory" => StoreBackendConfig::InMemory,
                path => StoreBackendConfig::File {
                    path: PathBuf::from(path),
                },
            };
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, SchedulerError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| SchedulerError::InvalidConfig(format!("{ENV_PREFIX}{name}: {e}")))
}

fn parse_enum<T: serde::de::DeserializeOwned>(name: &str, value: &str) -> Result<T, SchedulerError> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_ascii_lowercase()))
        .map_err(|e| SchedulerError::InvalidConfig(format!("{ENV_PREFIX}{name}: {e}")))
}
