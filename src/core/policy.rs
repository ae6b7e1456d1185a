//! Scheduling policies and the execution mode each one drives.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::process::Process;
use crate::core::SchedulerError;

/// How the execution engine consumes a process's work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Fixed quanta until remaining work reaches zero or below.
    Stepped,
    /// The whole remaining work in one indivisible step.
    Atomic,
}

/// Ordering discipline applied to a drained ready queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingPolicy {
    /// First-come-first-serve: admission order.
    Fcfs,
    /// Descending priority, ascending PID on ties.
    Priority,
    /// Shortest job first: ascending remaining work, ascending PID on ties.
    Sjf,
}

impl SchedulingPolicy {
    /// Every policy, in menu order.
    pub const ALL: [Self; 3] = [Self::Fcfs, Self::Priority, Self::Sjf];

    /// Stable lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Priority => "priority",
            Self::Sjf => "sjf",
        }
    }

    /// Execution mode this policy runs its batch under.
    pub const fn mode(self) -> ExecutionMode {
        match self {
            Self::Fcfs => ExecutionMode::Stepped,
            Self::Priority | Self::Sjf => ExecutionMode::Atomic,
        }
    }

    /// Whether running against an empty queue is reported as `EmptyQueue`.
    ///
    /// FCFS simply completes nothing.
    pub const fn rejects_empty(self) -> bool {
        !matches!(self, Self::Fcfs)
    }

    /// Reorder a drained batch into execution order.
    ///
    /// The batch arrives in admission order; sorts are stable so FCFS is the identity.
    pub fn order(self, mut batch: Vec<Process>) -> Vec<Process> {
        match self {
            Self::Fcfs => {}
            Self::Priority => batch.sort_by(|a, b| {
                b.priority()
                    .cmp(&a.priority())
                    .then_with(|| a.pid().cmp(&b.pid()))
            }),
            Self::Sjf => batch.sort_by_key(|p| (p.remaining_work(), p.pid())),
        }
        batch
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchedulingPolicy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" | "1" => Ok(Self::Fcfs),
            "priority" | "prio" | "2" => Ok(Self::Priority),
            "sjf" | "shortest" | "3" => Ok(Self::Sjf),
            other => Err(SchedulerError::InvalidInput(format!(
                "unknown policy '{other}', expected fcfs, priority or sjf"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::process::Pid;

    fn batch(shape: &[(u32, i32)]) -> Vec<Process> {
        shape.iter()
            .enumerate()
            .map(|(i, &(burst, priority))| {
                Process::new(i as Pid + 1, format!("p{}", i + 1), burst, priority)
            })
            .collect()
    }

    fn order(policy: SchedulingPolicy, shape: &[(u32, i32)]) -> Vec<Pid> {
        policy.order(batch(shape)).iter().map(Process::pid).collect()
    }

    #[test]
    fn test_fcfs_keeps_admission_order() {
        assert_eq!(
            order(SchedulingPolicy::Fcfs, &[(900, 1), (100, 9), (500, 5)]),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_priority_descending_with_pid_tiebreak() {
        assert_eq!(
            order(SchedulingPolicy::Priority, &[(100, 3), (100, 1), (100, 3)]),
            vec![1, 3, 2]
        );
    }

    #[test]
    fn test_priority_handles_negative_values() {
        assert_eq!(
            order(SchedulingPolicy::Priority, &[(100, -5), (100, 0), (100, -1)]),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn test_sjf_ascending_with_pid_tiebreak() {
        assert_eq!(
            order(SchedulingPolicy::Sjf, &[(300, 0), (100, 0), (100, 0)]),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn test_modes() {
        assert_eq!(SchedulingPolicy::Fcfs.mode(), ExecutionMode::Stepped);
        assert_eq!(SchedulingPolicy::Priority.mode(), ExecutionMode::Atomic);
        assert_eq!(SchedulingPolicy::Sjf.mode(), ExecutionMode::Atomic);
        assert!(!SchedulingPolicy::Fcfs.rejects_empty());
        assert!(SchedulingPolicy::Sjf.rejects_empty());
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("FCFS".parse::<SchedulingPolicy>().unwrap(), SchedulingPolicy::Fcfs);
        assert_eq!(" prio ".parse::<SchedulingPolicy>().unwrap(), SchedulingPolicy::Priority);
        assert_eq!("3".parse::<SchedulingPolicy>().unwrap(), SchedulingPolicy::Sjf);
        assert!("round_robin".parse::<SchedulingPolicy>().is_err());
    }
}
