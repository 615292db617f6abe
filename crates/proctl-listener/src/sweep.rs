//! Kill sweep results.
//!
//! A sweep never stops at the first failure. Each target gets its own
//! [`TerminationOutcome`], and the [`KillReport`] collects them so callers
//! and tests can see exactly what happened.

use proctl_common::{ProcessError, ProcessId, ProcessResult};
use std::fmt;

/// Result of one termination attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationOutcome {
    Terminated,
    /// The process was already gone. Not an error.
    NotFound,
    PermissionDenied,
    Failed(String),
}

impl TerminationOutcome {
    /// The process was running and has been killed.
    pub fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// The process may still be running.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::Failed(_))
    }
}

impl From<ProcessResult<()>> for TerminationOutcome {
    fn from(result: ProcessResult<()>) -> Self {
        match result {
            Ok(()) => Self::Terminated,
            Err(ProcessError::NotFound { .. }) => Self::NotFound,
            Err(ProcessError::PermissionDenied { .. }) => Self::PermissionDenied,
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

impl fmt::Display for TerminationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminated => write!(f, "terminated"),
            Self::NotFound => write!(f, "not running"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Why a process was targeted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepTarget {
    /// Matched an entry of the always-kill list.
    AlwaysKill(String),
    /// Launched by this listener.
    Registry,
}

/// One termination attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminationAttempt {
    pub pid: ProcessId,
    pub process_name: String,
    pub target: SweepTarget,
    pub outcome: TerminationOutcome,
}

/// Everything a `kill` command attempted, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KillReport {
    attempts: Vec<TerminationAttempt>,
}

impl KillReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one attempt. Attempts keep the order they were made in.
    pub fn record(&mut self, attempt: TerminationAttempt) {
        self.attempts.push(attempt);
    }

    /// All attempts, in sweep order.
    pub fn attempts(&self) -> &[TerminationAttempt] {
        &self.attempts
    }

    /// True when the sweep found nothing to kill.
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Number of processes actually terminated.
    pub fn terminated(&self) -> usize {
        self.count(TerminationOutcome::is_terminated)
    }

    /// Number of targets that were already gone.
    pub fn not_found(&self) -> usize {
        self.count(|outcome| *outcome == TerminationOutcome::NotFound)
    }

    /// Attempts that left the process possibly running.
    pub fn failures(&self) -> impl Iterator<Item = &TerminationAttempt> {
        self.attempts.iter().filter(|a| a.outcome.is_failure())
    }

    /// PIDs in the order they were attempted.
    pub fn attempted_pids(&self) -> Vec<ProcessId> {
        self.attempts.iter().map(|a| a.pid).collect()
    }

    fn count(&self, predicate: impl Fn(&TerminationOutcome) -> bool) -> usize {
        self.attempts.iter().filter(|a| predicate(&a.outcome)).count()
    }
}

impl fmt::Display for KillReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} terminated, {} not running, {} failed",
            self.terminated(),
            self.not_found(),
            self.failures().count()
        )
    }
}
