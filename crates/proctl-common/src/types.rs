//! Core domain types used throughout proctl.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform process identifier.
///
/// # Example
/// ```
/// use proctl_common::ProcessId;
///
/// let pid = ProcessId::from(4242);
/// assert_eq!(pid.as_u32(), 4242);
/// assert_eq!(pid.to_string(), "4242");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(u32);

impl ProcessId {
    /// Creates a new ProcessId from a raw PID.
    pub const fn new(pid: u32) -> Self {
        Self(pid)
    }

    /// Returns the raw PID.
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the PID of the current process.
    pub fn current() -> Self {
        Self(std::process::id())
    }
}

impl From<u32> for ProcessId {
    fn from(pid: u32) -> Self {
        Self(pid)
    }
}

impl From<ProcessId> for u32 {
    fn from(pid: ProcessId) -> Self {
        pid.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
