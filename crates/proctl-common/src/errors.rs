//! Error types for process lifecycle operations.
//!
//! Every fallible primitive in `proctl-process` returns a [`ProcessResult`].
//! The listener never lets these cross the connection boundary; they end up
//! as operator-visible diagnostics.

use crate::types::ProcessId;
use thiserror::Error;

/// Process-specific error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Couldn't start application {path}: {reason}")]
    SpawnFailed { path: String, reason: String },

    #[error("Process not found: {pid}")]
    NotFound { pid: ProcessId },

    #[error("Permission denied for process {pid}")]
    PermissionDenied { pid: ProcessId },

    #[error("Failed to terminate process {pid}: {reason}")]
    TerminateFailed { pid: ProcessId, reason: String },

    #[error("Failed to check process {pid}: {reason}")]
    CheckFailed { pid: ProcessId, reason: String },

    #[error("Invalid argument list: {reason}")]
    InvalidArguments { reason: String },
}

impl ProcessError {
    pub fn spawn_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SpawnFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(pid: ProcessId) -> Self {
        Self::NotFound { pid }
    }

    pub fn permission_denied(pid: ProcessId) -> Self {
        Self::PermissionDenied { pid }
    }

    pub fn terminate_failed(pid: ProcessId, reason: impl Into<String>) -> Self {
        Self::TerminateFailed {
            pid,
            reason: reason.into(),
        }
    }

    pub fn check_failed(pid: ProcessId, reason: impl Into<String>) -> Self {
        Self::CheckFailed {
            pid,
            reason: reason.into(),
        }
    }

    pub fn invalid_arguments(reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            reason: reason.into(),
        }
    }

    /// True when the target process no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for process operations.
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;
