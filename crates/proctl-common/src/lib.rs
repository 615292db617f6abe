//! # proctl Common
//!
//! Types shared by every proctl crate: the platform process identifier and
//! the error types produced by process lifecycle operations.

pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::{ProcessError, ProcessResult};
pub use types::ProcessId;
