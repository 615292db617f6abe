//! # proctl Process
//!
//! Low-level process operations used by the listener.
//!
//! This crate provides cross-platform primitives for:
//! - Process spawning with an opaque argument string
//! - Process existence verification
//! - Forced process termination
//! - Host process discovery by name

pub mod check;
pub mod discovery;
pub mod execute;
pub mod terminate;

// Re-export main types
pub use check::*;
pub use discovery::*;
pub use execute::*;
pub use terminate::*;
