//! # proctl Listener
//!
//! Remote process-control listener. A single trusted caller connects over
//! TCP, sends one short text command per connection, and the listener
//! launches or kills local application instances in response.
//!
//! This crate provides:
//! - The connection acceptor ([`server`], [`acceptor`])
//! - Command parsing ([`command`]) and dispatch ([`processor`])
//! - The ledger of launched processes ([`registry`])
//! - Kill sweep reporting ([`sweep`])
//! - The seam to the operating system ([`host`])
//! - YAML configuration ([`config`])
//!
//! Connections are handled strictly one at a time.

pub mod acceptor;
pub mod command;
pub mod config;
pub mod errors;
pub mod host;
pub mod processor;
pub mod registry;
pub mod server;
pub mod sweep;

// Re-export main types
pub use acceptor::{read_request, MAX_MESSAGE_LENGTH};
pub use command::{parse_command, Command, StartRequest};
pub use config::{ListenerConfig, ListenerOptions};
pub use errors::{ProtocolError, TransportError};
pub use host::{LaunchedProcess, ProcessHost, SystemProcessHost};
pub use processor::{CommandProcessor, Outcome};
pub use registry::ProcessRegistry;
pub use server::ListenerServer;
pub use sweep::{KillReport, SweepTarget, TerminationAttempt, TerminationOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
