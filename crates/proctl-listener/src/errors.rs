//! Error types for the listener.
//!
//! Transport errors come from the socket side, protocol errors from the
//! command text. Neither is ever sent back across the connection unless the
//! reply extension is enabled.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Socket-level failures.
///
/// Only [`TransportError::Bind`] is fatal; everything else drops the current
/// request and the accept loop carries on.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Failed to accept connection: {0}")]
    Accept(#[source] io::Error),

    #[error("Incoming message is too long. Maximum allowed length is {limit}. Dropping the message.")]
    Oversized { limit: usize },

    #[error("Connection failed before the message was complete: {0}")]
    ShortRead(#[source] io::Error),

    #[error("No complete message within {0:?}. Dropping the connection.")]
    Timeout(Duration),
}

impl TransportError {
    /// True when the listener cannot keep serving.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Bind { .. })
    }
}

/// Problems with the command text itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Empty message received.")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Application path hasn't been specified.")]
    MissingApplicationPath,
}
