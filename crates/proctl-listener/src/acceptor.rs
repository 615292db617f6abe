//! Request reading.
//!
//! There is no framing: the client writes its command and closes (or
//! half-closes) the connection, and everything up to end-of-stream is one
//! command.

use crate::errors::TransportError;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Largest accepted command, in bytes.
pub const MAX_MESSAGE_LENGTH: usize = 2048;

/// Read one command from `stream`.
///
/// Reads at most one byte past [`MAX_MESSAGE_LENGTH`]; if that byte arrives
/// the request is rejected without reading further.
pub async fn read_request<R>(stream: &mut R, timeout: Duration) -> Result<String, TransportError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(256);
    let limit = MAX_MESSAGE_LENGTH as u64 + 1;

    let result = tokio::time::timeout(timeout, (&mut *stream).take(limit).read_to_end(&mut buf)).await;
    match result {
        Err(_) => Err(TransportError::Timeout(timeout)),
        Ok(Err(e)) => Err(TransportError::ShortRead(e)),
        Ok(Ok(_)) if buf.len() > MAX_MESSAGE_LENGTH => Err(TransportError::Oversized {
            limit: MAX_MESSAGE_LENGTH,
        }),
        Ok(Ok(_)) => Ok(decode_ascii(&buf)),
    }
}

/// Decode bytes as ASCII, replacing anything outside the 7-bit range with `?`.
pub fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::{AsyncWriteExt, ReadBuf};

    const TIMEOUT: Duration = Duration::from_secs(5);

    /// Yields some bytes, then fails like a reset connection.
    struct ResetAfter {
        data: &'static [u8],
        sent: bool,
    }

    impl AsyncRead for ResetAfter {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            if self.sent {
                return Poll::Ready(Err(io::Error::from(io::ErrorKind::ConnectionReset)));
            }
            self.sent = true;
            buf.put_slice(self.data);
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_reads_until_end_of_stream() {
        let mut input: &[u8] = b"start app.exe --flag\n";
        let command = read_request(&mut input, TIMEOUT).await.unwrap();
        assert_eq!(command, "start app.exe --flag\n");
    }

    #[tokio::test]
    async fn test_exactly_max_length_is_accepted() {
        let payload = vec![b'a'; MAX_MESSAGE_LENGTH];
        let mut input: &[u8] = &payload;
        let command = read_request(&mut input, TIMEOUT).await.unwrap();
        assert_eq!(command.len(), MAX_MESSAGE_LENGTH);
    }

    #[tokio::test]
    async fn test_oversized_is_rejected() {
        let payload = vec![b'a'; MAX_MESSAGE_LENGTH + 500];
        let mut input: &[u8] = &payload;
        let err = read_request(&mut input, TIMEOUT).await.unwrap_err();
        assert!(matches!(err, TransportError::Oversized { limit: MAX_MESSAGE_LENGTH }));

        // Stopped one byte past the limit
        assert_eq!(input.len(), 500 - 1);
    }

    #[tokio::test]
    async fn test_connection_failure_is_short_read() {
        let mut input = ResetAfter {
            data: b"start app",
            sent: false,
        };
        let err = read_request(&mut input, TIMEOUT).await.unwrap_err();
        assert!(matches!(err, TransportError::ShortRead(_)));
    }

    #[tokio::test]
    async fn test_stalled_client_times_out() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(b"kill").await.unwrap();

        // client stays open, so end-of-stream never arrives
        let err = read_request(&mut server, Duration::from_millis(50)).await.unwrap_err();
        assert!(matches!(err, TransportError::Timeout(_)));
        drop(client);
    }

    #[test]
    fn test_decode_ascii_replaces_non_ascii() {
        assert_eq!(decode_ascii(b"kill"), "kill");
        assert_eq!(decode_ascii(&[b's', 0xC3, 0xA9, b'x']), "s??x");
    }
}
