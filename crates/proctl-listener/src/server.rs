//! Listener server: the sequential accept-then-handle loop.
//!
//! The server is either accepting or handling exactly one connection. A
//! slow client holds up everyone else until the read timeout fires; that is
//! acceptable for the single trusted operator this serves.

use crate::acceptor::read_request;
use crate::config::{ListenerConfig, ListenerOptions};
use crate::errors::TransportError;
use crate::host::ProcessHost;
use crate::processor::{single_line, CommandProcessor, Outcome};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Duration;
use tracing::{debug, error, info, warn};

/// Pause after a failed accept so a persistent error (e.g. fd exhaustion)
/// does not spin the loop.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// A bound listener together with the processor it feeds.
pub struct ListenerServer<H: ProcessHost> {
    listener: TcpListener,
    processor: CommandProcessor<H>,
    options: ListenerOptions,
}

impl<H: ProcessHost> ListenerServer<H> {
    /// Bind the configured address. Failure here is fatal for the listener.
    pub async fn bind(config: &ListenerConfig, host: H) -> Result<Self, TransportError> {
        let addr = SocketAddr::new(config.listener.bind_address, config.listener.port);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| TransportError::Bind { addr, source })?;

        match listener.local_addr() {
            Ok(local) => info!("proctl listener is listening on {}", local),
            Err(_) => info!("proctl listener is listening on {}", addr),
        }
        if !config.always_kill.is_empty() {
            info!("Always-kill list: {}", config.always_kill.join(", "));
        }

        Ok(Self {
            listener,
            processor: CommandProcessor::new(host, config.always_kill.clone()),
            options: config.listener.clone(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn processor(&self) -> &CommandProcessor<H> {
        &self.processor
    }

    /// Accept one connection and handle it to completion.
    pub async fn serve_one(&mut self) -> Result<Outcome, TransportError> {
        let (mut stream, peer) = self.listener.accept().await.map_err(TransportError::Accept)?;
        info!("Client [{}] connected.", peer.ip());

        let result = match read_request(&mut stream, self.options.read_timeout).await {
            Ok(data) => Ok(self.processor.handle(&data)),
            Err(e) => Err(e),
        };

        if self.options.reply {
            let line = match &result {
                Ok(outcome) => outcome.reply_line(),
                Err(e) => single_line(&format!("ERR {}", e)),
            };
            send_reply(&mut stream, &line).await;
        }

        if let Err(e) = stream.shutdown().await {
            debug!("Closing connection from [{}]: {}", peer.ip(), e);
        }
        info!("Connection from [{}] closed.", peer.ip());
        result
    }

    /// Serve connections until `shutdown` completes.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, listener stopping");
                    break;
                }
                result = self.serve_one() => {
                    match result {
                        Ok(_) => {}
                        Err(e @ TransportError::Accept(_)) => {
                            error!("{}", e);
                            tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                        }
                        Err(e) => error!("{}", e),
                    }
                }
            }
        }

        info!(
            "Listener stopped; {} process(es) were launched during this run",
            self.processor.registry().len()
        );
    }

    /// Serve connections forever.
    pub async fn run(self) {
        self.run_until(std::future::pending()).await
    }
}

async fn send_reply(stream: &mut TcpStream, line: &str) {
    let mut payload = String::with_capacity(line.len() + 1);
    payload.push_str(line);
    payload.push('\n');
    if let Err(e) = stream.write_all(payload.as_bytes()).await {
        warn!("Failed to send reply: {}", e);
    }
}
