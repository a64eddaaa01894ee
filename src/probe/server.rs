//! TCP liveness probe server.
//!
//! # Responsibilities
//! - Bind to the configured address and port (fatal on failure)
//! - Accept connections; log and continue on accept errors
//! - Drain each connection until the peer closes it

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;

/// Error type for probe server startup. Everything past bind is non-fatal.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to bind probe listener: {0}")]
    Bind(std::io::Error),
}

/// Accept-and-discard TCP server used as a liveness endpoint.
pub struct ProbeServer {
    listener: TcpListener,
}

impl ProbeServer {
    /// Bind the probe listener. Port 0 picks an ephemeral port.
    pub async fn bind(ip_addr: IpAddr, port: u16) -> Result<Self, ProbeError> {
        let listener = TcpListener::bind(SocketAddr::new(ip_addr, port))
            .await
            .map_err(ProbeError::Bind)?;

        Ok(Self { listener })
    }

    /// Address the probe is listening on.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }

    /// Accept connections until the shutdown signal fires.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        match self.local_addr() {
            Ok(addr) => tracing::info!(address = %addr, "Waiting for connections"),
            Err(e) => tracing::warn!(error = %e, "Waiting for connections on unknown address"),
        }

        loop {
            tokio::select! {
                result = self.listener.accept() => match result {
                    Ok((stream, peer)) => {
                        tracing::info!(peer = %peer, "Accepted connection");
                        tokio::spawn(drain_connection(stream, peer));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to accept connection");
                    }
                },
                _ = shutdown.recv() => {
                    tracing::info!("Probe server stopped");
                    return;
                }
            }
        }
    }
}

/// Read and discard until the peer closes. Connection lifetime is unbounded;
/// the probe's clients are health checkers that disconnect promptly.
async fn drain_connection(mut stream: TcpStream, peer: SocketAddr) {
    let mut buffer = [0u8; 4096];

    loop {
        match stream.read(&mut buffer).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(peer = %peer, error = %e, "Read failed");
                break;
            }
        }
    }

    tracing::info!(peer = %peer, "Connection closed");
}
