//! # TCP Session Transport
//!
//! The relay serves exactly one downstream client per process. The
//! listener is consumed by [`TcpSessionListener::await_single_client`] and
//! dropped once that client is accepted, so later connection attempts are
//! refused.
//!
//! Each batch is one newline-terminated JSON array, written with
//! `write_all` and flushed under a timeout.

use async_trait::async_trait;
use shared_types::Batch;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::info;

use crate::domain::TransportError;
use crate::ports::BatchSink;

/// Bound, not yet connected, session endpoint.
pub struct TcpSessionListener {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl TcpSessionListener {
    /// Bind the session endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Bind`] if the address is unavailable.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let bind_err = |source| TransportError::Bind {
            addr: addr.to_string(),
            source,
        };
        let listener = TcpListener::bind(addr).await.map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;
        info!(addr = %local_addr, "Waiting for client connection");
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept one client and stop listening.
    pub async fn await_single_client(
        self,
        write_timeout: Duration,
    ) -> Result<TcpSession, TransportError> {
        let (stream, peer) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::Accept)?;
        info!(peer = %peer, "Client connected");
        // `self.listener` drops here; the endpoint no longer accepts.
        Ok(TcpSession::new(stream, peer, write_timeout))
    }
}

/// Connected session with the single downstream client.
pub struct TcpSession {
    stream: TcpStream,
    peer: SocketAddr,
    write_timeout: Duration,
}

impl TcpSession {
    pub fn new(stream: TcpStream, peer: SocketAddr, write_timeout: Duration) -> Self {
        // Batches are latency-sensitive single writes.
        let _ = stream.set_nodelay(true);
        Self {
            stream,
            peer,
            write_timeout,
        }
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    async fn write_line(&mut self, line: &[u8]) -> std::io::Result<()> {
        self.stream.write_all(line).await?;
        self.stream.flush().await
    }
}

#[async_trait]
impl BatchSink for TcpSession {
    async fn send(&mut self, batch: &Batch) -> Result<usize, TransportError> {
        let line = batch.encode_line()?;
        let timeout = self.write_timeout;
        match tokio::time::timeout(timeout, self.write_line(&line)).await {
            Ok(Ok(())) => Ok(line.len()),
            Ok(Err(e)) => Err(TransportError::Write(e)),
            Err(_) => Err(TransportError::WriteTimeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }

    fn peer(&self) -> String {
        self.peer.to_string()
    }
}
