use std::io;
use thiserror::Error;

/// Errors raised by the relay monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Failed to connect to relay at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read from relay: {0}")]
    Read(#[from] io::Error),
}
