//! Error types for the spoof relay.

use shared_types::CodecError;
use std::io;
use thiserror::Error;

/// Errors that end or prevent a relay session.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The downstream peer could not be written to. Fatal to the session.
    #[error("Transport write failure: {0}")]
    TransportWriteFailure(#[source] TransportError),

    /// Configuration rejected before the session started.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Errors from the session transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not bind the local endpoint.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Accepting the single client failed.
    #[error("Failed to accept client: {0}")]
    Accept(#[source] io::Error),

    /// Batch could not be serialized.
    #[error(transparent)]
    Encode(#[from] CodecError),

    /// Writing to the peer failed.
    #[error("Write to peer failed: {0}")]
    Write(#[source] io::Error),

    /// Writing to the peer did not complete in time.
    #[error("Write to peer timed out after {timeout_ms} ms")]
    WriteTimeout { timeout_ms: u64 },
}

/// Non-fatal reasons an injection was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectionError {
    /// Beacon flooding needs a genuine record to replay.
    #[error("No genuine observation available to base the beacon flood on")]
    EmptyFloodSource,
}

/// Errors from the advertisement ingestion side.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The store-side consumer has gone away.
    #[error("Ingestion channel closed")]
    ChannelClosed,

    /// Reading the advertisement feed failed.
    #[error("Failed to read advertisement feed: {0}")]
    Read(#[source] io::Error),
}

/// Relay configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cycle_interval_ms must be greater than zero")]
    ZeroCycleInterval,

    #[error("rotation_period must be greater than zero")]
    ZeroRotationPeriod,

    #[error("write_timeout_ms must be greater than zero")]
    ZeroWriteTimeout,

    #[error("ingest_channel_capacity must be greater than zero")]
    ZeroChannelCapacity,
}
