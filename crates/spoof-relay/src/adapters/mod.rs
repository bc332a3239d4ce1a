//! # Relay Adapters
//!
//! Concrete implementations of the outbound ports.
//!
//! - `TcpSessionListener` / `TcpSession` - single-client TCP transport
//! - `LineFeedSource` - newline-delimited JSON advertisement feed
//! - `Ingestor` - moves advertisements from the channel into the store
//! - `SystemClock` - wall clock in epoch milliseconds
//! - `LoggingObserver` / `NoopObserver` - cycle report observers

/// Wall clock
pub mod clock;
/// Channel to store
pub mod ingest;
/// Advertisement feed
pub mod line_feed;
/// Cycle observers
pub mod observer;
/// Session transport
pub mod tcp;

pub use clock::SystemClock;
pub use ingest::Ingestor;
pub use line_feed::LineFeedSource;
pub use observer::{LoggingObserver, NoopObserver};
pub use tcp::{TcpSession, TcpSessionListener};
