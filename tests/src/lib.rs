//! # Beacon Relay Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/           # criterion benchmarks (store, assembly, heuristics)
//! └── src/integration/   # loopback flows through the real TCP endpoint
//!     ├── session_flow.rs   # relay → raw client
//!     └── monitor_flow.rs   # relay → heuristics monitor
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p relay-tests
//! cargo bench -p relay-tests
//! ```

pub mod integration;
