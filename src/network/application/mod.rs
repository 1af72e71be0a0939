//! # Application Layer Network Protocols
//!
//! Application layer (OSI Layer 7) protocols built on the core network traits.
//!
//! - **[`http`]**: HTTP/1.1 client used to talk to the glucose telemetry service
//!
//! ## Design Principles
//!
//! - **Connection Agnostic**: Work with any type implementing [`Connect`](crate::network::Connect)
//! - **No-std Compatible**: No heap allocation, fixed-size `heapless` buffers
//! - **One exchange per connection**: every request opens and closes its own connection

/// HTTP client implementation.
///
/// Provides a simple HTTP/1.1 client suitable for embedded systems,
/// supporting GET and POST with chunked and plain response bodies.
pub mod http;
