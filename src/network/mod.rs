//! A network abstraction layer for embedded systems
//!
//! The traits in this module describe the byte-stream transport the HTTP layer
//! runs on. The crate never opens sockets itself: the host platform provides a
//! [`Connect`] implementation (typically a TLS socket) and the protocol code
//! drives whatever [`Connection`] it hands back.
//!
//! Reads are expected to be deadline-bounded. A transport whose peer stalls
//! should eventually return an error (usually [`error::Error::Timeout`]) from
//! [`Read::read`] instead of blocking forever.

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Protocol-specific client implementations
pub mod application;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Connect, Connection, Read, Write};
}

/// Byte-oriented, blocking input half of a connection.
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection.
    ///
    /// `Ok(0)` means the peer closed the stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Byte-oriented output half of a connection.
pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Consuming shutdown of a connection.
pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A synchronous connection
pub trait Connection: Read + Write + Close {}

/// A synchronous connector (client)
pub trait Connect {
    /// Associated connection type
    type Connection: Connection;
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Open a connection to `remote`, given as `host:port`.
    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error>;
}
