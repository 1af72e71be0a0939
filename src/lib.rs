//! # libcgm - glucose telemetry client for embedded devices
//!
//! A small Rust library that lets a device log in to the cloud Share glucose
//! telemetry service, fetch recent blood-glucose readings and classify them.
//! It is designed for embedded systems and supports `no_std` environments.
//!
//! ## Features
//!
//! ### Network
//! - **Transport traits**: bring your own TLS socket through [`network::Connect`]
//! - **HTTP Client**: HTTP/1.1 with chunked and plain response bodies
//!
//! ### Share service
//! - Two-step login handshake with account status reporting
//! - Reading retrieval with per-record validation
//! - Trend, combined trend and range classification with configurable thresholds
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libcgm = "0.1.0"
//! ```
//!
//! ### Basic Example
//!
//! ```rust,no_run
//! use libcgm::share::{Range, Region, ShareClient};
//! # use libcgm::network::{Connect, Connection};
//! # struct Tls;
//! # impl Connection for Tls {}
//! # impl libcgm::network::Read for Tls {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl libcgm::network::Write for Tls {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl libcgm::network::Close for Tls {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct TlsConnector;
//! # impl Connect for TlsConnector {
//! #     type Connection = Tls;
//! #     type Error = ();
//! #     fn connect(&mut self, _remote: &str) -> Result<Tls, ()> { Ok(Tls) }
//! # }
//!
//! let mut client = ShareClient::new(TlsConnector);
//!
//! if client.create_session("user", "secret", Region::Ous) {
//!     for reading in client.get_glucose(60, 12) {
//!         if reading.range == Range::UrgentLow {
//!             // raise an alarm
//!         }
//!     }
//! }
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based IoT devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Log through defmt instead of the `log` facade

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Network abstraction layer: transport traits and the HTTP client.
///
/// The crate does not ship a transport. The host platform supplies a
/// connector, usually a TLS socket on port 443.
pub mod network;

/// Client for the Share glucose telemetry service.
pub mod share;
