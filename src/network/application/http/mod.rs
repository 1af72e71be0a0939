//! HTTP/1.1 protocol implementation for embedded systems.
//!
//! This module provides a lightweight HTTP client designed for `no_std`
//! environments. It focuses on simplicity and predictable memory usage: the
//! request, every header line and the response body live in fixed-size
//! `heapless` buffers.
//!
//! # Features
//!
//! - Synchronous request/response model
//! - One connection per request, always sent with `Connection: close`
//! - `Transfer-Encoding: chunked` and plain (`Content-Length` or read-to-close) bodies
//! - GET and POST method support with custom headers
//!
//! # Usage
//!
//! The main entry point is the [`client::Client`] which works with any
//! connector implementing the [`crate::network::Connect`] trait.
//!
//! ```rust,no_run
//! use libcgm::network::application::http::{Client, Header, Method, Request, HTTPS_PORT};
//! # use libcgm::network::{Connect, Connection};
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl libcgm::network::Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl libcgm::network::Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl libcgm::network::Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockConnector;
//! # impl Connect for MockConnector {
//! #     type Connection = MockConnection;
//! #     type Error = ();
//! #     fn connect(&mut self, _remote: &str) -> Result<MockConnection, ()> { Ok(MockConnection) }
//! # }
//!
//! let mut client = Client::new(MockConnector);
//!
//! let mut headers = heapless::Vec::new();
//! headers.push(Header::new("Content-Type", "application/json").unwrap()).unwrap();
//!
//! let request = Request {
//!     method: Method::Post,
//!     host: "example.com",
//!     port: HTTPS_PORT,
//!     path: "/api/data",
//!     headers,
//!     body: Some(br#"{"hello":"world"}"#),
//! };
//!
//! // let response = client.request(&request)?;
//! ```

/// HTTP client implementation and supporting types.
///
/// Contains the main [`Client`](client::Client) struct and all related types
/// for making HTTP requests and handling responses.
pub mod client;

mod reader;

pub use client::{
    Client, HTTPS_PORT, Header, MAX_BODY_LEN, MAX_REQUEST_LEN, Method, Request, Response,
};
