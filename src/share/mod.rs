//! # Share glucose telemetry client
//!
//! Logs in to the cloud Share service, fetches recent blood-glucose readings
//! and classifies each one by trend and by zone.
//!
//! ## Flow
//!
//! 1. [`ShareClient::create_session`] trades the user name and password for an
//!    account id, then trades the account id for a session id.
//! 2. [`ShareClient::get_glucose`] posts the session id and returns the
//!    readings of a time window, each classified with the client's
//!    [`Thresholds`].
//!
//! Every exchange is a single `POST` over a fresh HTTPS connection opened by
//! the connector handed to the client. The client never returns errors: it
//! degrades to empty results and records what the service reported in
//! [`AccountStatus`].
//!
//! ```rust,no_run
//! use libcgm::share::{Region, ShareClient};
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
//! client.thresholds.high = 180;
//!
//! if client.create_session("user", "secret", Region::Us) {
//!     let reading = client.get_last_glucose();
//!     if reading.is_valid() {
//!         // reading.value, reading.trend.arrow(), reading.range ...
//!     }
//! }
//! ```

#![deny(unsafe_code)]

pub mod classifier;
pub mod client;
pub mod error;
pub mod payload;
pub mod types;

#[cfg(test)]
mod tests;

pub use classifier::{Thresholds, trend_from_label};
pub use client::ShareClient;
pub use types::{AccountStatus, AdvancedTrend, Range, Reading, Trend};

/// Service host for accounts in the United States.
pub const BASE_HOST: &str = "share2.dexcom.com";
/// Service host for accounts outside the United States.
pub const BASE_HOST_OUS: &str = "shareous1.dexcom.com";

/// Identifies this client application to the service on every login call.
pub const APPLICATION_ID: &str = "d89443d2-327c-4a6f-89e5-496bbb0317db";

/// Exchanges a user name and password for an account id.
pub const AUTHENTICATE_ENDPOINT: &str =
    "/ShareWebServices/Services/General/AuthenticatePublisherAccount";
/// Exchanges an account id and password for a session id.
pub const LOGIN_ENDPOINT: &str = "/ShareWebServices/Services/General/LoginPublisherAccountById";
/// Returns the latest readings for a session.
pub const READINGS_ENDPOINT: &str =
    "/ShareWebServices/Services/Publisher/ReadPublisherLatestGlucoseValues";

/// Longest window, in minutes, the service accepts.
pub const MAX_MINUTES: u16 = 1440;
/// Largest reading count the service accepts.
pub const MAX_COUNT: u16 = 288;
/// Readings returned by a single call at most.
pub const MAX_READINGS: usize = 48;

/// Regional deployment of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    /// United States
    #[default]
    Us,
    /// Outside the United States
    Ous,
}

impl Region {
    /// Host serving this region.
    pub fn host(&self) -> &'static str {
        match self {
            Region::Us => BASE_HOST,
            Region::Ous => BASE_HOST_OUS,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Region {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.host())
    }
}
