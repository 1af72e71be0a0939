//! Error types for the Share service client

use crate::network::error::Error as NetworkError;
use core::fmt;

/// Failure of a single Share service call.
///
/// These never cross the public [`ShareClient`](super::ShareClient) API; they
/// are logged and folded into empty results and the account status.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The HTTP exchange failed.
    Network(NetworkError),
    /// The service answered with a status other than 200 or 500.
    HttpStatus(u16),
    /// The service answered 500.
    ServerError,
    /// The response body was not UTF-8.
    InvalidUtf8,
    /// The response body was not the JSON shape expected.
    Json,
    /// A request payload could not be serialized into its buffer.
    Serialize,
    /// A login step answered 200 without a token.
    EmptyToken,
    /// No session id is available for the call.
    NotLoggedIn,
    /// A call argument is outside the limits the service accepts.
    InvalidArgument,
}

impl From<NetworkError> for Error {
    fn from(err: NetworkError) -> Self {
        Error::Network(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network(err) => write!(f, "network: {}", err),
            Error::HttpStatus(code) => write!(f, "HTTP status {}", code),
            Error::ServerError => f.write_str("server error"),
            Error::InvalidUtf8 => f.write_str("body is not UTF-8"),
            Error::Json => f.write_str("unexpected JSON"),
            Error::Serialize => f.write_str("payload too large"),
            Error::EmptyToken => f.write_str("empty token"),
            Error::NotLoggedIn => f.write_str("not logged in"),
            Error::InvalidArgument => f.write_str("invalid argument"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Network(err) => defmt::write!(f, "Network({})", err),
            Error::HttpStatus(code) => defmt::write!(f, "HttpStatus({})", code),
            Error::ServerError => defmt::write!(f, "ServerError"),
            Error::InvalidUtf8 => defmt::write!(f, "InvalidUtf8"),
            Error::Json => defmt::write!(f, "Json"),
            Error::Serialize => defmt::write!(f, "Serialize"),
            Error::EmptyToken => defmt::write!(f, "EmptyToken"),
            Error::NotLoggedIn => defmt::write!(f, "NotLoggedIn"),
            Error::InvalidArgument => defmt::write!(f, "InvalidArgument"),
        }
    }
}
