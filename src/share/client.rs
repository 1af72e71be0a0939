//! Share service client: login handshake and reading retrieval.

use super::classifier::Thresholds;
use super::error::Error;
use super::payload::{
    AuthenticateRequest, LoginRequest, MAX_PAYLOAD_LEN, ReadingsRequest, Token,
    classify_server_error, encode, error_object, extract_token, parse_readings,
};
use super::types::{AccountStatus, Reading};
use super::{
    APPLICATION_ID, AUTHENTICATE_ENDPOINT, LOGIN_ENDPOINT, MAX_COUNT, MAX_MINUTES, MAX_READINGS,
    READINGS_ENDPOINT, Region,
};
use crate::network::Connect;
use crate::network::error::Error as NetworkError;
use crate::network::application::http::{Client, HTTPS_PORT, Header, Method, Request, Response};
use heapless::Vec;

/// Client for the Share glucose telemetry service.
///
/// Holds the session id, the outcome of the last exchange, and the thresholds
/// used to classify readings. Every call performs its HTTP exchanges over
/// fresh connections opened through the connector and blocks until they
/// finish. Failures never surface as errors: they are logged and reported
/// through empty results, the sentinel reading, and [`account_status`].
///
/// [`account_status`]: ShareClient::account_status
pub struct ShareClient<K: Connect> {
    http: Client<K>,
    region: Region,
    session_id: Token,
    account_status: AccountStatus,
    /// Thresholds applied to every reading fetched from now on.
    pub thresholds: Thresholds,
}

impl<K: Connect> ShareClient<K> {
    /// Creates a logged-out client with the default thresholds.
    pub fn new(connector: K) -> Self {
        Self::with_thresholds(connector, Thresholds::default())
    }

    /// Creates a logged-out client with custom thresholds.
    pub fn with_thresholds(connector: K, thresholds: Thresholds) -> Self {
        Self {
            http: Client::new(connector),
            region: Region::default(),
            session_id: Token::new(),
            account_status: AccountStatus::LoggedOut,
            thresholds,
        }
    }

    /// Outcome of the most recent exchange with the service.
    pub fn account_status(&self) -> AccountStatus {
        self.account_status
    }

    /// Current session id, empty when there is no session.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Whether a session id is held.
    pub fn is_logged_in(&self) -> bool {
        !self.session_id.is_empty()
    }

    /// Region selected by the last [`create_session`](Self::create_session).
    pub fn region(&self) -> Region {
        self.region
    }

    /// Get a reference to the underlying connector
    pub fn connector(&self) -> &K {
        self.http.connector()
    }

    /// Get a mutable reference to the underlying connector
    pub fn connector_mut(&mut self) -> &mut K {
        self.http.connector_mut()
    }

    /// Logs in with the two-step handshake: the user name is exchanged for an
    /// account id, which is exchanged for a session id.
    ///
    /// Returns `true` when both steps produced a token. On failure the
    /// previous session id is discarded and [`account_status`] tells why, when
    /// the service said so.
    ///
    /// [`account_status`]: ShareClient::account_status
    pub fn create_session(&mut self, username: &str, password: &str, region: Region) -> bool {
        self.region = region;
        self.session_id.clear();

        let session_id = self
            .fetch_account_id(username, password)
            .and_then(|account_id| self.fetch_session_id(&account_id, password));

        match session_id {
            Ok(session_id) => {
                self.session_id = session_id;
                self.account_status = AccountStatus::LoggedIn;
                log_info!("logged in to {}", self.region.host());
                true
            }
            Err(err) => {
                log_warn!("login failed: {} ({})", err, self.account_status);
                false
            }
        }
    }

    /// Forgets the local session. No request is sent.
    pub fn end_session(&mut self) {
        self.session_id.clear();
        self.account_status = AccountStatus::LoggedOut;
    }

    /// Fetches up to `max_count` readings from the last `minutes` minutes,
    /// newest first as the service returns them.
    ///
    /// `minutes` must be within `1..=1440` and `max_count` within `1..=288`.
    /// At most [`MAX_READINGS`] (48) readings are returned: a larger
    /// `max_count` is lowered to it before the request is sent. Any failure
    /// yields an empty result.
    pub fn get_glucose(&mut self, minutes: u16, max_count: u16) -> Vec<Reading, MAX_READINGS> {
        match self.try_get_glucose(minutes, max_count) {
            Ok(readings) => readings,
            Err(err) => {
                log_warn!("no glucose readings: {}", err);
                Vec::new()
            }
        }
    }

    /// Latest reading from the last 10 minutes, or [`Reading::UNAVAILABLE`].
    pub fn get_last_glucose(&mut self) -> Reading {
        self.get_glucose(10, 1)
            .first()
            .copied()
            .unwrap_or(Reading::UNAVAILABLE)
    }

    fn try_get_glucose(&mut self, minutes: u16, max_count: u16) -> Result<Vec<Reading, MAX_READINGS>, Error> {
        if !(1..=MAX_MINUTES).contains(&minutes) || !(1..=MAX_COUNT).contains(&max_count) {
            return Err(Error::InvalidArgument);
        }
        if self.session_id.is_empty() {
            return Err(Error::NotLoggedIn);
        }

        let capacity = MAX_READINGS as u16;
        let max_count = if max_count > capacity {
            log_warn!("max count {} clamped to {}", max_count, capacity);
            capacity
        } else {
            max_count
        };

        let mut buf = [0u8; MAX_PAYLOAD_LEN];
        let payload = encode(
            &ReadingsRequest {
                session_id: &self.session_id,
                minutes,
                max_count,
            },
            &mut buf,
        )?;

        let response = self.post(READINGS_ENDPOINT, payload)?;
        let body = response.body_str().map_err(|_| Error::InvalidUtf8)?;
        parse_readings(body, &self.thresholds)
    }

    fn fetch_account_id(&mut self, username: &str, password: &str) -> Result<Token, Error> {
        let mut buf = [0u8; MAX_PAYLOAD_LEN];
        let payload = encode(
            &AuthenticateRequest {
                account_name: username,
                password,
                application_id: APPLICATION_ID,
            },
            &mut buf,
        )?;
        self.post_for_token(AUTHENTICATE_ENDPOINT, payload)
    }

    fn fetch_session_id(&mut self, account_id: &str, password: &str) -> Result<Token, Error> {
        let mut buf = [0u8; MAX_PAYLOAD_LEN];
        let payload = encode(
            &LoginRequest {
                account_id,
                password,
                application_id: APPLICATION_ID,
            },
            &mut buf,
        )?;
        self.post_for_token(LOGIN_ENDPOINT, payload)
    }

    fn post_for_token(&mut self, path: &str, payload: &[u8]) -> Result<Token, Error> {
        let response = self.post(path, payload)?;
        let body = response.body_str().map_err(|_| Error::InvalidUtf8)?;
        let token = extract_token(body);
        if token.is_empty() {
            log_warn!("no token in response from {}: {}", path, body);
            self.account_status = AccountStatus::EmptyToken;
            return Err(Error::EmptyToken);
        }
        Ok(token)
    }

    /// Posts a JSON payload and returns the response only when it is a 200.
    ///
    /// A 500 updates the account status from the error codes in its body.
    fn post(&mut self, path: &str, payload: &[u8]) -> Result<Response, Error> {
        let headers = json_headers()?;
        let request = Request {
            method: Method::Post,
            host: self.region.host(),
            port: HTTPS_PORT,
            path,
            headers,
            body: Some(payload),
        };

        let response = self.http.request(&request).map_err(|err| {
            log_error!("request to {} failed: {}", path, err);
            Error::Network(err)
        })?;

        if response.status_code == 200 {
            return Ok(response);
        }

        let body = core::str::from_utf8(&response.body).unwrap_or("");
        if response.status_code == 500 {
            let json = error_object(body);
            if let Some(status) = classify_server_error(json) {
                self.account_status = status;
            }
            log_error!("error 500 response: {}", json);
            return Err(Error::ServerError);
        }

        log_error!("HTTP error {}: {}", response.status_code, body);
        Err(Error::HttpStatus(response.status_code))
    }
}

/// `Content-Type` and `Accept` headers for a JSON exchange.
pub(super) fn json_headers<const N: usize>() -> Result<Vec<Header, N>, Error> {
    let mut headers = Vec::new();
    for name in ["Content-Type", "Accept"] {
        headers
            .push(Header::new(name, "application/json")?)
            .map_err(|_| Error::Network(NetworkError::BufferOverflow))?;
    }
    Ok(headers)
}

impl<K: Connect> core::fmt::Debug for ShareClient<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShareClient")
            .field("region", &self.region)
            .field("logged_in", &self.is_logged_in())
            .field("account_status", &self.account_status)
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}
