//! JSON payloads exchanged with the Share service.
//!
//! Requests are serialized with `serde-json-core`, so credentials are escaped
//! properly whatever they contain. Responses are small and come in three
//! shapes: a bare JSON string (login tokens), an array of reading objects, or
//! an error object on status 500.

use super::classifier::{Thresholds, trend_from_label};
use super::error::Error;
use super::types::{AccountStatus, Reading};
use super::MAX_READINGS;
use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

/// Capacity of a serialized request payload.
pub const MAX_PAYLOAD_LEN: usize = 512;
/// Capacity of an account or session id.
pub const MAX_TOKEN_LEN: usize = 64;

/// An account id or session id.
pub type Token = String<MAX_TOKEN_LEN>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AuthenticateRequest<'a> {
    pub account_name: &'a str,
    pub password: &'a str,
    pub application_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LoginRequest<'a> {
    pub account_id: &'a str,
    pub password: &'a str,
    pub application_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReadingsRequest<'a> {
    pub session_id: &'a str,
    pub minutes: u16,
    pub max_count: u16,
}

#[derive(Debug, Deserialize)]
struct RawReading<'a> {
    #[serde(rename = "Value")]
    value: i32,
    #[serde(rename = "Trend", borrow)]
    trend: &'a str,
    #[serde(rename = "WT", borrow)]
    wt: &'a str,
}

/// Serializes `value` into `buf`, returning the written prefix.
pub(super) fn encode<'b, T: Serialize>(value: &T, buf: &'b mut [u8]) -> Result<&'b [u8], Error> {
    let len = serde_json_core::to_slice(value, buf).map_err(|_| Error::Serialize)?;
    Ok(&buf[..len])
}

/// Extracts the token from a body holding a single JSON string literal.
///
/// JSON escapes in the literal are decoded. Bodies that are not a JSON string
/// fall back to the text between the first and last `"`. An empty token means
/// nothing usable was found.
pub fn extract_token(body: &str) -> Token {
    let mut scratch = [0u8; MAX_TOKEN_LEN];
    if let Ok((token, _)) = serde_json_core::from_str_escaped::<Token>(body.trim(), &mut scratch) {
        return token;
    }
    String::try_from(strip_quotes(body)).unwrap_or_else(|_| {
        log_warn!("token longer than {} bytes", MAX_TOKEN_LEN);
        String::new()
    })
}

/// Text strictly between the first and last `"`, empty when there are fewer
/// than two quotes.
pub fn strip_quotes(body: &str) -> &str {
    match (body.find('"'), body.rfind('"')) {
        (Some(start), Some(end)) if start < end => &body[start + 1..end],
        _ => "",
    }
}

/// Isolates the JSON object in a 500 response: the text from the first `{`
/// through the last `}`.
pub fn error_object(body: &str) -> &str {
    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => "",
    }
}

/// Maps the error codes found in a 500 response to an account status.
///
/// When several codes appear the one checked last wins.
pub fn classify_server_error(json: &str) -> Option<AccountStatus> {
    const CODES: [(&str, AccountStatus); 5] = [
        ("SessionNotValid", AccountStatus::SessionNotValid),
        ("sessionIdNotFound", AccountStatus::SessionNotFound),
        ("SSO_AuthenticateAccountNotFound", AccountStatus::AccountNotFound),
        ("AccountPasswordInvalid", AccountStatus::PasswordInvalid),
        ("SSO_AuthenticateMaxAttemptsExceeed", AccountStatus::MaxAttemptsExceeded),
    ];

    let mut status = None;
    for (code, matched) in CODES {
        if json.contains(code) {
            status = Some(matched);
        }
    }

    if json.contains("InvalidArgument") {
        if json.contains("accountName") {
            status = Some(AccountStatus::UsernameNullEmpty);
        } else if json.contains("password") {
            status = Some(AccountStatus::PasswordNullEmpty);
        }
    }
    status
}

/// Parses the `Date(<millis>[<sign><offset>])` token of a reading.
///
/// The signed timezone offset is discarded; a missing `)` or non-digit
/// milliseconds yield `None`.
pub fn parse_timestamp(wt: &str) -> Option<u64> {
    let inner = wt.strip_prefix("Date(")?;
    let inner = &inner[..inner.find(')')?];
    let millis = inner
        .trim_start_matches(['+', '-'])
        .split(['+', '-'])
        .next()?;
    if millis.is_empty() || !millis.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    millis.parse::<u64>().ok()
}

/// Builds a classified reading from one JSON object of the readings array.
pub fn parse_reading(record: &str, thresholds: &Thresholds) -> Result<Reading, Error> {
    let (raw, _) = serde_json_core::from_str::<RawReading>(record).map_err(|_| Error::Json)?;
    if !raw.wt.starts_with("Date(") {
        return Err(Error::Json);
    }
    let timestamp = parse_timestamp(raw.wt).ok_or(Error::Json)?;

    let trend = trend_from_label(raw.trend);
    Ok(Reading {
        value: raw.value,
        trend,
        advanced_trend: thresholds.advanced_trend(raw.value, trend),
        range: thresholds.range(raw.value),
        timestamp,
    })
}

/// Parses a readings response.
///
/// A body that is not a well-formed JSON array is an error. Records that fail
/// validation are logged and skipped; the rest keep their order.
pub fn parse_readings(body: &str, thresholds: &Thresholds) -> Result<Vec<Reading, MAX_READINGS>, Error> {
    let mut readings = Vec::new();
    let mut seen = 0usize;

    for record in ArrayElements::new(body)? {
        let record = record?;
        seen += 1;
        match parse_reading(record, thresholds) {
            Ok(reading) => {
                if readings.push(reading).is_err() {
                    log_warn!("more than {} readings, dropping the rest", MAX_READINGS);
                    break;
                }
            }
            Err(_) => log_warn!("invalid reading skipped: {}", record),
        }
    }

    if seen == 0 {
        log_info!("no glucose data");
    }
    Ok(readings)
}

/// Iterator over the top-level elements of a JSON array, yielding each
/// element's source text.
///
/// Strings and nested containers are skipped over so that commas inside them
/// do not split elements. Structural problems are yielded as
/// [`Error::Json`] and end the iteration.
#[derive(Debug)]
pub struct ArrayElements<'a> {
    rest: &'a str,
}

impl<'a> ArrayElements<'a> {
    /// Fails unless `body` is enclosed in `[` and `]`.
    pub fn new(body: &'a str) -> Result<Self, Error> {
        let rest = body
            .trim()
            .strip_prefix('[')
            .and_then(|inner| inner.strip_suffix(']'))
            .ok_or(Error::Json)?;
        Ok(Self { rest })
    }

    fn fail(&mut self) -> Option<Result<&'a str, Error>> {
        self.rest = "";
        Some(Err(Error::Json))
    }
}

impl<'a> Iterator for ArrayElements<'a> {
    type Item = Result<&'a str, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.trim_start();
        if rest.is_empty() {
            return None;
        }

        let mut depth = 0usize;
        let mut in_string = false;
        let mut escape_next = false;
        let mut end = None;

        for (i, byte) in rest.bytes().enumerate() {
            if escape_next {
                escape_next = false;
                continue;
            }
            match byte {
                b'\\' if in_string => escape_next = true,
                b'"' => in_string = !in_string,
                b'{' | b'[' if !in_string => depth += 1,
                b'}' | b']' if !in_string => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return self.fail(),
                },
                b',' if !in_string && depth == 0 => {
                    end = Some(i);
                    break;
                }
                _ => {}
            }
        }

        if in_string || depth != 0 {
            return self.fail();
        }

        let (element, remaining) = match end {
            Some(i) => (&rest[..i], &rest[i + 1..]),
            None => (rest, ""),
        };
        let element = element.trim();
        if element.is_empty() {
            return self.fail();
        }
        // A trailing comma leaves nothing after the separator.
        if end.is_some() && remaining.trim().is_empty() {
            return self.fail();
        }
        self.rest = remaining;
        Some(Ok(element))
    }
}
