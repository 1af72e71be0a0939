use super::reader::LineReader;
use crate::network::error::Error;
use crate::network::{Close, Connect, Connection, Read, Write};
use core::fmt::Write as _;
use heapless::{String, Vec};

const MAX_HEADERS: usize = 8;
const MAX_HEADER_NAME_LEN: usize = 32;
const MAX_HEADER_VALUE_LEN: usize = 64;
const MAX_REMOTE_LEN: usize = 96;
const MAX_LINE_LEN: usize = 128;

/// Capacity of the encoded request (request line, headers and body).
pub const MAX_REQUEST_LEN: usize = 1024;
/// Capacity of a decoded response body.
pub const MAX_BODY_LEN: usize = 8192;
/// Port used for every HTTPS request.
pub const HTTPS_PORT: u16 = 443;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Header {
    pub name: String<MAX_HEADER_NAME_LEN>,
    pub value: String<MAX_HEADER_VALUE_LEN>,
}

impl Header {
    /// Builds a header, failing when either part exceeds its buffer.
    pub fn new(name: &str, value: &str) -> Result<Self, Error> {
        Ok(Self {
            name: String::try_from(name).map_err(|_| Error::BufferOverflow)?,
            value: String::try_from(value).map_err(|_| Error::BufferOverflow)?,
        })
    }
}

/// An outgoing request.
///
/// `Host`, `Content-Length` and `Connection: close` are added by the client;
/// `headers` carries everything else.
#[derive(Debug)]
pub struct Request<'a> {
    pub method: Method,
    pub host: &'a str,
    pub port: u16,
    pub path: &'a str,
    pub headers: Vec<Header, MAX_HEADERS>,
    pub body: Option<&'a [u8]>,
}

#[derive(Debug)]
pub struct Response {
    /// Status code from the status line, `0` when none was received.
    pub status_code: u16,
    /// Whether the body arrived with `Transfer-Encoding: chunked`.
    pub chunked: bool,
    /// Decoded body.
    pub body: Vec<u8, MAX_BODY_LEN>,
}

impl Response {
    /// The body as UTF-8 text.
    pub fn body_str(&self) -> Result<&str, Error> {
        core::str::from_utf8(&self.body).map_err(|_| Error::ProtocolError)
    }
}

/// HTTP/1.1 client that opens a fresh connection for every request.
#[derive(Debug)]
pub struct Client<K: Connect> {
    connector: K,
}

impl<K: Connect> Client<K> {
    pub fn new(connector: K) -> Self {
        Self { connector }
    }

    /// Get a reference to the underlying connector
    pub fn connector(&self) -> &K {
        &self.connector
    }

    /// Get a mutable reference to the underlying connector
    pub fn connector_mut(&mut self) -> &mut K {
        &mut self.connector
    }

    /// Performs one request/response exchange.
    ///
    /// The connection is closed once the body has been read, whether or not
    /// the exchange succeeded.
    pub fn request(&mut self, request: &Request) -> Result<Response, Error> {
        let request_buf = encode_request(request)?;

        let mut remote: String<MAX_REMOTE_LEN> = String::new();
        write!(remote, "{}:{}", request.host, request.port).map_err(|_| Error::InvalidAddress)?;

        let mut connection = self.connector.connect(&remote).map_err(|_| {
            log_warn!("connection to {} failed", remote.as_str());
            Error::ConnectionRefused
        })?;

        let result = exchange(&mut connection, &request_buf);
        if connection.close().is_err() {
            log_warn!("closing connection to {} failed", remote.as_str());
        }
        result
    }
}

fn encode_request(request: &Request) -> Result<Vec<u8, MAX_REQUEST_LEN>, Error> {
    let mut request_buf: Vec<u8, MAX_REQUEST_LEN> = Vec::new();

    // Request line
    request_buf
        .extend_from_slice(request.method.as_str().as_bytes())
        .map_err(|_| Error::BufferOverflow)?;
    request_buf.push(b' ').map_err(|_| Error::BufferOverflow)?;
    request_buf
        .extend_from_slice(request.path.as_bytes())
        .map_err(|_| Error::BufferOverflow)?;
    request_buf
        .extend_from_slice(b" HTTP/1.1\r\n")
        .map_err(|_| Error::BufferOverflow)?;

    push_header(&mut request_buf, "Host", request.host)?;
    for header in &request.headers {
        push_header(&mut request_buf, &header.name, &header.value)?;
    }
    if let Some(body) = request.body {
        let mut len_str: String<20> = String::new();
        write!(len_str, "{}", body.len()).map_err(|_| Error::BufferOverflow)?;
        push_header(&mut request_buf, "Content-Length", &len_str)?;
    }
    push_header(&mut request_buf, "Connection", "close")?;

    request_buf
        .extend_from_slice(b"\r\n")
        .map_err(|_| Error::BufferOverflow)?;
    if let Some(body) = request.body {
        request_buf
            .extend_from_slice(body)
            .map_err(|_| Error::BufferOverflow)?;
    }
    Ok(request_buf)
}

fn push_header(buf: &mut Vec<u8, MAX_REQUEST_LEN>, name: &str, value: &str) -> Result<(), Error> {
    buf.extend_from_slice(name.as_bytes())
        .map_err(|_| Error::BufferOverflow)?;
    buf.extend_from_slice(b": ")
        .map_err(|_| Error::BufferOverflow)?;
    buf.extend_from_slice(value.as_bytes())
        .map_err(|_| Error::BufferOverflow)?;
    buf.extend_from_slice(b"\r\n")
        .map_err(|_| Error::BufferOverflow)
}

fn exchange<C: Connection>(connection: &mut C, request: &[u8]) -> Result<Response, Error> {
    let mut sent = 0;
    while sent < request.len() {
        let remaining = request.len() - sent;
        match connection.write(&request[sent..]) {
            Ok(n) if n == 0 || n > remaining => return Err(Error::WriteError),
            Ok(n) => sent += n,
            Err(_) => return Err(Error::WriteError),
        }
    }
    connection.flush().map_err(|_| Error::WriteError)?;

    read_response(connection)
}

fn read_response<R: Read>(source: &mut R) -> Result<Response, Error> {
    let mut reader = LineReader::new(source);
    let mut line: Vec<u8, MAX_LINE_LEN> = Vec::new();

    // --- Header phase ---
    let mut status_code = 0;
    let mut chunked = false;
    let mut content_length: Option<usize> = None;
    while reader.read_line(&mut line)? {
        if line.is_empty() {
            break;
        }
        if status_code == 0 && line.starts_with(b"HTTP/") {
            status_code = parse_status_code(&line);
        } else if let Some(value) = header_value(&line, b"Transfer-Encoding") {
            chunked = value.eq_ignore_ascii_case(b"chunked");
        } else if let Some(value) = header_value(&line, b"Content-Length") {
            content_length = core::str::from_utf8(value)
                .ok()
                .and_then(|v| v.parse::<usize>().ok());
        }
    }

    // --- Body phase ---
    let mut body: Vec<u8, MAX_BODY_LEN> = Vec::new();
    if chunked {
        loop {
            if !reader.read_line(&mut line)? {
                return Err(Error::ConnectionClosed);
            }
            let chunk_size = parse_chunk_size(&line);
            if chunk_size == 0 {
                break;
            }
            reader.read_exact_into(chunk_size, &mut body)?;
            // CRLF trailing every chunk
            reader.skip(2)?;
        }
    } else if let Some(len) = content_length {
        reader.read_exact_into(len, &mut body)?;
    } else {
        reader.read_to_end_into(&mut body)?;
    }

    Ok(Response {
        status_code,
        chunked,
        body,
    })
}

/// Reads the three digits following the first space of a status line.
fn parse_status_code(line: &[u8]) -> u16 {
    let Some(space) = line.iter().position(|&b| b == b' ') else {
        return 0;
    };
    line.get(space + 1..space + 4)
        .and_then(|digits| core::str::from_utf8(digits).ok())
        .and_then(|digits| digits.parse::<u16>().ok())
        .unwrap_or(0)
}

/// Returns the trimmed value of `line` if it is the header `name`.
fn header_value<'l>(line: &'l [u8], name: &[u8]) -> Option<&'l [u8]> {
    let colon = line.iter().position(|&b| b == b':')?;
    if !line[..colon].trim_ascii().eq_ignore_ascii_case(name) {
        return None;
    }
    Some(line[colon + 1..].trim_ascii())
}

/// Parses the leading hex digits of a chunk-size line. Extensions after `;`
/// and anything unparseable count as zero, which ends the body.
fn parse_chunk_size(line: &[u8]) -> usize {
    let digits = line
        .iter()
        .position(|b| !b.is_ascii_hexdigit())
        .map_or(line, |end| &line[..end]);
    core::str::from_utf8(digits)
        .ok()
        .and_then(|hex| usize::from_str_radix(hex, 16).ok())
        .unwrap_or(0)
}
