//! Scripted connector for driving the HTTP and Share clients without a network.
#![allow(dead_code)]

use libcgm::network::error::Error;
use libcgm::network::{Close, Connect, Connection, Read, Write};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// What a connection does once its scripted bytes are used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    /// Report end of stream.
    Close,
    /// Report a read timeout, like a stalled peer.
    Timeout,
}

#[derive(Debug)]
struct Script {
    data: Vec<u8>,
    end: End,
}

/// One connection handed out by [`MockConnector`].
#[derive(Debug)]
pub struct MockConnection {
    data: Vec<u8>,
    read_pos: usize,
    max_read: usize,
    end: End,
    written: Rc<RefCell<Vec<u8>>>,
    closed: Rc<Cell<usize>>,
}

impl Read for MockConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.read_pos >= self.data.len() {
            return match self.end {
                End::Close => Ok(0),
                End::Timeout => Err(Error::Timeout),
            };
        }
        let remaining = self.data.len() - self.read_pos;
        let to_read = buf.len().min(remaining).min(self.max_read);
        buf[..to_read].copy_from_slice(&self.data[self.read_pos..self.read_pos + to_read]);
        self.read_pos += to_read;
        Ok(to_read)
    }
}

impl Write for MockConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        // Accept at most 100 bytes per call to exercise partial writes.
        let n = buf.len().min(100);
        self.written.borrow_mut().extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for MockConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        self.closed.set(self.closed.get() + 1);
        Ok(())
    }
}

impl Connection for MockConnection {}

/// Hands out one scripted connection per `connect` call, in order. Once the
/// script runs out every further connect is refused.
#[derive(Debug)]
pub struct MockConnector {
    scripts: VecDeque<Option<Script>>,
    max_read: usize,
    pub remotes: Vec<String>,
    requests: Vec<Rc<RefCell<Vec<u8>>>>,
    closed: Rc<Cell<usize>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self {
            scripts: VecDeque::new(),
            max_read: usize::MAX,
            remotes: Vec::new(),
            requests: Vec::new(),
            closed: Rc::new(Cell::new(0)),
        }
    }

    /// Queues a connection that replies with `raw` and then closes.
    pub fn with(mut self, raw: Vec<u8>) -> Self {
        self.push(raw);
        self
    }

    /// Queues a refused connection attempt.
    pub fn refusing(mut self) -> Self {
        self.scripts.push_back(None);
        self
    }

    /// Queues a connection that replies with `raw` and then stalls.
    pub fn stalling(mut self, raw: Vec<u8>) -> Self {
        self.scripts.push_back(Some(Script {
            data: raw,
            end: End::Timeout,
        }));
        self
    }

    /// Limits every read to `max_read` bytes.
    pub fn trickle(mut self, max_read: usize) -> Self {
        self.max_read = max_read;
        self
    }

    pub fn push(&mut self, raw: Vec<u8>) {
        self.scripts.push_back(Some(Script {
            data: raw,
            end: End::Close,
        }));
    }

    /// Number of connections opened so far.
    pub fn connections(&self) -> usize {
        self.requests.len()
    }

    /// Number of connections closed so far.
    pub fn closed(&self) -> usize {
        self.closed.get()
    }

    /// Everything written on connection `index`.
    pub fn request(&self, index: usize) -> String {
        String::from_utf8(self.requests[index].borrow().clone()).unwrap()
    }

    /// The part of request `index` after the header block.
    pub fn request_body(&self, index: usize) -> String {
        let request = self.request(index);
        let start = request.find("\r\n\r\n").expect("no header terminator") + 4;
        request[start..].to_string()
    }
}

impl Connect for MockConnector {
    type Connection = MockConnection;
    type Error = Error;

    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error> {
        self.remotes.push(remote.to_string());
        let Some(Some(script)) = self.scripts.pop_front() else {
            return Err(Error::ConnectionRefused);
        };
        let written = Rc::new(RefCell::new(Vec::new()));
        self.requests.push(written.clone());
        Ok(MockConnection {
            data: script.data,
            read_pos: 0,
            max_read: self.max_read,
            end: script.end,
            written,
            closed: self.closed.clone(),
        })
    }
}

/// `200 OK` with a `Content-Length` body.
pub fn ok_json(body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    )
    .into_bytes()
}

/// `200 OK` with the body split into the given chunks.
pub fn ok_chunked(chunks: &[&str]) -> Vec<u8> {
    let mut raw = String::from("HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n");
    for chunk in chunks {
        raw.push_str(&format!("{:x}\r\n{}\r\n", chunk.len(), chunk));
    }
    raw.push_str("0\r\n\r\n");
    raw.into_bytes()
}

/// Any status with a body delimited by connection close.
pub fn status(code: u16, reason: &str, body: &str) -> Vec<u8> {
    format!("HTTP/1.1 {code} {reason}\r\nContent-Type: application/json\r\n\r\n{body}").into_bytes()
}
