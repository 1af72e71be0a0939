//! Buffered line and byte reader over a [`Read`] source.

use crate::network::Read;
use crate::network::error::Error;
use heapless::Vec;

const READ_CHUNK: usize = 256;

/// Buffers reads from a connection so the response parser can consume it
/// line by line (headers, chunk sizes) or byte by byte (chunk data).
pub(super) struct LineReader<'a, R: Read> {
    source: &'a mut R,
    buf: [u8; READ_CHUNK],
    pos: usize,
    len: usize,
    eof: bool,
}

impl<'a, R: Read> LineReader<'a, R> {
    pub(super) fn new(source: &'a mut R) -> Self {
        Self {
            source,
            buf: [0; READ_CHUNK],
            pos: 0,
            len: 0,
            eof: false,
        }
    }

    /// Refills the buffer. Returns `false` once the peer has closed the stream.
    fn fill(&mut self) -> Result<bool, Error> {
        if self.pos < self.len {
            return Ok(true);
        }
        if self.eof {
            return Ok(false);
        }
        match self.source.read(&mut self.buf) {
            Ok(0) => {
                self.eof = true;
                Ok(false)
            }
            Ok(n) => {
                self.pos = 0;
                self.len = n.min(READ_CHUNK);
                Ok(true)
            }
            Err(_) => Err(Error::ReadError),
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, Error> {
        if !self.fill()? {
            return Ok(None);
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    /// Reads one `\n`-terminated line into `line`, trimmed of surrounding
    /// whitespace. Bytes beyond the capacity of `line` are dropped.
    ///
    /// Returns `false` when the stream ended before any byte was read.
    pub(super) fn read_line<const N: usize>(&mut self, line: &mut Vec<u8, N>) -> Result<bool, Error> {
        line.clear();
        let mut seen_any = false;
        while let Some(byte) = self.next_byte()? {
            seen_any = true;
            if byte == b'\n' {
                break;
            }
            // Overlong lines are truncated; only the prefix is ever inspected.
            let _ = line.push(byte);
        }
        let end = line
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(0, |i| i + 1);
        line.truncate(end);
        let start = line
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(0);
        if start > 0 {
            line.rotate_left(start);
            line.truncate(end - start);
        }
        Ok(seen_any)
    }

    /// Reads exactly `count` bytes into `out`.
    ///
    /// Blocks on the underlying connection until every byte has arrived; a
    /// closed stream before that point is reported as
    /// [`Error::ConnectionClosed`].
    pub(super) fn read_exact_into<const N: usize>(
        &mut self,
        count: usize,
        out: &mut Vec<u8, N>,
    ) -> Result<(), Error> {
        if count > out.capacity() - out.len() {
            return Err(Error::BufferOverflow);
        }
        let mut remaining = count;
        while remaining > 0 {
            if !self.fill()? {
                return Err(Error::ConnectionClosed);
            }
            let available = (self.len - self.pos).min(remaining);
            out.extend_from_slice(&self.buf[self.pos..self.pos + available])
                .map_err(|_| Error::BufferOverflow)?;
            self.pos += available;
            remaining -= available;
        }
        Ok(())
    }

    /// Discards exactly `count` bytes.
    pub(super) fn skip(&mut self, count: usize) -> Result<(), Error> {
        for _ in 0..count {
            if self.next_byte()?.is_none() {
                return Err(Error::ConnectionClosed);
            }
        }
        Ok(())
    }

    /// Appends everything up to the end of the stream to `out`.
    pub(super) fn read_to_end_into<const N: usize>(&mut self, out: &mut Vec<u8, N>) -> Result<(), Error> {
        while self.fill()? {
            out.extend_from_slice(&self.buf[self.pos..self.len])
                .map_err(|_| Error::BufferOverflow)?;
            self.pos = self.len;
        }
        Ok(())
    }
}
