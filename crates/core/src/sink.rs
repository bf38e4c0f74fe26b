//! Output sink for the HTML converter.
//!
//! `HTMLConverter` discards the result of every write, so the writer it is
//! given must remember failures itself. `LatchingWriter` counts the bytes that
//! reached the inner writer and keeps the first error; once latched, further
//! writes are refused so nothing is written past a hole.

use std::io::{self, Write};

pub struct LatchingWriter<W: Write> {
    inner: W,
    written: u64,
    error: Option<io::Error>,
}

impl<W: Write> LatchingWriter<W> {
    pub const fn new(inner: W) -> Self {
        Self {
            inner,
            written: 0,
            error: None,
        }
    }

    /// Bytes accepted by the inner writer so far.
    pub const fn written(&self) -> u64 {
        self.written
    }

    /// Flush, then hand back the inner writer and byte count, or the first
    /// error seen.
    pub fn finish(mut self) -> io::Result<(W, u64)> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.inner.flush()?;
        Ok((self.inner, self.written))
    }

    fn latch(&mut self, err: &io::Error) -> io::Error {
        if self.error.is_none() {
            self.error = Some(io::Error::new(err.kind(), err.to_string()));
        }
        io::Error::new(err.kind(), err.to_string())
    }

    fn latched(&self) -> Option<io::Error> {
        self.error
            .as_ref()
            .map(|err| io::Error::new(err.kind(), err.to_string()))
    }
}

impl<W: Write> Write for LatchingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(err) = self.latched() {
            return Err(err);
        }
        match self.inner.write(buf) {
            Ok(n) => {
                self.written += n as u64;
                Ok(n)
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => Err(err),
            Err(err) => Err(self.latch(&err)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(err) = self.latched() {
            return Err(err);
        }
        match self.inner.flush() {
            Ok(()) => Ok(()),
            Err(err) => Err(self.latch(&err)),
        }
    }
}
