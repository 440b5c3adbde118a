//! Sub-stream arena shared by the sequential and seekable engines

use std::io::{self, Read};

use tracing::{trace, warn};

use crate::close::Close;
use crate::error::Error;

/// One concatenated handle and what the engine knows about it.
#[derive(Debug)]
pub(crate) struct SubStream<R> {
    pub(crate) handle: R,
    /// Total byte length, `0` when unmeasured
    pub(crate) length: u64,
    /// Last known local offset
    pub(crate) cursor: u64,
}

impl<R> SubStream<R> {
    pub(crate) const fn new(handle: R, length: u64) -> Self {
        Self {
            handle,
            length,
            cursor: 0,
        }
    }
}

/// Ordered sub-streams plus the active index and aggregate length.
///
/// `current == streams.len()` means every sub-stream has been read to its
/// end.
#[derive(Debug)]
pub(crate) struct Chain<R> {
    pub(crate) streams: Vec<SubStream<R>>,
    pub(crate) current: usize,
    pub(crate) length: u64,
}

impl<R> Chain<R> {
    pub(crate) fn new(streams: Vec<SubStream<R>>) -> Self {
        let length = streams.iter().map(|s| s.length).sum();
        Self {
            streams,
            current: 0,
            length,
        }
    }

    /// Global offset of the first byte of sub-stream `index`.
    pub(crate) fn offset_of(&self, index: usize) -> u64 {
        self.streams.iter().take(index).map(|s| s.length).sum()
    }

    /// Consume the chain, returning the handles in order.
    pub(crate) fn into_handles(self) -> Vec<R> {
        self.streams.into_iter().map(|s| s.handle).collect()
    }
}

impl<R: Read> Chain<R> {
    pub(crate) fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < buf.len() && self.current < self.streams.len() {
            let stream = &mut self.streams[self.current];
            let n = stream.handle.read(&mut buf[written..])?;
            if n == 0 {
                trace!("Sub-stream {} exhausted", self.current);
                self.current += 1;
                continue;
            }
            stream.cursor += n as u64;
            written += n;
        }
        Ok(written)
    }
}

impl<R: Close> Chain<R> {
    /// Close every handle, then drop them.
    ///
    /// All handles are attempted; state is cleared whatever the outcome.
    pub(crate) fn close(&mut self) -> io::Result<()> {
        let mut messages = Vec::new();
        for (index, stream) in self.streams.iter_mut().enumerate() {
            if let Err(e) = stream.handle.close() {
                warn!("Failed to close sub-stream {}: {}", index, e);
                messages.push(e.to_string());
            }
        }

        self.streams.clear();
        self.current = 0;
        self.length = 0;

        if messages.is_empty() {
            Ok(())
        } else {
            Err(Error::Close { messages }.into())
        }
    }
}
