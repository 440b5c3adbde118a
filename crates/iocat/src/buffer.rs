//! Growable in-memory write buffer with seeking

use std::io::{self, Seek, SeekFrom, Write};

use crate::close::Close;

/// In-memory [`Write`] + [`Seek`] target.
///
/// Writes overwrite at the current offset and grow the buffer as needed;
/// a gap left by seeking past the end is zero-filled on the next write.
///
/// ```
/// use iocat::WriteSeekBuffer;
/// use std::io::{Seek, SeekFrom, Write};
///
/// let mut b = WriteSeekBuffer::with_capacity(0);
/// b.write_all(b"Hello!").unwrap();
/// b.truncate(b.len() as i64 - 1);
/// b.write_all(b" world!").unwrap();
/// assert_eq!(b.bytes(), b"Hello world!");
///
/// b.seek(SeekFrom::End(-1)).unwrap();
/// b.write_all(b"?").unwrap();
/// assert_eq!(b.bytes(), b"Hello world?");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSeekBuffer {
    buf: Vec<u8>,
    off: usize,
}

fn clamp_offset(target: i128) -> usize {
    usize::try_from(target.max(0)).unwrap_or(usize::MAX)
}

impl WriteSeekBuffer {
    /// An empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            off: 0,
        }
    }

    /// A buffer holding `buf`, positioned at its end.
    pub fn from_bytes(buf: Vec<u8>) -> Self {
        let off = buf.len();
        Self { buf, off }
    }

    /// Current write offset.
    pub const fn offset(&self) -> usize {
        self.off
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The bytes held.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Unwrap into the bytes held.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Resize to `n` bytes and move the offset there.
    ///
    /// A negative `n` is relative to the current offset. The result is
    /// clamped at zero; growing zero-fills.
    pub fn truncate(&mut self, n: i64) {
        let target = if n < 0 {
            self.off as i128 + i128::from(n)
        } else {
            i128::from(n)
        };
        let n = clamp_offset(target);
        self.buf.resize(n, 0);
        self.off = n;
    }
}

impl Write for WriteSeekBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if data.is_empty() {
            return Ok(0);
        }
        let Some(end) = self.off.checked_add(data.len()) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "write past the maximum buffer offset",
            ));
        };
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.off..end].copy_from_slice(data);
        self.off = end;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Targets before the start clamp to offset `0` instead of failing.
impl Seek for WriteSeekBuffer {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::Current(delta) => self.off as i128 + i128::from(delta),
            SeekFrom::End(delta) => self.buf.len() as i128 + i128::from(delta),
        };
        self.off = clamp_offset(target);
        Ok(self.off as u64)
    }
}

/// Closing empties the buffer.
impl Close for WriteSeekBuffer {
    fn close(&mut self) -> io::Result<()> {
        self.truncate(0);
        Ok(())
    }
}
