//! Widening narrower capabilities with inert operations

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::close::Close;
use crate::delegate::{Delegator, Fallback};

/// Forwards whatever `T` supports and adds a [`Close`] that does nothing.
#[derive(Debug, Clone, Default)]
pub struct Nop<T> {
    inner: T,
}

impl<T> Nop<T> {
    /// Wrap `inner`.
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped value.
    pub const fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the wrapped value.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read> Read for Nop<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<T: Write> Write for Nop<T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<T: Seek> Seek for Nop<T> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl<T> Close for Nop<T> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Add a no-op close to `inner`.
pub const fn nop_closer<T>(inner: T) -> Nop<T> {
    Nop::new(inner)
}

/// Widen a plain reader into read + seek + close.
///
/// Seek always reports offset `0` and close always succeeds; neither
/// touches the reader.
pub fn nop_read_seek_closer<R: Read + 'static>(reader: R) -> Delegator {
    Delegator::reader(reader).with_fallback(Fallback::Nop)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::close::ReadSeekClose;
    use std::io::Cursor;

    #[test]
    fn test_nop_closer_forwards_and_closes_silently() {
        let mut r = nop_closer(Cursor::new(b"abcdef".to_vec()));
        assert_eq!(r.seek(SeekFrom::Start(3)).unwrap(), 3);
        let mut out = String::new();
        r.read_to_string(&mut out).unwrap();
        assert_eq!(out, "def");
        r.close().unwrap();
        assert_eq!(r.into_inner().into_inner(), b"abcdef");
    }

    #[test]
    fn test_nop_read_seek_closer_widens_plain_reader() {
        let reader: &'static [u8] = b"plain";
        let mut widened: Box<dyn ReadSeekClose> = Box::new(nop_read_seek_closer(reader));
        assert_eq!(widened.seek(SeekFrom::End(0)).unwrap(), 0);
        let mut out = String::new();
        widened.read_to_string(&mut out).unwrap();
        assert_eq!(out, "plain");
        widened.close().unwrap();
    }
}
