//! Closure-backed stream capabilities
//!
//! A [`Delegator`] implements [`Read`], [`Write`], [`Seek`] and [`Close`] by
//! calling an optional closure per operation. The `Delegator::reader` family
//! binds the operations of an existing object, after which any single
//! operation can be replaced:
//!
//! ```
//! use iocat::Delegator;
//! use std::io::{self, Cursor, Read};
//!
//! let mut r = Delegator::reader(Cursor::new(b"original".to_vec()))
//!     .with_read(|_| Err(io::Error::other("custom")));
//!
//! let err = r.read_to_end(&mut Vec::new()).unwrap_err();
//! assert_eq!(err.to_string(), "custom");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::rc::Rc;

use crate::close::Close;
use crate::error::not_implemented;

/// Read operation
pub type ReadFn = Box<dyn FnMut(&mut [u8]) -> io::Result<usize>>;
/// Write operation
pub type WriteFn = Box<dyn FnMut(&[u8]) -> io::Result<usize>>;
/// Seek operation
pub type SeekFn = Box<dyn FnMut(SeekFrom) -> io::Result<u64>>;
/// Close operation
pub type CloseFn = Box<dyn FnMut() -> io::Result<()>>;

/// Behavior of an operation that has no closure bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fallback {
    /// Fail with [`crate::Error::NotImplemented`]
    #[default]
    NotImplemented,
    /// Succeed with a zero value: `Ok(0)` for read, write and seek, `Ok(())`
    /// for close
    Nop,
}

impl Fallback {
    /// Result of an unbound operation returning a count or an offset.
    pub fn zero<T: Default>(self) -> io::Result<T> {
        match self {
            Self::NotImplemented => Err(not_implemented()),
            Self::Nop => Ok(T::default()),
        }
    }
}

/// Stream capabilities backed by per-operation closures.
///
/// Each operation defaults independently according to [`Fallback`].
/// Objects bound by the constructors are shared between the closures through
/// `Rc<RefCell<_>>`, so a `Delegator` is neither `Send` nor `Sync`.
#[derive(Default)]
pub struct Delegator {
    /// Called by [`Read::read`]
    pub read_fn: Option<ReadFn>,
    /// Called by [`Write::write`]
    pub write_fn: Option<WriteFn>,
    /// Called by [`Seek::seek`]
    pub seek_fn: Option<SeekFn>,
    /// Called by [`Close::close`]
    pub close_fn: Option<CloseFn>,
    /// Behavior of operations without a closure
    pub fallback: Fallback,
}

fn share<T>(inner: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(inner))
}

fn bind_read<T: Read + 'static>(inner: &Rc<RefCell<T>>) -> ReadFn {
    let inner = Rc::clone(inner);
    Box::new(move |buf| inner.borrow_mut().read(buf))
}

fn bind_write<T: Write + 'static>(inner: &Rc<RefCell<T>>) -> WriteFn {
    let inner = Rc::clone(inner);
    Box::new(move |buf| inner.borrow_mut().write(buf))
}

fn bind_seek<T: Seek + 'static>(inner: &Rc<RefCell<T>>) -> SeekFn {
    let inner = Rc::clone(inner);
    Box::new(move |pos| inner.borrow_mut().seek(pos))
}

fn bind_close<T: Close + 'static>(inner: &Rc<RefCell<T>>) -> CloseFn {
    let inner = Rc::clone(inner);
    Box::new(move || inner.borrow_mut().close())
}

impl Delegator {
    /// An empty delegator; every operation uses the fallback.
    pub fn new(fallback: Fallback) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    /// Delegate read.
    pub fn reader<T: Read + 'static>(inner: T) -> Self {
        let inner = share(inner);
        Self {
            read_fn: Some(bind_read(&inner)),
            ..Self::default()
        }
    }

    /// Delegate read and close.
    pub fn read_closer<T: Read + Close + 'static>(inner: T) -> Self {
        let inner = share(inner);
        Self {
            read_fn: Some(bind_read(&inner)),
            close_fn: Some(bind_close(&inner)),
            ..Self::default()
        }
    }

    /// Delegate read and seek.
    pub fn read_seeker<T: Read + Seek + 'static>(inner: T) -> Self {
        let inner = share(inner);
        Self {
            read_fn: Some(bind_read(&inner)),
            seek_fn: Some(bind_seek(&inner)),
            ..Self::default()
        }
    }

    /// Delegate read, seek and close.
    pub fn read_seek_closer<T: Read + Seek + Close + 'static>(inner: T) -> Self {
        let inner = share(inner);
        Self {
            read_fn: Some(bind_read(&inner)),
            seek_fn: Some(bind_seek(&inner)),
            close_fn: Some(bind_close(&inner)),
            ..Self::default()
        }
    }

    /// Delegate read and write.
    pub fn read_writer<T: Read + Write + 'static>(inner: T) -> Self {
        let inner = share(inner);
        Self {
            read_fn: Some(bind_read(&inner)),
            write_fn: Some(bind_write(&inner)),
            ..Self::default()
        }
    }

    /// Delegate read, write and close.
    pub fn read_write_closer<T: Read + Write + Close + 'static>(inner: T) -> Self {
        let inner = share(inner);
        Self {
            read_fn: Some(bind_read(&inner)),
            write_fn: Some(bind_write(&inner)),
            close_fn: Some(bind_close(&inner)),
            ..Self::default()
        }
    }

    /// Delegate read, write and seek.
    pub fn read_write_seeker<T: Read + Write + Seek + 'static>(inner: T) -> Self {
        let inner = share(inner);
        Self {
            read_fn: Some(bind_read(&inner)),
            write_fn: Some(bind_write(&inner)),
            seek_fn: Some(bind_seek(&inner)),
            ..Self::default()
        }
    }

    /// Delegate write.
    pub fn writer<T: Write + 'static>(inner: T) -> Self {
        let inner = share(inner);
        Self {
            write_fn: Some(bind_write(&inner)),
            ..Self::default()
        }
    }

    /// Delegate write and close.
    pub fn write_closer<T: Write + Close + 'static>(inner: T) -> Self {
        let inner = share(inner);
        Self {
            write_fn: Some(bind_write(&inner)),
            close_fn: Some(bind_close(&inner)),
            ..Self::default()
        }
    }

    /// Delegate write and seek.
    pub fn write_seeker<T: Write + Seek + 'static>(inner: T) -> Self {
        let inner = share(inner);
        Self {
            write_fn: Some(bind_write(&inner)),
            seek_fn: Some(bind_seek(&inner)),
            ..Self::default()
        }
    }

    /// Delegate write, seek and close.
    pub fn write_seek_closer<T: Write + Seek + Close + 'static>(inner: T) -> Self {
        let inner = share(inner);
        Self {
            write_fn: Some(bind_write(&inner)),
            seek_fn: Some(bind_seek(&inner)),
            close_fn: Some(bind_close(&inner)),
            ..Self::default()
        }
    }

    /// Replace the read operation.
    #[must_use]
    pub fn with_read<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut [u8]) -> io::Result<usize> + 'static,
    {
        self.read_fn = Some(Box::new(f));
        self
    }

    /// Replace the write operation.
    #[must_use]
    pub fn with_write<F>(mut self, f: F) -> Self
    where
        F: FnMut(&[u8]) -> io::Result<usize> + 'static,
    {
        self.write_fn = Some(Box::new(f));
        self
    }

    /// Replace the seek operation.
    #[must_use]
    pub fn with_seek<F>(mut self, f: F) -> Self
    where
        F: FnMut(SeekFrom) -> io::Result<u64> + 'static,
    {
        self.seek_fn = Some(Box::new(f));
        self
    }

    /// Replace the close operation.
    #[must_use]
    pub fn with_close<F>(mut self, f: F) -> Self
    where
        F: FnMut() -> io::Result<()> + 'static,
    {
        self.close_fn = Some(Box::new(f));
        self
    }

    /// Set the behavior of unbound operations.
    #[must_use]
    pub const fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }
}

impl fmt::Debug for Delegator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegator")
            .field("read", &self.read_fn.is_some())
            .field("write", &self.write_fn.is_some())
            .field("seek", &self.seek_fn.is_some())
            .field("close", &self.close_fn.is_some())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Read for Delegator {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.read_fn.as_mut() {
            Some(f) => f(buf),
            None => self.fallback.zero(),
        }
    }
}

impl Write for Delegator {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.write_fn.as_mut() {
            Some(f) => f(buf),
            None => self.fallback.zero(),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for Delegator {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self.seek_fn.as_mut() {
            Some(f) => f(pos),
            None => self.fallback.zero(),
        }
    }
}

impl Close for Delegator {
    fn close(&mut self) -> io::Result<()> {
        match self.close_fn.as_mut() {
            Some(f) => f(),
            None => self.fallback.zero(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::is_not_implemented;
    use std::cell::Cell;
    use std::io::Cursor;

    #[test]
    fn test_reader_delegates_read_only() {
        let mut d = Delegator::reader(Cursor::new(b"abc".to_vec()));
        let mut out = String::new();
        d.read_to_string(&mut out).unwrap();
        assert_eq!(out, "abc");

        assert!(is_not_implemented(&d.seek(SeekFrom::Start(0)).unwrap_err()));
        assert!(is_not_implemented(&d.write(b"x").unwrap_err()));
        assert!(is_not_implemented(&d.close().unwrap_err()));
    }

    #[test]
    fn test_nop_fallback_returns_zero_values() {
        let mut d = Delegator::reader(Cursor::new(b"abc".to_vec())).with_fallback(Fallback::Nop);
        assert_eq!(d.seek(SeekFrom::End(0)).unwrap(), 0);
        assert_eq!(d.write(b"xyz").unwrap(), 0);
        d.close().unwrap();

        let mut empty = Delegator::new(Fallback::Nop);
        let mut buf = [0u8; 4];
        assert_eq!(empty.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_bound_operations_share_the_inner_object() {
        let mut d = Delegator::read_write_seeker(Cursor::new(Vec::new()));
        d.write_all(b"hello").unwrap();
        assert_eq!(d.seek(SeekFrom::Start(1)).unwrap(), 1);

        let mut out = String::new();
        d.read_to_string(&mut out).unwrap();
        assert_eq!(out, "ello");
    }

    #[test]
    fn test_operations_can_be_replaced_individually() {
        let closed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&closed);
        let mut d = Delegator::read_seek_closer(Cursor::new(b"abc".to_vec()))
            .with_seek(|_| Err(io::Error::other("failed to seek")))
            .with_close(move || {
                flag.set(true);
                Ok(())
            });

        let mut buf = [0u8; 3];
        d.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"abc");
        assert_eq!(
            d.seek(SeekFrom::Start(0)).unwrap_err().to_string(),
            "failed to seek"
        );
        d.close().unwrap();
        assert!(closed.get());
    }
}
