//! The close capability and object-safe capability groupings
//!
//! `std::io` has no closer trait: resources are released on drop. Stream
//! owners that need to observe release failures (or forward them from a
//! wrapped handle) implement [`Close`] instead.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, Write};

/// A handle that can be explicitly closed.
///
/// Callers must not use a handle after closing it. Implementations are not
/// required to be idempotent.
pub trait Close {
    /// Release the handle, reporting any failure to do so.
    fn close(&mut self) -> io::Result<()>;
}

impl<T: Close + ?Sized> Close for Box<T> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<T: Close + ?Sized> Close for &mut T {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// The descriptor is released when the file is dropped.
impl Close for File {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T> Close for Cursor<T> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Read + Close
pub trait ReadClose: Read + Close {}
impl<T: Read + Close + ?Sized> ReadClose for T {}

/// Read + Seek
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Read + Seek + Close
pub trait ReadSeekClose: Read + Seek + Close {}
impl<T: Read + Seek + Close + ?Sized> ReadSeekClose for T {}

/// Write + Seek + Close
pub trait WriteSeekClose: Write + Seek + Close {}
impl<T: Write + Seek + Close + ?Sized> WriteSeekClose for T {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_trait_objects_keep_capabilities() {
        let mut boxed: Box<dyn ReadSeekClose> = Box::new(Cursor::new(b"abc".to_vec()));
        let mut out = String::new();
        boxed.read_to_string(&mut out).unwrap();
        assert_eq!(out, "abc");
        assert_eq!(boxed.seek(io::SeekFrom::Start(1)).unwrap(), 1);
        boxed.close().unwrap();
    }
}
