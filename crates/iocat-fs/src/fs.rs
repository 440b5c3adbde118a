//! Filesystem and file capabilities
//!
//! [`FileSystem`] requires only [`FileSystem::open`]. Listing, reading and
//! stat are derived from it by default; the remaining operations fail with
//! [`Error::not_implemented`] unless the implementation provides them.

use std::io::{self, Read, Write};
use std::time::SystemTime;

use iocat::{Close, not_implemented};

use crate::error::{Error, Result};

/// Metadata of a file or directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInfo {
    /// Base name
    pub name: String,
    /// Length in bytes
    pub len: u64,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Last modification time, if the platform reports one
    pub modified: Option<SystemTime>,
}

impl FileInfo {
    /// Build from host metadata.
    pub fn from_metadata(name: impl Into<String>, metadata: &std::fs::Metadata) -> Self {
        Self {
            name: name.into(),
            len: metadata.len(),
            is_dir: metadata.is_dir(),
            modified: metadata.modified().ok(),
        }
    }
}

/// An entry of a directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirEntry {
    /// Base name
    pub name: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

/// An open file or directory.
pub trait File: Read + Close {
    /// Metadata of the open file.
    fn stat(&mut self) -> io::Result<FileInfo>;

    /// Next entries of an open directory.
    ///
    /// `Some(n)` returns at most `n` entries, continuing where the previous
    /// call stopped; an empty result means the listing is exhausted. `None`
    /// returns every remaining entry.
    fn read_dir(&mut self, limit: Option<usize>) -> io::Result<Vec<DirEntry>> {
        let _ = limit;
        Err(not_implemented())
    }
}

impl<T: File + ?Sized> File for Box<T> {
    fn stat(&mut self) -> io::Result<FileInfo> {
        (**self).stat()
    }

    fn read_dir(&mut self, limit: Option<usize>) -> io::Result<Vec<DirEntry>> {
        (**self).read_dir(limit)
    }
}

/// A file that can also be written.
pub trait WriterFile: File + Write {}
impl<T: File + Write + ?Sized> WriterFile for T {}

/// A hierarchical filesystem addressed by slash-separated relative names.
pub trait FileSystem {
    /// Open the named file or directory for reading.
    fn open(&self, name: &str) -> Result<Box<dyn File>>;

    /// Entries of the named directory, sorted by name.
    fn read_dir(&self, name: &str) -> Result<Vec<DirEntry>> {
        let mut dir = self.open(name)?;
        let mut entries = dir
            .read_dir(None)
            .map_err(|e| Error::path("readdir", name, e))?;
        dir.close().map_err(|e| Error::path("readdir", name, e))?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Whole contents of the named file.
    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let mut file = self.open(name)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| Error::path("read", name, e))?;
        file.close().map_err(|e| Error::path("read", name, e))?;
        Ok(data)
    }

    /// Metadata of the named file.
    fn stat(&self, name: &str) -> Result<FileInfo> {
        let mut file = self.open(name)?;
        let info = file.stat().map_err(|e| Error::path("stat", name, e))?;
        file.close().map_err(|e| Error::path("stat", name, e))?;
        Ok(info)
    }

    /// Names matching `pattern`, relative to the root.
    fn glob(&self, pattern: &str) -> Result<Vec<String>> {
        Err(Error::not_implemented("glob", pattern))
    }

    /// The subtree rooted at `dir`.
    fn sub(&self, dir: &str) -> Result<Box<dyn FileSystem>> {
        Err(Error::not_implemented("sub", dir))
    }

    /// Create or truncate the named file for writing.
    fn create_file(&self, name: &str) -> Result<Box<dyn WriterFile>> {
        Err(Error::not_implemented("create", name))
    }

    /// Replace the contents of the named file with `data`.
    fn write_file(&self, name: &str, data: &[u8]) -> Result<usize> {
        let mut file = self.create_file(name)?;
        file.write_all(data)
            .map_err(|e| Error::path("write", name, e))?;
        file.close().map_err(|e| Error::path("write", name, e))?;
        Ok(data.len())
    }

    /// Remove the named file or empty directory.
    fn remove_file(&self, name: &str) -> Result<()> {
        Err(Error::not_implemented("remove", name))
    }

    /// Remove `path` and everything below it.
    fn remove_all(&self, path: &str) -> Result<()> {
        Err(Error::not_implemented("removeall", path))
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Box<T> {
    fn open(&self, name: &str) -> Result<Box<dyn File>> {
        (**self).open(name)
    }

    fn read_dir(&self, name: &str) -> Result<Vec<DirEntry>> {
        (**self).read_dir(name)
    }

    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        (**self).read_file(name)
    }

    fn stat(&self, name: &str) -> Result<FileInfo> {
        (**self).stat(name)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>> {
        (**self).glob(pattern)
    }

    fn sub(&self, dir: &str) -> Result<Box<dyn FileSystem>> {
        (**self).sub(dir)
    }

    fn create_file(&self, name: &str) -> Result<Box<dyn WriterFile>> {
        (**self).create_file(name)
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<usize> {
        (**self).write_file(name, data)
    }

    fn remove_file(&self, name: &str) -> Result<()> {
        (**self).remove_file(name)
    }

    fn remove_all(&self, path: &str) -> Result<()> {
        (**self).remove_all(path)
    }
}
