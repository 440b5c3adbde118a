//! Closure-backed filesystems and files
//!
//! [`FsDelegator`] and [`FileDelegator`] implement every filesystem and file
//! operation through an optional closure. Unbound operations follow the
//! delegator's [`Fallback`]: either fail as not implemented, or succeed with
//! an empty value (an empty file, an empty listing, default metadata or a
//! zero count).
//!
//! ```
//! use iocat_fs::{FileSystem, FsDelegator};
//!
//! let fsys = FsDelegator::default().with_read_file(|name| Ok(name.as_bytes().to_vec()));
//! assert_eq!(fsys.read_file("echo").unwrap(), b"echo");
//! assert!(fsys.stat("echo").unwrap_err().is_not_implemented());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Read, Write};
use std::rc::Rc;

use iocat::{Close, Fallback};

use crate::error::{Error, Result};
use crate::fs::{DirEntry, File, FileInfo, FileSystem, WriterFile};

/// Open operation
pub type OpenFn = Box<dyn Fn(&str) -> Result<Box<dyn File>>>;
/// Directory listing operation
pub type ReadDirFn = Box<dyn Fn(&str) -> Result<Vec<DirEntry>>>;
/// Whole-file read operation
pub type ReadFileFn = Box<dyn Fn(&str) -> Result<Vec<u8>>>;
/// Glob operation
pub type GlobFn = Box<dyn Fn(&str) -> Result<Vec<String>>>;
/// Stat operation
pub type StatFn = Box<dyn Fn(&str) -> Result<FileInfo>>;
/// Subtree operation
pub type SubFn = Box<dyn Fn(&str) -> Result<Box<dyn FileSystem>>>;
/// Create operation
pub type CreateFileFn = Box<dyn Fn(&str) -> Result<Box<dyn WriterFile>>>;
/// Whole-file write operation
pub type WriteFileFn = Box<dyn Fn(&str, &[u8]) -> Result<usize>>;
/// Remove operation
pub type RemoveFn = Box<dyn Fn(&str) -> Result<()>>;

/// A [`FileSystem`] backed by per-operation closures.
#[derive(Default)]
pub struct FsDelegator {
    /// Called by [`FileSystem::open`]
    pub open_fn: Option<OpenFn>,
    /// Called by [`FileSystem::read_dir`]
    pub read_dir_fn: Option<ReadDirFn>,
    /// Called by [`FileSystem::read_file`]
    pub read_file_fn: Option<ReadFileFn>,
    /// Called by [`FileSystem::glob`]
    pub glob_fn: Option<GlobFn>,
    /// Called by [`FileSystem::stat`]
    pub stat_fn: Option<StatFn>,
    /// Called by [`FileSystem::sub`]
    pub sub_fn: Option<SubFn>,
    /// Called by [`FileSystem::create_file`]
    pub create_file_fn: Option<CreateFileFn>,
    /// Called by [`FileSystem::write_file`]
    pub write_file_fn: Option<WriteFileFn>,
    /// Called by [`FileSystem::remove_file`]
    pub remove_file_fn: Option<RemoveFn>,
    /// Called by [`FileSystem::remove_all`]
    pub remove_all_fn: Option<RemoveFn>,
    /// Behavior of operations without a closure
    pub fallback: Fallback,
}

impl FsDelegator {
    /// An empty delegator; every operation uses the fallback.
    pub fn new(fallback: Fallback) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    /// Delegate every operation to `fsys`.
    ///
    /// Operations `fsys` does not provide keep their trait behavior, so the
    /// result can be customized per operation without losing the rest.
    pub fn delegate<T: FileSystem + 'static>(fsys: T) -> Self {
        let fsys = Rc::new(fsys);
        let open = Rc::clone(&fsys);
        let read_dir = Rc::clone(&fsys);
        let read_file = Rc::clone(&fsys);
        let glob = Rc::clone(&fsys);
        let stat = Rc::clone(&fsys);
        let sub = Rc::clone(&fsys);
        let create_file = Rc::clone(&fsys);
        let write_file = Rc::clone(&fsys);
        let remove_file = Rc::clone(&fsys);
        Self {
            open_fn: Some(Box::new(move |name| open.open(name))),
            read_dir_fn: Some(Box::new(move |name| read_dir.read_dir(name))),
            read_file_fn: Some(Box::new(move |name| read_file.read_file(name))),
            glob_fn: Some(Box::new(move |pattern| glob.glob(pattern))),
            stat_fn: Some(Box::new(move |name| stat.stat(name))),
            sub_fn: Some(Box::new(move |dir| sub.sub(dir))),
            create_file_fn: Some(Box::new(move |name| create_file.create_file(name))),
            write_file_fn: Some(Box::new(move |name, data| write_file.write_file(name, data))),
            remove_file_fn: Some(Box::new(move |name| remove_file.remove_file(name))),
            remove_all_fn: Some(Box::new(move |path| fsys.remove_all(path))),
            fallback: Fallback::NotImplemented,
        }
    }

    /// Replace the open operation.
    #[must_use]
    pub fn with_open<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Box<dyn File>> + 'static,
    {
        self.open_fn = Some(Box::new(f));
        self
    }

    /// Replace the directory listing operation.
    #[must_use]
    pub fn with_read_dir<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<DirEntry>> + 'static,
    {
        self.read_dir_fn = Some(Box::new(f));
        self
    }

    /// Replace the whole-file read operation.
    #[must_use]
    pub fn with_read_file<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<u8>> + 'static,
    {
        self.read_file_fn = Some(Box::new(f));
        self
    }

    /// Replace the glob operation.
    #[must_use]
    pub fn with_glob<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<String>> + 'static,
    {
        self.glob_fn = Some(Box::new(f));
        self
    }

    /// Replace the stat operation.
    #[must_use]
    pub fn with_stat<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<FileInfo> + 'static,
    {
        self.stat_fn = Some(Box::new(f));
        self
    }

    /// Replace the subtree operation.
    #[must_use]
    pub fn with_sub<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Box<dyn FileSystem>> + 'static,
    {
        self.sub_fn = Some(Box::new(f));
        self
    }

    /// Replace the create operation.
    #[must_use]
    pub fn with_create_file<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Box<dyn WriterFile>> + 'static,
    {
        self.create_file_fn = Some(Box::new(f));
        self
    }

    /// Replace the whole-file write operation.
    #[must_use]
    pub fn with_write_file<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &[u8]) -> Result<usize> + 'static,
    {
        self.write_file_fn = Some(Box::new(f));
        self
    }

    /// Replace the remove operation.
    #[must_use]
    pub fn with_remove_file<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<()> + 'static,
    {
        self.remove_file_fn = Some(Box::new(f));
        self
    }

    /// Replace the recursive remove operation.
    #[must_use]
    pub fn with_remove_all<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<()> + 'static,
    {
        self.remove_all_fn = Some(Box::new(f));
        self
    }

    /// Set the behavior of unbound operations.
    #[must_use]
    pub const fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    fn unbound<T>(&self, op: &'static str, path: &str, empty: impl FnOnce() -> T) -> Result<T> {
        match self.fallback {
            Fallback::NotImplemented => Err(Error::not_implemented(op, path)),
            Fallback::Nop => Ok(empty()),
        }
    }
}

impl fmt::Debug for FsDelegator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsDelegator")
            .field("open", &self.open_fn.is_some())
            .field("read_dir", &self.read_dir_fn.is_some())
            .field("read_file", &self.read_file_fn.is_some())
            .field("glob", &self.glob_fn.is_some())
            .field("stat", &self.stat_fn.is_some())
            .field("sub", &self.sub_fn.is_some())
            .field("create_file", &self.create_file_fn.is_some())
            .field("write_file", &self.write_file_fn.is_some())
            .field("remove_file", &self.remove_file_fn.is_some())
            .field("remove_all", &self.remove_all_fn.is_some())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl FileSystem for FsDelegator {
    fn open(&self, name: &str) -> Result<Box<dyn File>> {
        match &self.open_fn {
            Some(f) => f(name),
            None => self.unbound("open", name, || -> Box<dyn File> {
                Box::new(FileDelegator::new(Fallback::Nop))
            }),
        }
    }

    fn read_dir(&self, name: &str) -> Result<Vec<DirEntry>> {
        match &self.read_dir_fn {
            Some(f) => f(name),
            None => self.unbound("readdir", name, Vec::new),
        }
    }

    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        match &self.read_file_fn {
            Some(f) => f(name),
            None => self.unbound("read", name, Vec::new),
        }
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>> {
        match &self.glob_fn {
            Some(f) => f(pattern),
            None => self.unbound("glob", pattern, Vec::new),
        }
    }

    fn stat(&self, name: &str) -> Result<FileInfo> {
        match &self.stat_fn {
            Some(f) => f(name),
            None => self.unbound("stat", name, FileInfo::default),
        }
    }

    fn sub(&self, dir: &str) -> Result<Box<dyn FileSystem>> {
        match &self.sub_fn {
            Some(f) => f(dir),
            None => self.unbound("sub", dir, || -> Box<dyn FileSystem> {
                Box::new(Self::new(Fallback::Nop))
            }),
        }
    }

    fn create_file(&self, name: &str) -> Result<Box<dyn WriterFile>> {
        match &self.create_file_fn {
            Some(f) => f(name),
            None => self.unbound("create", name, || -> Box<dyn WriterFile> {
                Box::new(FileDelegator::new(Fallback::Nop))
            }),
        }
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<usize> {
        match &self.write_file_fn {
            Some(f) => f(name, data),
            None => self.unbound("write", name, || 0),
        }
    }

    fn remove_file(&self, name: &str) -> Result<()> {
        match &self.remove_file_fn {
            Some(f) => f(name),
            None => self.unbound("remove", name, || ()),
        }
    }

    fn remove_all(&self, path: &str) -> Result<()> {
        match &self.remove_all_fn {
            Some(f) => f(path),
            None => self.unbound("removeall", path, || ()),
        }
    }
}

/// File stat operation
pub type FileStatFn = Box<dyn FnMut() -> io::Result<FileInfo>>;
/// File read operation
pub type FileReadFn = Box<dyn FnMut(&mut [u8]) -> io::Result<usize>>;
/// File write operation
pub type FileWriteFn = Box<dyn FnMut(&[u8]) -> io::Result<usize>>;
/// File close operation
pub type FileCloseFn = Box<dyn FnMut() -> io::Result<()>>;
/// File directory listing operation
pub type FileReadDirFn = Box<dyn FnMut(Option<usize>) -> io::Result<Vec<DirEntry>>>;

/// A [`WriterFile`] backed by per-operation closures.
///
/// An unbound close always succeeds, whatever the fallback.
#[derive(Default)]
pub struct FileDelegator {
    /// Called by [`File::stat`]
    pub stat_fn: Option<FileStatFn>,
    /// Called by [`Read::read`]
    pub read_fn: Option<FileReadFn>,
    /// Called by [`Write::write`]
    pub write_fn: Option<FileWriteFn>,
    /// Called by [`Close::close`]
    pub close_fn: Option<FileCloseFn>,
    /// Called by [`File::read_dir`]
    pub read_dir_fn: Option<FileReadDirFn>,
    /// Behavior of operations without a closure
    pub fallback: Fallback,
}

impl FileDelegator {
    /// An empty delegator; every operation uses the fallback.
    pub fn new(fallback: Fallback) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    /// Delegate stat, read, close and directory listing to `file`.
    pub fn file<T: File + 'static>(file: T) -> Self {
        let file = Rc::new(RefCell::new(file));
        let stat = Rc::clone(&file);
        let read = Rc::clone(&file);
        let read_dir = Rc::clone(&file);
        Self {
            stat_fn: Some(Box::new(move || stat.borrow_mut().stat())),
            read_fn: Some(Box::new(move |buf| read.borrow_mut().read(buf))),
            read_dir_fn: Some(Box::new(move |limit| read_dir.borrow_mut().read_dir(limit))),
            close_fn: Some(Box::new(move || file.borrow_mut().close())),
            ..Self::default()
        }
    }

    /// Delegate every operation, including write, to `file`.
    pub fn writer_file<T: WriterFile + 'static>(file: T) -> Self {
        let file = Rc::new(RefCell::new(file));
        let stat = Rc::clone(&file);
        let read = Rc::clone(&file);
        let write = Rc::clone(&file);
        let read_dir = Rc::clone(&file);
        Self {
            stat_fn: Some(Box::new(move || stat.borrow_mut().stat())),
            read_fn: Some(Box::new(move |buf| read.borrow_mut().read(buf))),
            write_fn: Some(Box::new(move |buf| write.borrow_mut().write(buf))),
            read_dir_fn: Some(Box::new(move |limit| read_dir.borrow_mut().read_dir(limit))),
            close_fn: Some(Box::new(move || file.borrow_mut().close())),
            ..Self::default()
        }
    }

    /// Replace the stat operation.
    #[must_use]
    pub fn with_stat<F>(mut self, f: F) -> Self
    where
        F: FnMut() -> io::Result<FileInfo> + 'static,
    {
        self.stat_fn = Some(Box::new(f));
        self
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

    /// Replace the close operation.
    #[must_use]
    pub fn with_close<F>(mut self, f: F) -> Self
    where
        F: FnMut() -> io::Result<()> + 'static,
    {
        self.close_fn = Some(Box::new(f));
        self
    }

    /// Replace the directory listing operation.
    #[must_use]
    pub fn with_read_dir<F>(mut self, f: F) -> Self
    where
        F: FnMut(Option<usize>) -> io::Result<Vec<DirEntry>> + 'static,
    {
        self.read_dir_fn = Some(Box::new(f));
        self
    }

    /// Set the behavior of unbound operations.
    #[must_use]
    pub const fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }
}

impl fmt::Debug for FileDelegator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileDelegator")
            .field("stat", &self.stat_fn.is_some())
            .field("read", &self.read_fn.is_some())
            .field("write", &self.write_fn.is_some())
            .field("close", &self.close_fn.is_some())
            .field("read_dir", &self.read_dir_fn.is_some())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Read for FileDelegator {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.read_fn.as_mut() {
            Some(f) => f(buf),
            None => self.fallback.zero(),
        }
    }
}

impl Write for FileDelegator {
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

impl Close for FileDelegator {
    fn close(&mut self) -> io::Result<()> {
        match self.close_fn.as_mut() {
            Some(f) => f(),
            None => Ok(()),
        }
    }
}

impl File for FileDelegator {
    fn stat(&mut self) -> io::Result<FileInfo> {
        match self.stat_fn.as_mut() {
            Some(f) => f(),
            None => self.fallback.zero(),
        }
    }

    fn read_dir(&mut self, limit: Option<usize>) -> io::Result<Vec<DirEntry>> {
        match self.read_dir_fn.as_mut() {
            Some(f) => f(limit),
            None => self.fallback.zero(),
        }
    }
}
