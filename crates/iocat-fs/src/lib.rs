//! Filesystem capabilities built on iocat streams
//!
//! - [`FileSystem`]: a slash-separated, root-relative filesystem where only
//!   `open` is required and the other operations have derived or
//!   not-implemented defaults
//! - [`File`] / [`WriterFile`]: open files with stat, directory listing and
//!   an explicit [`iocat::Close`]
//! - [`FsDelegator`] / [`FileDelegator`]: closure-backed implementations with
//!   a [`Fallback`] for unbound operations
//! - [`OsFs`]: a filesystem rooted at a host directory, configured through
//!   [`OsFsConfig`]
//!
//! ```
//! use iocat_fs::{FileSystem, OsFs};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let fsys = OsFs::new(dir.path());
//!
//! fsys.write_file("a/b.txt", b"hello").unwrap();
//! assert_eq!(fsys.read_file("a/b.txt").unwrap(), b"hello");
//! assert_eq!(fsys.glob("a/*.txt").unwrap(), ["a/b.txt"]);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod delegate;
pub mod error;
pub mod fs;
pub mod os;
pub mod path;

pub use config::{DEFAULT_DIR_MODE, OsFsConfig};
pub use delegate::{FileDelegator, FsDelegator};
pub use error::{Error, Result};
pub use fs::{DirEntry, File, FileInfo, FileSystem, WriterFile};
pub use iocat::Fallback;
pub use os::{OsFile, OsFs};
pub use path::is_valid_path;
