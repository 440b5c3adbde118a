//! Filesystem rooted at a host directory
//!
//! Every name and glob pattern is checked before it reaches the host. It must
//! be a name [`crate::is_valid_path`] accepts, and on Windows it must not contain `\`
//! or `:`. Glob matches that fall outside the root are dropped.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::vec;

use iocat::Close;
use tracing::{debug, trace};

use crate::config::OsFsConfig;
use crate::error::{Error, Result};
use crate::fs::{DirEntry, File, FileInfo, FileSystem, WriterFile};
use crate::path::is_valid_host_path;

/// A [`FileSystem`] over the tree of files below a host directory.
///
/// ```no_run
/// use iocat_fs::{FileSystem, OsFs};
///
/// let fsys = OsFs::new("/var/lib/app");
/// fsys.write_file("logs/today.txt", b"started\n")?;
/// assert_eq!(fsys.read_file("logs/today.txt")?, b"started\n");
/// # Ok::<(), iocat_fs::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OsFs {
    config: OsFsConfig,
}

impl OsFs {
    /// A filesystem rooted at `root` with the default configuration.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_config(OsFsConfig::new(root))
    }

    /// A filesystem using `config`.
    pub const fn with_config(config: OsFsConfig) -> Self {
        Self { config }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Active configuration.
    pub const fn config(&self) -> &OsFsConfig {
        &self.config
    }

    fn resolve(&self, op: &'static str, name: &str) -> Result<PathBuf> {
        if !is_valid_host_path(name) {
            return Err(Error::invalid(op, name));
        }
        if name == "." {
            Ok(self.config.root.clone())
        } else {
            Ok(self.config.root.join(name))
        }
    }

    fn create_parents(&self, path: &Path) -> io::Result<()> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.config.dir_mode);
        }
        builder.create(parent)
    }
}

fn base_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// `path` relative to `root`, slash-separated, or `None` if it lies outside.
///
/// A root of `.` leaves matched paths unprefixed.
fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = if root == Path::new(".") {
        path
    } else {
        path.strip_prefix(root).ok()?
    };
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if parts.is_empty() {
        Some(".".to_string())
    } else {
        Some(parts.join("/"))
    }
}

fn list_dir(path: &Path) -> io::Result<Vec<DirEntry>> {
    let mut entries = fs::read_dir(path)?
        .map(|entry| {
            let entry = entry?;
            Ok(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type()?.is_dir(),
            })
        })
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

fn closed() -> io::Error {
    io::Error::other("file already closed")
}

fn is_a_directory() -> io::Error {
    io::Error::new(io::ErrorKind::IsADirectory, "is a directory")
}

#[derive(Debug)]
enum Handle {
    File(fs::File),
    /// Directory listing, read on first use
    Dir(Option<vec::IntoIter<DirEntry>>),
    Closed,
}

/// A file or directory opened through [`OsFs`].
#[derive(Debug)]
pub struct OsFile {
    name: String,
    path: PathBuf,
    handle: Handle,
}

impl OsFile {
    /// Name the file was opened with.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Read for OsFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.handle {
            Handle::File(file) => file.read(buf),
            Handle::Dir(_) => Err(is_a_directory()),
            Handle::Closed => Err(closed()),
        }
    }
}

impl Write for OsFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.handle {
            Handle::File(file) => file.write(buf),
            Handle::Dir(_) => Err(is_a_directory()),
            Handle::Closed => Err(closed()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.handle {
            Handle::File(file) => file.flush(),
            Handle::Dir(_) | Handle::Closed => Ok(()),
        }
    }
}

/// Closing twice fails; the descriptor is released on the first close.
impl Close for OsFile {
    fn close(&mut self) -> io::Result<()> {
        match std::mem::replace(&mut self.handle, Handle::Closed) {
            Handle::Closed => Err(closed()),
            Handle::File(_) | Handle::Dir(_) => Ok(()),
        }
    }
}

impl File for OsFile {
    fn stat(&mut self) -> io::Result<FileInfo> {
        let metadata = match &self.handle {
            Handle::File(file) => file.metadata()?,
            Handle::Dir(_) => fs::metadata(&self.path)?,
            Handle::Closed => return Err(closed()),
        };
        Ok(FileInfo::from_metadata(base_name(&self.name), &metadata))
    }

    fn read_dir(&mut self, limit: Option<usize>) -> io::Result<Vec<DirEntry>> {
        let listing = match &mut self.handle {
            Handle::Dir(listing) => listing,
            Handle::File(_) => {
                return Err(io::Error::new(io::ErrorKind::NotADirectory, "not a directory"));
            }
            Handle::Closed => return Err(closed()),
        };
        if listing.is_none() {
            *listing = Some(list_dir(&self.path)?.into_iter());
        }
        let Some(entries) = listing.as_mut() else {
            return Ok(Vec::new());
        };
        Ok(match limit {
            Some(n) => entries.by_ref().take(n).collect(),
            None => entries.by_ref().collect(),
        })
    }
}

impl FileSystem for OsFs {
    fn open(&self, name: &str) -> Result<Box<dyn File>> {
        let path = self.resolve("open", name)?;
        let metadata = fs::metadata(&path).map_err(|e| Error::path("open", name, e))?;
        let handle = if metadata.is_dir() {
            Handle::Dir(None)
        } else {
            Handle::File(fs::File::open(&path).map_err(|e| Error::path("open", name, e))?)
        };
        trace!("Opened {}", path.display());
        Ok(Box::new(OsFile {
            name: name.to_string(),
            path,
            handle,
        }))
    }

    fn read_dir(&self, name: &str) -> Result<Vec<DirEntry>> {
        let path = self.resolve("readdir", name)?;
        list_dir(&path).map_err(|e| Error::path("readdir", name, e))
    }

    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve("read", name)?;
        fs::read(&path).map_err(|e| Error::path("read", name, e))
    }

    fn stat(&self, name: &str) -> Result<FileInfo> {
        let path = self.resolve("stat", name)?;
        let metadata = fs::metadata(&path).map_err(|e| Error::path("stat", name, e))?;
        Ok(FileInfo::from_metadata(base_name(name), &metadata))
    }

    /// Unreadable directories are skipped, not reported.
    fn glob(&self, pattern: &str) -> Result<Vec<String>> {
        let invalid = |source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        };
        glob::Pattern::new(pattern).map_err(invalid)?;
        if !is_valid_host_path(pattern) {
            return Err(Error::invalid("glob", pattern));
        }

        let root = &self.config.root;
        let full = if root == Path::new(".") {
            pattern.to_string()
        } else {
            format!("{}/{pattern}", glob::Pattern::escape(&root.to_string_lossy()))
        };
        let paths = glob::glob(&full).map_err(invalid)?;

        let mut names: Vec<String> = paths
            .filter_map(|entry| match entry {
                Ok(path) => {
                    let name = relative_name(root, &path);
                    if name.is_none() {
                        trace!("Dropping glob match outside the root: {}", path.display());
                    }
                    name
                }
                Err(e) => {
                    trace!("Skipping unreadable path during glob: {}", e);
                    None
                }
            })
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn sub(&self, dir: &str) -> Result<Box<dyn FileSystem>> {
        let root = self.resolve("sub", dir)?;
        debug!("Sub filesystem rooted at {}", root.display());
        Ok(Box::new(Self::with_config(self.config.clone().with_root(root))))
    }

    fn create_file(&self, name: &str) -> Result<Box<dyn WriterFile>> {
        let path = self.resolve("create", name)?;
        if self.config.create_parents {
            self.create_parents(&path)
                .map_err(|e| Error::path("mkdir", name, e))?;
        }
        let file = fs::File::create(&path).map_err(|e| Error::path("create", name, e))?;
        debug!("Created {}", path.display());
        Ok(Box::new(OsFile {
            name: name.to_string(),
            path,
            handle: Handle::File(file),
        }))
    }

    /// Removes a file or an empty directory.
    fn remove_file(&self, name: &str) -> Result<()> {
        let path = self.resolve("remove", name)?;
        let metadata = fs::symlink_metadata(&path).map_err(|e| Error::path("remove", name, e))?;
        let removed = if metadata.is_dir() {
            fs::remove_dir(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| Error::path("remove", name, e))?;
        debug!("Removed {}", path.display());
        Ok(())
    }

    /// A missing `path` is not an error.
    fn remove_all(&self, path: &str) -> Result<()> {
        let target = self.resolve("removeall", path)?;
        let metadata = match fs::symlink_metadata(&target) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(Error::path("removeall", path, e)),
        };
        let removed = if metadata.is_dir() {
            fs::remove_dir_all(&target)
        } else {
            fs::remove_file(&target)
        };
        removed.map_err(|e| Error::path("removeall", path, e))?;
        debug!("Removed {} recursively", target.display());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("a/b/c.txt"), "c.txt");
        assert_eq!(base_name("c.txt"), "c.txt");
        assert_eq!(base_name("."), ".");
    }

    #[test]
    fn test_relative_name() {
        let root = Path::new("/data/root");
        assert_eq!(relative_name(root, Path::new("/data/root/a/b.txt")).unwrap(), "a/b.txt");
        assert_eq!(relative_name(root, Path::new("/data/root")).unwrap(), ".");
        assert_eq!(relative_name(Path::new("."), Path::new("./x.txt")).unwrap(), "x.txt");
        assert_eq!(relative_name(Path::new("."), Path::new("x.txt")).unwrap(), "x.txt");
    }

    #[test]
    fn test_relative_name_rejects_paths_outside_the_root() {
        let root = Path::new("/data/root");
        assert_eq!(relative_name(root, Path::new("/data/secret.txt")), None);
        assert_eq!(relative_name(root, Path::new("/data/root/../secret.txt")), None);
        assert_eq!(relative_name(Path::new("."), Path::new("../secret.txt")), None);
        assert_eq!(relative_name(Path::new("."), Path::new("/etc/passwd")), None);
    }

    #[test]
    fn test_invalid_names_never_reach_the_host() {
        let fsys = OsFs::new("/nonexistent-root");
        for name in ["../etc/passwd", "/etc/passwd", "a//b", ""] {
            assert_eq!(fsys.read_file(name).unwrap_err().kind(), io::ErrorKind::InvalidInput);
            assert_eq!(fsys.stat(name).unwrap_err().kind(), io::ErrorKind::InvalidInput);
            assert_eq!(fsys.remove_all(name).unwrap_err().kind(), io::ErrorKind::InvalidInput);
            assert!(fsys.create_file(name).is_err());
        }
    }

    #[test]
    fn test_backslash_names_are_rejected_on_windows() {
        let fsys = OsFs::new("/nonexistent-root");
        for name in [r"a\..\..\x", "c:x"] {
            let kind = fsys.read_file(name).unwrap_err().kind();
            assert_eq!(kind == io::ErrorKind::InvalidInput, cfg!(windows), "{name}");
            let kind = fsys.sub(name).err().map(|e| e.kind());
            assert_eq!(kind == Some(io::ErrorKind::InvalidInput), cfg!(windows), "{name}");
        }
    }
}
