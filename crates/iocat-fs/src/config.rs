//! Configuration for the OS-rooted filesystem

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Mode of directories created on demand
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Configuration for [`crate::OsFs`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsFsConfig {
    /// Directory every name is resolved against
    pub root: PathBuf,

    /// Permission bits of parent directories created by `create_file`
    /// (ignored on non-Unix platforms)
    pub dir_mode: u32,

    /// Create missing parent directories when creating files
    pub create_parents: bool,
}

impl Default for OsFsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            dir_mode: DEFAULT_DIR_MODE,
            create_parents: true,
        }
    }
}

impl OsFsConfig {
    /// Create a new configuration rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Set the root directory
    #[must_use]
    pub fn with_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    /// Set the mode of created parent directories
    #[must_use]
    pub const fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    /// Enable or disable creating missing parent directories
    #[must_use]
    pub const fn with_create_parents(mut self, enable: bool) -> Self {
        self.create_parents = enable;
        self
    }
}
