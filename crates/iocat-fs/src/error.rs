//! Error types for filesystem operations

use std::io;

use thiserror::Error;

/// Result type for filesystem operations
pub type Result<T> = std::result::Result<T, Error>;

/// Filesystem errors.
///
/// Every failure names the operation and the path it was applied to.
#[derive(Debug, Error)]
pub enum Error {
    /// An operation on a path failed
    #[error("{op} {path}: {source}")]
    Path {
        /// Operation name, such as `open` or `remove`
        op: &'static str,
        /// Path as given by the caller
        path: String,
        /// Underlying cause
        source: io::Error,
    },

    /// A glob pattern failed to parse
    #[error("glob {pattern}: {source}")]
    Pattern {
        /// Pattern as given by the caller
        pattern: String,
        /// Parser error
        source: glob::PatternError,
    },
}

impl Error {
    /// Wrap `source` with the operation and path it came from.
    pub fn path(op: &'static str, path: impl Into<String>, source: io::Error) -> Self {
        Self::Path {
            op,
            path: path.into(),
            source,
        }
    }

    /// `op` has no implementation behind it.
    pub fn not_implemented(op: &'static str, path: impl Into<String>) -> Self {
        Self::path(op, path, iocat::not_implemented())
    }

    /// `path` is not a valid name for `op`.
    pub fn invalid(op: &'static str, path: impl Into<String>) -> Self {
        Self::path(
            op,
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "invalid argument"),
        )
    }

    /// The [`io::ErrorKind`] of the underlying cause.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Path { source, .. } => source.kind(),
            Self::Pattern { .. } => io::ErrorKind::InvalidInput,
        }
    }

    /// Returns `true` if the cause is [`iocat::Error::NotImplemented`].
    pub fn is_not_implemented(&self) -> bool {
        match self {
            Self::Path { source, .. } => iocat::is_not_implemented(source),
            Self::Pattern { .. } => false,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        Self::new(err.kind(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_error_message() {
        let err = Error::not_implemented("create", "a/b.txt");
        assert_eq!(err.to_string(), "create a/b.txt: not implemented");
        assert!(err.is_not_implemented());
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn test_invalid_keeps_kind_through_io_conversion() {
        let err: io::Error = Error::invalid("remove", "../x").into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "remove ../x: invalid argument");
    }
}
