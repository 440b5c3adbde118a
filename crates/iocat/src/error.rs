//! Error types for stream capabilities

use std::io;

use thiserror::Error;

/// Result type for iocat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by iocat itself.
///
/// Errors coming from wrapped handles are never converted into this type;
/// they pass through as the original [`io::Error`].
#[derive(Debug, Error)]
pub enum Error {
    /// The operation has no implementation behind it
    #[error("not implemented")]
    NotImplemented,

    /// Numeric whence value outside start/current/end
    #[error("invalid whence: {0}")]
    InvalidWhence(i32),

    /// Seek target before the start of the stream
    #[error("invalid seek to a negative position: {0}")]
    NegativePosition(i64),

    /// One or more sub-stream handles failed to close
    #[error("failed to close: {}", .messages.join("; "))]
    Close {
        /// Messages of the individual close failures, in stream order
        messages: Vec<String>,
    },
}

impl Error {
    /// The [`io::ErrorKind`] this error surfaces as.
    pub const fn kind(&self) -> io::ErrorKind {
        match self {
            Self::NotImplemented => io::ErrorKind::Unsupported,
            Self::InvalidWhence(_) | Self::NegativePosition(_) => io::ErrorKind::InvalidInput,
            Self::Close { .. } => io::ErrorKind::Other,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        Self::new(err.kind(), err)
    }
}

/// Shorthand for an [`io::Error`] carrying [`Error::NotImplemented`].
pub fn not_implemented() -> io::Error {
    Error::NotImplemented.into()
}

/// Returns `true` if `err` was produced from [`Error::NotImplemented`].
pub fn is_not_implemented(err: &io::Error) -> bool {
    err.get_ref()
        .and_then(|inner| inner.downcast_ref::<Error>())
        .is_some_and(|inner| matches!(inner, Error::NotImplemented))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_message_joins_failures() {
        let err = Error::Close {
            messages: vec!["close error".to_string(), "close error".to_string()],
        };
        assert_eq!(err.to_string(), "failed to close: close error; close error");
    }

    #[test]
    fn test_io_conversion_keeps_kind_and_message() {
        let err: io::Error = Error::InvalidWhence(-1).into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "invalid whence: -1");

        let err = not_implemented();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        assert!(is_not_implemented(&err));
        assert!(!is_not_implemented(&io::Error::other("not implemented")));
    }
}
