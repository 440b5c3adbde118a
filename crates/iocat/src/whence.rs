//! Numeric seek origins

use std::io::SeekFrom;

use crate::error::Error;

/// The origin a seek offset is interpreted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Whence {
    /// Relative to the start of the stream
    Start = 0,
    /// Relative to the current offset
    Current = 1,
    /// Relative to the end of the stream
    End = 2,
}

impl Whence {
    /// Build a [`SeekFrom`] for `offset`.
    ///
    /// Fails with [`Error::NegativePosition`] when a negative offset is
    /// given relative to the start.
    pub fn seek_from(self, offset: i64) -> Result<SeekFrom, Error> {
        match self {
            Self::Start => u64::try_from(offset)
                .map(SeekFrom::Start)
                .map_err(|_| Error::NegativePosition(offset)),
            Self::Current => Ok(SeekFrom::Current(offset)),
            Self::End => Ok(SeekFrom::End(offset)),
        }
    }
}

impl TryFrom<i32> for Whence {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Start),
            1 => Ok(Self::Current),
            2 => Ok(Self::End),
            other => Err(Error::InvalidWhence(other)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_whence_from_i32() {
        assert_eq!(Whence::try_from(0).unwrap(), Whence::Start);
        assert_eq!(Whence::try_from(1).unwrap(), Whence::Current);
        assert_eq!(Whence::try_from(2).unwrap(), Whence::End);
        assert!(matches!(Whence::try_from(-1), Err(Error::InvalidWhence(-1))));
        assert!(matches!(Whence::try_from(3), Err(Error::InvalidWhence(3))));
    }

    #[test]
    fn test_seek_from_rejects_negative_start() {
        assert_eq!(Whence::Start.seek_from(4).unwrap(), SeekFrom::Start(4));
        assert_eq!(Whence::End.seek_from(-4).unwrap(), SeekFrom::End(-4));
        assert!(matches!(
            Whence::Start.seek_from(-1),
            Err(Error::NegativePosition(-1))
        ));
    }
}
