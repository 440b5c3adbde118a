//! Sequential concatenation of plain readers

use std::io::{self, Read};

use tracing::debug;

use super::stream::{Chain, SubStream};
use crate::close::Close;

/// A reader that is the logical concatenation of its sub-readers.
///
/// Sub-readers are consumed in order; a sub-reader is left behind once it
/// returns `Ok(0)`. Lengths are never measured and the result cannot seek;
/// use [`super::MultiReadSeeker`] for that.
///
/// ```
/// use iocat::MultiReader;
/// use std::io::Read;
///
/// let mut r = MultiReader::new([&b"abc"[..], &b"def"[..]]);
/// let mut buf = [0u8; 6];
/// assert_eq!(r.read(&mut buf).unwrap(), 6);
/// assert_eq!(&buf, b"abcdef");
/// ```
#[derive(Debug)]
pub struct MultiReader<R> {
    chain: Chain<R>,
}

impl<R: Read> MultiReader<R> {
    /// Concatenate `readers` in iteration order.
    pub fn new<I>(readers: I) -> Self
    where
        I: IntoIterator<Item = R>,
    {
        let streams: Vec<_> = readers
            .into_iter()
            .map(|r| SubStream::new(r, 0))
            .collect();
        debug!("Created sequential multi-reader over {} streams", streams.len());
        Self {
            chain: Chain::new(streams),
        }
    }
}

impl<R> MultiReader<R> {
    /// Index of the sub-reader the next read starts from.
    ///
    /// Equals [`Self::sub_stream_count`] once everything has been read.
    pub const fn current_sub_stream(&self) -> usize {
        self.chain.current
    }

    /// Number of sub-readers.
    pub fn sub_stream_count(&self) -> usize {
        self.chain.streams.len()
    }

    /// Unwrap into the sub-readers, in order.
    pub fn into_inner(self) -> Vec<R> {
        self.chain.into_handles()
    }
}

impl<R: Read> Read for MultiReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.chain.read(buf)
    }
}

impl<R: Close> Close for MultiReader<R> {
    fn close(&mut self) -> io::Result<()> {
        self.chain.close()
    }
}
