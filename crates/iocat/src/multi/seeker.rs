//! Seekable concatenation of independently seekable streams
//!
//! Global offsets are translated into a `(sub-stream, local offset)` pair by
//! walking the measured sub-stream lengths. Every seek leaves the sub-streams
//! after the active one rewound to their start ("reset tails"), so reading
//! forward after a backward excursion never observes a stale cursor.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, trace};

use super::stream::{Chain, SubStream};
use crate::close::Close;
use crate::whence::Whence;

/// A seekable stream that is the logical concatenation of its sub-streams.
///
/// ```
/// use iocat::MultiReadSeeker;
/// use std::io::{Read, Seek, SeekFrom};
///
/// let mut r = MultiReadSeeker::from_bytes(["abc", "def", "ghi"]);
/// assert_eq!(r.seek(SeekFrom::End(-4)).unwrap(), 5);
///
/// let mut rest = String::new();
/// r.read_to_string(&mut rest).unwrap();
/// assert_eq!(rest, "fghi");
/// ```
#[derive(Debug)]
pub struct MultiReadSeeker<R> {
    chain: Chain<R>,
}

fn signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl<R: Read + Seek> MultiReadSeeker<R> {
    /// Concatenate `streams` in iteration order.
    ///
    /// Each stream is measured by seeking to its end and back to its start.
    /// The first failing seek aborts construction and is returned as is.
    pub fn new<I>(streams: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = R>,
    {
        let mut measured = Vec::new();
        for mut handle in streams {
            let length = handle.seek(SeekFrom::End(0))?;
            handle.seek(SeekFrom::Start(0))?;
            measured.push(SubStream::new(handle, length));
        }
        Ok(Self::from_sub_streams(measured))
    }
}

impl MultiReadSeeker<Cursor<Vec<u8>>> {
    /// Concatenate in-memory byte sequences.
    pub fn from_bytes<I, B>(items: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let streams = items
            .into_iter()
            .map(|item| {
                let bytes = item.as_ref().to_vec();
                let length = bytes.len() as u64;
                SubStream::new(Cursor::new(bytes), length)
            })
            .collect();
        Self::from_sub_streams(streams)
    }
}

impl MultiReadSeeker<File> {
    /// Open `paths` and concatenate the files.
    ///
    /// Lengths come from file metadata. Open and metadata failures are
    /// returned as is; files opened before the failure are dropped.
    pub fn open<I, P>(paths: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut streams = Vec::new();
        for path in paths {
            let file = File::open(path.as_ref())?;
            let length = file.metadata()?.len();
            streams.push(SubStream::new(file, length));
        }
        Ok(Self::from_sub_streams(streams))
    }
}

impl<R> MultiReadSeeker<R> {
    fn from_sub_streams(streams: Vec<SubStream<R>>) -> Self {
        let chain = Chain::new(streams);
        debug!(
            "Created multi-read-seeker over {} streams, total length {}",
            chain.streams.len(),
            chain.length
        );
        Self { chain }
    }

    /// Index of the active sub-stream.
    ///
    /// Equals [`Self::sub_stream_count`] once a read has consumed everything.
    pub const fn current_sub_stream(&self) -> usize {
        self.chain.current
    }

    /// Number of sub-streams.
    pub fn sub_stream_count(&self) -> usize {
        self.chain.streams.len()
    }

    /// Sum of all sub-stream lengths.
    pub const fn len(&self) -> u64 {
        self.chain.length
    }

    /// Returns `true` if the concatenation holds no bytes.
    pub const fn is_empty(&self) -> bool {
        self.chain.length == 0
    }

    /// Current global offset, computed from tracked state without touching
    /// any handle.
    pub fn position(&self) -> u64 {
        match self.chain.streams.get(self.chain.current) {
            Some(stream) => self.chain.offset_of(self.chain.current) + stream.cursor,
            None => self.chain.length,
        }
    }

    /// Unwrap into the sub-streams, in order.
    pub fn into_inner(self) -> Vec<R> {
        self.chain.into_handles()
    }
}

impl<R: Read + Seek> MultiReadSeeker<R> {
    /// Position at the first byte of sub-stream `index`.
    ///
    /// Indexes past the last sub-stream position at the end.
    pub fn seek_to_sub_stream(&mut self, index: usize) -> io::Result<u64> {
        let offset = self.chain.offset_of(index);
        trace!("Seek to sub-stream {} at offset {}", index, offset);
        self.seek_start(offset, 0)
    }

    /// Seek with a numeric whence (`0` start, `1` current, `2` end).
    ///
    /// Unknown whence values fail with [`crate::Error::InvalidWhence`];
    /// negative offsets from the start fail with
    /// [`crate::Error::NegativePosition`].
    pub fn seek_whence(&mut self, offset: i64, whence: i32) -> io::Result<u64> {
        let pos = Whence::try_from(whence)?.seek_from(offset)?;
        self.seek(pos)
    }

    /// Walk forward from sub-stream `start`, which sits at global offset
    /// `offset_of(start)`, consuming `offset` bytes.
    fn seek_start(&mut self, offset: u64, start: usize) -> io::Result<u64> {
        let Some(last) = self.chain.streams.len().checked_sub(1) else {
            return Ok(0);
        };

        let mut index = start.min(last);
        let mut remaining = offset;
        loop {
            let stream = &mut self.chain.streams[index];
            let local = remaining.min(stream.length);
            stream.cursor = stream.handle.seek(SeekFrom::Start(local))?;
            if remaining < stream.length || index == last {
                break;
            }
            remaining -= local;
            index += 1;
        }

        self.settle(index)
    }

    /// Walk backward from sub-stream `end`, whose last byte is the anchor,
    /// moving `back` bytes toward the start.
    fn seek_end(&mut self, back: u64, end: usize) -> io::Result<u64> {
        let Some(last) = self.chain.streams.len().checked_sub(1) else {
            return Ok(0);
        };

        let mut index = end.min(last);
        let mut remaining = back;
        loop {
            let stream = &mut self.chain.streams[index];
            if remaining < stream.length || index == 0 {
                // On the first sub-stream an underflow goes to the handle
                // unchanged so that its own error surfaces.
                stream.cursor = stream.handle.seek(SeekFrom::End(-signed(remaining)))?;
                break;
            }
            stream.cursor = stream.handle.seek(SeekFrom::Start(0))?;
            remaining -= stream.length;
            index -= 1;
        }

        self.settle(index)
    }

    fn seek_current(&mut self, delta: i64) -> io::Result<u64> {
        let Some(last) = self.chain.streams.len().checked_sub(1) else {
            return Ok(0);
        };

        // Exhausted by reads: the last sub-stream sits at its end.
        let index = self.chain.current.min(last);
        self.chain.current = index;

        let stream = &mut self.chain.streams[index];
        if delta >= 0 {
            let forward = delta.unsigned_abs();
            let local = forward.min(stream.length.saturating_sub(stream.cursor));
            stream.cursor = stream.handle.seek(SeekFrom::Current(signed(local)))?;
            let overflow = forward - local;
            if overflow > 0 && index != last {
                trace!("Seek overflows sub-stream {} by {}", index, overflow);
                return self.seek_start(overflow, index + 1);
            }
        } else {
            let back = delta.unsigned_abs();
            let local = if index == 0 {
                back
            } else {
                back.min(stream.cursor)
            };
            stream.cursor = stream.handle.seek(SeekFrom::Current(-signed(local)))?;
            let underflow = back - local;
            if underflow > 0 {
                trace!("Seek underflows sub-stream {} by {}", index, underflow);
                return self.seek_end(underflow, index - 1);
            }
        }

        self.settle(index)
    }

    /// Make `index` active, rewind every later sub-stream and report the
    /// global offset.
    fn settle(&mut self, index: usize) -> io::Result<u64> {
        self.chain.current = index;
        for stream in self.chain.streams.iter_mut().skip(index + 1) {
            stream.handle.seek(SeekFrom::Start(0))?;
            stream.cursor = 0;
        }
        let position = self.position();
        trace!("Settled on sub-stream {} at position {}", index, position);
        Ok(position)
    }
}

impl<R: Read> Read for MultiReadSeeker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.chain.read(buf)
    }
}

impl<R: Read + Seek> Seek for MultiReadSeeker<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::Start(offset) => self.seek_start(offset, 0),
            SeekFrom::Current(delta) => self.seek_current(delta),
            SeekFrom::End(delta) => {
                let Some(last) = self.chain.streams.len().checked_sub(1) else {
                    return Ok(0);
                };
                // Past the end clamps to the end.
                self.seek_end(delta.min(0).unsigned_abs(), last)
            }
        }
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position())
    }
}

impl<R: Close> Close for MultiReadSeeker<R> {
    fn close(&mut self) -> io::Result<()> {
        self.chain.close()
    }
}
