//! Composable stream capabilities
//!
//! This crate builds on [`std::io::Read`], [`std::io::Write`] and
//! [`std::io::Seek`] with an explicit close capability and a few ways of
//! composing them.
//!
//! # Components
//!
//! - **Close**: [`Close`] plus object-safe groupings such as [`ReadSeekClose`]
//! - **Delegation**: [`Delegator`] implements every capability through
//!   optional closures, each falling back to a [`Fallback`] when unset
//! - **No-op widening**: [`Nop`] adds an inert close, [`nop_read_seek_closer`]
//!   widens a plain reader to read + seek + close
//! - **Concatenation**: [`MultiReader`] for sequential reading,
//!   [`MultiReadSeeker`] for seekable concatenation with sub-stream positioning
//! - **Buffers**: [`WriteSeekBuffer`], a growable in-memory write target
//!
//! # Examples
//!
//! ## Seeking across concatenated streams
//!
//! ```
//! use iocat::MultiReadSeeker;
//! use std::io::{Read, Seek, SeekFrom};
//!
//! let mut r = MultiReadSeeker::from_bytes(["abc", "def", "ghi"]);
//! assert_eq!(r.seek(SeekFrom::Start(2)).unwrap(), 2);
//!
//! let mut rest = String::new();
//! r.read_to_string(&mut rest).unwrap();
//! assert_eq!(rest, "cdefghi");
//!
//! assert_eq!(r.seek_to_sub_stream(1).unwrap(), 3);
//! assert_eq!(r.current_sub_stream(), 1);
//! ```
//!
//! ## Closing every sub-stream
//!
//! ```
//! use iocat::{Close, Delegator, Fallback, MultiReader, ReadClose};
//! use std::io;
//!
//! let failing = || -> Box<dyn ReadClose> {
//!     Box::new(Delegator::new(Fallback::Nop).with_close(|| Err(io::Error::other("close error"))))
//! };
//!
//! let mut r = MultiReader::new([failing(), failing()]);
//! let err = r.close().unwrap_err();
//! assert_eq!(err.to_string(), "failed to close: close error; close error");
//! ```

#![warn(missing_docs)]

pub mod buffer;
pub mod close;
pub mod delegate;
pub mod error;
pub mod multi;
pub mod nop;
pub mod whence;

pub use buffer::WriteSeekBuffer;
pub use close::{Close, ReadClose, ReadSeek, ReadSeekClose, WriteSeekClose};
pub use delegate::{Delegator, Fallback};
pub use error::{Error, Result, is_not_implemented, not_implemented};
pub use multi::{MultiReadSeeker, MultiReader};
pub use nop::{Nop, nop_closer, nop_read_seek_closer};
pub use whence::Whence;
