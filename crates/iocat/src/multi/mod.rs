//! Concatenation of several streams into one
//!
//! - [`MultiReader`] concatenates plain readers for sequential reading.
//! - [`MultiReadSeeker`] concatenates seekable streams and supports seeking
//!   from the start, the current offset or the end, plus jumping to the start
//!   of a given sub-stream.
//!
//! Both own their sub-streams until [`crate::Close::close`], which closes
//! every sub-stream and reports all failures together.

mod reader;
mod seeker;
mod stream;

pub use reader::MultiReader;
pub use seeker::MultiReadSeeker;
