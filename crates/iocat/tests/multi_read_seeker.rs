#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for the seekable concatenation engine
//!
//! Checks the engine against a single contiguous buffer: every seek must land
//! where the same seek on the concatenated bytes lands, and reading from
//! there must yield exactly the same suffix.

use iocat::{Close, MultiReadSeeker, ReadSeekClose, nop_closer};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::PathBuf;

fn read_rest<R: Read + ?Sized>(r: &mut R) -> Vec<u8> {
    let mut out = Vec::new();
    r.read_to_end(&mut out).expect("read to end");
    out
}

fn write_parts(dir: &tempfile::TempDir, parts: &[&str]) -> Vec<PathBuf> {
    parts
        .iter()
        .enumerate()
        .map(|(i, data)| {
            let path = dir.path().join(format!("{}.txt", i + 1));
            std::fs::write(&path, data).expect("write fixture");
            path
        })
        .collect()
}

/// The same content as a single stream, as in-memory parts and as files.
fn equivalent_readers(dir: &tempfile::TempDir) -> Vec<Box<dyn ReadSeekClose>> {
    let paths = write_parts(dir, &["abc", "def", "ghi"]);
    vec![
        Box::new(nop_closer(Cursor::new(b"abcdefghi".to_vec()))),
        Box::new(MultiReadSeeker::from_bytes(["abc", "def", "ghi"])),
        Box::new(MultiReadSeeker::open(&paths).expect("open parts")),
    ]
}

#[test]
fn seek_scenarios_match_a_single_stream() {
    // (setup seek, seek under test, expected offset, expected suffix)
    let cases: [(Option<SeekFrom>, SeekFrom, u64, &str); 8] = [
        (None, SeekFrom::Start(2), 2, "cdefghi"),
        (None, SeekFrom::Start(4), 4, "efghi"),
        (None, SeekFrom::End(-4), 5, "fghi"),
        (None, SeekFrom::End(-9), 0, "abcdefghi"),
        (Some(SeekFrom::Start(4)), SeekFrom::Current(3), 7, "hi"),
        (Some(SeekFrom::Start(4)), SeekFrom::Current(-1), 3, "defghi"),
        (Some(SeekFrom::Start(4)), SeekFrom::Current(-4), 0, "abcdefghi"),
        (Some(SeekFrom::End(0)), SeekFrom::Start(0), 0, "abcdefghi"),
    ];

    let dir = tempfile::tempdir().expect("tempdir");
    for (i, (setup, pos, want, after)) in cases.into_iter().enumerate() {
        for (j, mut r) in equivalent_readers(&dir).into_iter().enumerate() {
            if let Some(setup) = setup {
                r.seek(setup).expect("setup seek");
            }
            let got = r.seek(pos).expect("seek");
            assert_eq!(got, want, "cases[{i}-{j}] offset");
            assert_eq!(read_rest(&mut r), after.as_bytes(), "cases[{i}-{j}] suffix");
            r.close().expect("close");
        }
    }
}

#[test]
fn reading_everything_then_rewinding() {
    let dir = tempfile::tempdir().expect("tempdir");
    for mut r in equivalent_readers(&dir) {
        assert_eq!(read_rest(&mut r), b"abcdefghi");
        assert_eq!(r.seek(SeekFrom::Start(0)).expect("rewind"), 0);
        assert_eq!(read_rest(&mut r), b"abcdefghi");
    }
}

#[test]
fn seek_past_end_clamps_to_total_length() {
    let mut r = MultiReadSeeker::from_bytes(["abc", "def", "ghi"]);
    assert_eq!(r.seek(SeekFrom::Start(10)).expect("seek"), 9);
    let mut buf = [0u8; 8];
    assert_eq!(r.read(&mut buf).expect("read"), 0);
}

#[test]
fn open_reports_missing_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut paths = write_parts(&dir, &["abc"]);
    paths.push(dir.path().join("missing.txt"));

    let err = MultiReadSeeker::open(&paths).expect_err("missing file");
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn open_files_close_cleanly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = write_parts(&dir, &["a", "bc", "def"]);
    let mut r = MultiReadSeeker::open(&paths).expect("open parts");
    assert_eq!(r.len(), 6);
    assert_eq!(r.seek_to_sub_stream(2).expect("seek"), 3);
    assert_eq!(read_rest(&mut r), b"def");
    r.close().expect("close");
    assert_eq!(r.sub_stream_count(), 0);
}

fn parts() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..8), 1..6)
}

fn concat(parts: &[Vec<u8>]) -> Vec<u8> {
    parts.concat()
}

proptest! {
    /// Seeking from the start then reading yields the suffix at that offset
    #[test]
    fn seek_start_yields_suffix(parts in parts(), offset in 0u64..48) {
        let whole = concat(&parts);
        let mut r = MultiReadSeeker::from_bytes(&parts);

        let expected = offset.min(whole.len() as u64);
        prop_assert_eq!(r.seek(SeekFrom::Start(offset)).unwrap(), expected);
        prop_assert_eq!(read_rest(&mut r), whole[expected as usize..].to_vec());
    }

    /// Seeking from the end is seeking from the start at `len + offset`
    #[test]
    fn seek_end_matches_seek_start(parts in parts(), back in 0u64..48) {
        let whole = concat(&parts);
        let back = back.min(whole.len() as u64);
        let target = whole.len() as u64 - back;

        let mut r = MultiReadSeeker::from_bytes(&parts);
        prop_assert_eq!(r.seek(SeekFrom::End(-(back as i64))).unwrap(), target);
        prop_assert_eq!(read_rest(&mut r), whole[target as usize..].to_vec());
    }

    /// Relative seeks from any starting point land on the absolute target
    #[test]
    fn seek_current_matches_seek_start(
        parts in parts(),
        start in 0u64..48,
        delta in -48i64..48,
    ) {
        let whole = concat(&parts);
        let len = whole.len() as i64;
        let start = start.min(whole.len() as u64);
        let target = start as i64 + delta;
        prop_assume!(target >= 0);

        let mut r = MultiReadSeeker::from_bytes(&parts);
        r.seek(SeekFrom::Start(start)).unwrap();
        let expected = target.min(len) as u64;
        prop_assert_eq!(r.seek(SeekFrom::Current(delta)).unwrap(), expected);
        prop_assert_eq!(read_rest(&mut r), whole[expected as usize..].to_vec());
    }

    /// Jumping to a sub-stream then reading yields the remaining parts
    #[test]
    fn seek_to_sub_stream_yields_remaining_parts(parts in parts(), index in 0usize..8) {
        let mut r = MultiReadSeeker::from_bytes(&parts);
        r.seek(SeekFrom::End(0)).unwrap();
        r.seek_to_sub_stream(index).unwrap();

        let skip = index.min(parts.len());
        prop_assert_eq!(read_rest(&mut r), concat(&parts[skip..]));
    }

    /// A sequence of arbitrary seeks and short reads never drops or repeats
    /// bytes relative to the contiguous buffer
    #[test]
    fn interleaved_seeks_and_reads_track_a_cursor(
        parts in parts(),
        ops in prop::collection::vec((0u8..4, -20i64..20, 0usize..6), 1..12),
    ) {
        let whole = concat(&parts);
        let mut model = Cursor::new(whole.clone());
        let mut r = MultiReadSeeker::from_bytes(&parts);
        let len = whole.len() as i64;

        for (kind, amount, read_len) in ops {
            let pos = match kind {
                0 => SeekFrom::Start(amount.unsigned_abs()),
                1 => SeekFrom::Current(amount),
                2 => SeekFrom::End(-(amount.abs())),
                _ => {
                    let mut got = vec![0u8; read_len];
                    let mut want = vec![0u8; read_len];
                    let n = r.read(&mut got).unwrap();
                    let m = model.read(&mut want).unwrap();
                    prop_assert_eq!(&got[..n], &want[..m]);
                    continue;
                }
            };

            let current = model.position() as i64;
            let target = match pos {
                SeekFrom::Start(o) => o as i64,
                SeekFrom::Current(d) => current + d,
                SeekFrom::End(d) => len + d,
            };
            if target < 0 {
                // A failed seek leaves the position unspecified.
                prop_assert!(r.seek(pos).is_err());
                return Ok(());
            }
            let clamped = target.min(len) as u64;
            model.set_position(clamped);
            prop_assert_eq!(r.seek(pos).unwrap(), clamped);
        }

        prop_assert_eq!(read_rest(&mut r), read_rest(&mut model));
    }
}
