use anyhow::{Context, Result};
use std::io::{self, Read, Seek, SeekFrom};
use std::num::Wrapping;
use std::path::Path;
use thiserror::Error;

/// Size of each sampled window. The hash covers the first and last 64 KiB of
/// the file; both windows use this one constant so they cannot drift apart.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Which of the two sampled windows an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Start,
    End,
}

#[derive(Debug, Error)]
pub enum HashError {
    #[error("seek failed")]
    Seek(#[source] io::Error),
    #[error("{}", insufficient_data_message(.window, .actual, .expected))]
    InsufficientData {
        window: Window,
        actual: usize,
        expected: usize,
    },
    #[error("read failed")]
    Io(#[source] io::Error),
}

/// A truncated start window usually means the whole file is under 64 KiB, so
/// that message carries the hint; a truncated end window only says where.
fn insufficient_data_message(window: &Window, actual: &usize, expected: &usize) -> String {
    match window {
        Window::Start => {
            format!("read only {actual} bytes instead of {expected}; file too small?")
        }
        Window::End => format!("read {actual} bytes instead of {expected} at the end"),
    }
}

/// Sum a window as 8192 consecutive little-endian u64 words, mod 2^64.
/// Wraparound is part of the scheme, not an error.
fn sum_words(chunk: &[u8]) -> Wrapping<u64> {
    chunk
        .chunks_exact(8)
        .map(|word| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(word);
            Wrapping(u64::from_le_bytes(bytes))
        })
        .sum()
}

/// Fill `buf` from the current position, looping on short reads and retrying
/// interrupted ones. Hitting end-of-data before the buffer is full reports
/// `InsufficientData` with the byte counts and the window that failed.
fn read_window<S: Read>(source: &mut S, buf: &mut [u8], window: Window) -> Result<(), HashError> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(HashError::Io(e)),
        }
    }
    if filled < buf.len() {
        return Err(HashError::InsufficientData {
            window,
            actual: filled,
            expected: buf.len(),
        });
    }
    Ok(())
}

/// Compute the OpenSubtitles quick hash of a seekable byte source, using the
/// algo described at
/// http://trac.opensubtitles.org/projects/opensubtitles/wiki/HashSourceCodes
///
/// Returns the file size along with the fingerprint. The fingerprint is the
/// wrapping u64 sum of the first 64 KiB word sum, the last 64 KiB word sum
/// (the two windows may overlap for files under 128 KiB), and the total size.
/// The size is derived from the end-relative seek, so it is consistent with
/// where the second window was actually read. Sources shorter than one window
/// fail with `InsufficientData`.
pub fn size_and_hash<S: Read + Seek>(source: &mut S) -> Result<(u64, u64), HashError> {
    let mut chunk = vec![0u8; CHUNK_SIZE];

    source.seek(SeekFrom::Start(0)).map_err(HashError::Seek)?;
    read_window(source, &mut chunk, Window::Start)?;
    let beginning_sum = sum_words(&chunk);

    let pos = source
        .seek(SeekFrom::End(-(CHUNK_SIZE as i64)))
        .map_err(HashError::Seek)?;
    read_window(source, &mut chunk, Window::End)?;
    let end_sum = sum_words(&chunk);

    let size = pos + CHUNK_SIZE as u64;
    let hash = (beginning_sum + end_sum + Wrapping(size)).0;
    Ok((size, hash))
}

/// Open a file and compute its size and quick hash.
pub fn hash_file(path: &Path) -> Result<(u64, u64)> {
    let mut file =
        std::fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    size_and_hash(&mut file).with_context(|| format!("failed to hash {}", path.display()))
}
