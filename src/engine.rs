//! Streaming XOR transform engine
//!
//! Reads the input in bounded chunks, XORs each byte with the repeating
//! nibble mask and writes the result before the next chunk is read, so peak
//! memory stays at one chunk regardless of input size. The mask index of a
//! byte is its absolute offset in the logical stream modulo the key length,
//! never its offset within the current chunk; chunk boundaries therefore
//! cannot shift the mask phase, and any same-order chunking of the input
//! produces identical output.
//!
//! Applying the transform twice with the same key restores the original
//! bytes: the same `run` call both encrypts and decrypts.

use std::fmt;
use std::io::{Read, Write};

use crate::key::{self, CanonicalKey, KeyError};
use crate::progress::Progress;

/// Upper bound on the per-iteration chunk buffer, in bytes
pub const MAX_CHUNK: usize = 1_000_000;

/// Transform failures
///
/// Key errors are detected before any output byte is written. An I/O error
/// aborts the run immediately; a partially written output file is the
/// caller's responsibility.
#[derive(Debug)]
pub enum EngineError {
    /// The raw key failed validation or canonicalized to the zero mask
    Key(KeyError),

    /// A read or write failed mid-stream; no retry, no rollback
    Io(std::io::Error),
}

impl std::error::Error for EngineError {}

impl fmt::Display for EngineError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EngineError::Key(e) => write!(fmt, "invalid key: {}", e),
            EngineError::Io(e) => write!(fmt, "i/o failure: {}", e),
        }
    }
}

impl From<KeyError> for EngineError {
    fn from(e: KeyError) -> Self {
        EngineError::Key(e)
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e)
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Total bytes read, transformed and written
    pub bytes: u64,
}

/// XORs `data` in place with the repeating nibble mask
///
/// The mask index for `data[i]` is `(start_offset + i) % key.len()`, where
/// `start_offset` is the absolute offset of `data[0]` in the logical byte
/// stream. Byte order is preserved. Reapplying with the same key and offset
/// restores the input exactly.
pub fn apply_mask(key: &CanonicalKey, data: &mut [u8], start_offset: u64) {
    let nibbles = key.nibbles();
    let key_len = nibbles.len() as u64;
    for (i, byte) in data.iter_mut().enumerate() {
        *byte ^= nibbles[((start_offset + i as u64) % key_len) as usize];
    }
}

/// Runs the chunked transform from `input` to `output`
///
/// `total` is the declared input length from the caller's prior file-size
/// check; it drives chunk sizing and progress display. Each iteration reads
/// up to `min(MAX_CHUNK, total - bytes_done)` bytes, masks them at the
/// current absolute offset, writes the chunk in full and emits one progress
/// update. A zero-byte read ends the run (actual end-of-input accounting,
/// not an iteration count), so a final short chunk is processed in full.
///
/// Fails with [`EngineError::Key`] before anything is written if the key is
/// empty, non-hexadecimal, over 64 digits, or canonicalizes to the zero
/// mask.
pub fn run<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    raw_key: &str,
    total: u64,
    progress: &mut dyn Progress,
) -> Result<RunSummary, EngineError> {
    let key = key::canonicalize(raw_key)?;
    if key.is_degenerate() {
        return Err(KeyError::Degenerate.into());
    }

    let mut buf = vec![0u8; (total.min(MAX_CHUNK as u64)) as usize];
    let mut done: u64 = 0;

    while done < total {
        let want = (total - done).min(buf.len() as u64) as usize;
        let n = input.read(&mut buf[..want])?;
        if n == 0 {
            break;
        }
        apply_mask(&key, &mut buf[..n], done);
        output.write_all(&buf[..n])?;
        done += n as u64;
        progress.update(done, total);
    }
    output.flush()?;

    if done < total {
        tracing::warn!("input ended after {} of {} declared bytes", done, total);
    }
    tracing::debug!("transform complete, {} bytes processed", done);

    Ok(RunSummary { bytes: done })
}
