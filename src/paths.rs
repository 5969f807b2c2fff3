//! Reserved-extension handling and transform direction
//!
//! A file whose name ends with the reserved `.kam` extension
//! (case-insensitive) is considered already transformed; its presence
//! toggles the direction and is stripped or appended when deriving the
//! output path. Pure string transforms, no filesystem access.

use std::path::{Path, PathBuf};

/// Reserved extension marking an already-transformed file
pub const KAM_EXT: &str = ".kam";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// True iff the file name ends with the reserved extension
///
/// Only the final four characters count: `archive.kam.txt` is not treated
/// as transformed.
pub fn is_encrypted(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    name.len() >= KAM_EXT.len()
        && name
            .get(name.len() - KAM_EXT.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(KAM_EXT))
}

/// Direction inferred from the input path
pub fn direction(path: &Path) -> Direction {
    if is_encrypted(path) {
        Direction::Decrypt
    } else {
        Direction::Encrypt
    }
}

/// Derives the companion output path by toggling the reserved extension
///
/// Strips `.kam` when present, appends it otherwise; applying this twice
/// returns the original path.
pub fn companion(path: &Path) -> PathBuf {
    let p = path.to_string_lossy();
    if is_encrypted(path) {
        PathBuf::from(&p[..p.len() - KAM_EXT.len()])
    } else {
        PathBuf::from(format!("{}{}", p, KAM_EXT))
    }
}
