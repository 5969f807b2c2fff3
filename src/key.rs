//! Hexadecimal key parsing and canonicalization
//!
//! The encoding key is a case-insensitive hexadecimal string of 1-64 digits
//! (256 bits at 4 bits per digit). Before it is used as a mask the key is
//! canonicalized: an odd digit count is left-padded with a single `0` so the
//! digits group into whole bytes, then leading `00` digit pairs are stripped.
//! The canonical form is what the transform actually uses and what is echoed
//! back to the user, so canonicalization is deterministic and idempotent.
//!
//! An all-zero key canonicalizes to the degenerate single-nibble key `0`.
//! XOR with zero leaves the input unchanged, so the degenerate key is treated
//! as a configuration error and rejected before any data is touched.

use std::fmt;

/// Maximum raw key length in hex digits (256-bit budget)
pub const MAX_KEY_DIGITS: usize = 64;

/// Key validation and canonicalization errors
///
/// All variants are terminal for the current invocation and are detected
/// before any output byte is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    /// Key is empty or contains a non-hexadecimal character
    Invalid,

    /// Key exceeds [`MAX_KEY_DIGITS`] hex digits
    TooLong,

    /// Key canonicalizes to the all-zero mask, which would leave the
    /// input unchanged
    Degenerate,
}

impl std::error::Error for KeyError {}

impl fmt::Display for KeyError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyError::Invalid => "the encoding key must be a non-empty hexadecimal string".fmt(fmt),
            KeyError::TooLong => "the encoding key exceeds 256 bits".fmt(fmt),
            KeyError::Degenerate => "the encoding key is null".fmt(fmt),
        }
    }
}

/// Canonicalized repeating XOR mask
///
/// An ordered, non-empty sequence of nibble values (0-15), applied cyclically
/// across the byte stream by absolute position. Only canonical keys exist as
/// values of this type; re-canonicalizing the `Display` form returns an equal
/// key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalKey {
    nibbles: Vec<u8>,
}

impl CanonicalKey {
    /// Mask values in application order, each in 0-15
    pub fn nibbles(&self) -> &[u8] {
        &self.nibbles
    }

    /// Number of nibbles in the repeating mask
    pub fn len(&self) -> usize {
        self.nibbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nibbles.is_empty()
    }

    /// True iff this is the degenerate all-zero key (the single nibble `0`)
    pub fn is_degenerate(&self) -> bool {
        self.nibbles == [0]
    }
}

impl fmt::Display for CanonicalKey {
    /// Renders the canonical key as uppercase hex digits
    ///
    /// This is the form shown back to the user; it always re-canonicalizes
    /// to an equal key.
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for nibble in &self.nibbles {
            write!(fmt, "{:X}", nibble)?;
        }
        Ok(())
    }
}

/// Returns true iff `raw` is non-empty and every character is a hex digit
pub fn validate(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parses and canonicalizes a raw hexadecimal key
///
/// Steps:
/// 1. reject empty/non-hex input and keys over [`MAX_KEY_DIGITS`] digits;
/// 2. left-pad with a single `0` digit if the count is odd (odd-length keys
///    are accepted, not rejected, so `"A"` and `"0A"` name the same mask);
/// 3. an all-zero key becomes the degenerate single-nibble key `0`;
/// 4. otherwise strip whole leading `00` digit pairs (never a lone zero
///    nibble) and keep the remaining digits as nibble values in order.
///
/// The degenerate key is returned, not rejected, so the caller can decide
/// how to report it; the engine refuses to run with it.
pub fn canonicalize(raw: &str) -> Result<CanonicalKey, KeyError> {
    if raw.is_empty() {
        return Err(KeyError::Invalid);
    }
    if raw.len() > MAX_KEY_DIGITS {
        return Err(KeyError::TooLong);
    }

    let mut digits = Vec::with_capacity(raw.len() + 1);
    for c in raw.chars() {
        match c.to_digit(16) {
            Some(d) => digits.push(d as u8),
            None => return Err(KeyError::Invalid),
        }
    }

    // whole-byte alignment for the pair stripping below
    if digits.len() % 2 == 1 {
        digits.insert(0, 0);
    }

    if digits.iter().all(|&d| d == 0) {
        return Ok(CanonicalKey { nibbles: vec![0] });
    }

    // strip leading zero bytes, i.e. digit pairs that are both zero;
    // a pair with one non-zero digit always remains
    let mut start = 0;
    while digits[start] == 0 && digits[start + 1] == 0 {
        start += 2;
    }
    digits.drain(..start);

    Ok(CanonicalKey { nibbles: digits })
}
