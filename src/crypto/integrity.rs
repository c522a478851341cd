//! Tamper-evidence digest stored in the vault header.
//!
//! ```text
//! digest = SHA-256( repr(iv) || hex(SHA-256(plaintext)) )
//! ```
//!
//! `repr(iv)` is the IV rendered as a Python `bytes` literal
//! (`b'\x00\x1f...'`).  That textual form is what existing vault files
//! were written with, so it is reproduced exactly here.
//!
//! The digest is not keyed.  It catches corruption and a mismatched key,
//! not a forger who can recompute SHA-256.

use std::fmt::Write;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::errors::{MumsError, Result};

/// Size of the integrity digest (SHA-256 = 32 bytes).
pub const DIGEST_LEN: usize = 32;

/// Compute the integrity digest binding `iv` to `plaintext`.
pub fn compute_digest(iv: &[u8], plaintext: &str) -> [u8; DIGEST_LEN] {
    let content_hash = Sha256::digest(plaintext.as_bytes());

    let mut hasher = Sha256::new();
    hasher.update(iv_repr(iv).as_bytes());
    hasher.update(format!("{content_hash:x}").as_bytes());

    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Recompute the digest and compare it to `expected` in constant time.
pub fn verify_digest(iv: &[u8], plaintext: &str, expected: &[u8]) -> Result<()> {
    let actual = compute_digest(iv, plaintext);
    if actual.as_slice().ct_eq(expected).into() {
        Ok(())
    } else {
        Err(MumsError::IntegrityMismatch)
    }
}

/// Render bytes the way Python's `repr(bytes)` does.
///
/// Single quotes are used unless the data contains `'` and no `"`.
/// Backslash, the chosen quote, `\t`, `\n` and `\r` are escaped; other
/// bytes outside printable ASCII become `\xNN` with lowercase hex.
pub fn iv_repr(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };

    let mut out = String::with_capacity(bytes.len() * 4 + 3);
    out.push('b');
    out.push(quote as char);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            _ if b == quote => {
                out.push('\\');
                out.push(quote as char);
            }
            0x20..=0x7e => out.push(b as char),
            _ => {
                // Writing to a String cannot fail.
                let _ = write!(out, "\\x{b:02x}");
            }
        }
    }
    out.push(quote as char);
    out
}
