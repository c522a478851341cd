//! AES-256-CBC encryption of block-aligned buffers.
//!
//! Buffers are processed in fixed-size chunks; the CBC chaining state
//! carries across chunk boundaries, so the chunk size only affects how
//! work is sliced, never the ciphertext.  Padding is the caller's job
//! (see `pad_with_spaces`): the vault format pads with ASCII spaces and
//! records the true length in its header.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::TryRngCore;

use super::kdf::SymmetricKey;
use crate::errors::{MumsError, Result};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Size of the CBC initialization vector in bytes.
pub const IV_LEN: usize = 16;

/// Default chunk size (24 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 24 * 1024;

/// Generate a fresh random IV from the operating system RNG.
pub fn generate_iv() -> Result<[u8; IV_LEN]> {
    let mut iv = [0u8; IV_LEN];
    rand::rngs::OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| MumsError::EncryptionFailed(format!("OS random generator failed: {e}")))?;
    Ok(iv)
}

/// Smallest multiple of the block size that holds `len` bytes, or `None`
/// if that does not fit in a `usize`.
pub fn padded_len(len: usize) -> Option<usize> {
    len.checked_add(BLOCK_LEN - 1).map(|n| n / BLOCK_LEN * BLOCK_LEN)
}

/// Append ASCII spaces until `buf` is block aligned.
pub fn pad_with_spaces(buf: &mut Vec<u8>) {
    let rem = buf.len() % BLOCK_LEN;
    if rem != 0 {
        buf.resize(buf.len() + BLOCK_LEN - rem, b' ');
    }
}

/// Check that `chunk_size` is a positive multiple of the block size.
pub fn validate_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 || chunk_size % BLOCK_LEN != 0 {
        return Err(MumsError::ConfigError(format!(
            "chunk size must be a positive multiple of {BLOCK_LEN} (got {chunk_size})"
        )));
    }
    Ok(())
}

/// Encrypt a block-aligned buffer in place.
pub fn encrypt_in_place(
    key: &SymmetricKey,
    iv: &[u8; IV_LEN],
    buf: &mut [u8],
    chunk_size: usize,
) -> Result<()> {
    validate_chunk_size(chunk_size)?;
    if buf.len() % BLOCK_LEN != 0 {
        return Err(MumsError::EncryptionFailed(format!(
            "plaintext length {} is not a multiple of {BLOCK_LEN}",
            buf.len()
        )));
    }

    let mut cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| MumsError::EncryptionFailed(format!("invalid key or IV length: {e}")))?;

    for chunk in buf.chunks_mut(chunk_size) {
        for block in chunk.chunks_exact_mut(BLOCK_LEN) {
            cipher.encrypt_block_mut(GenericArray::from_mut_slice(block));
        }
    }
    Ok(())
}

/// Decrypt a block-aligned buffer in place.
///
/// CBC has no authentication: a wrong key yields garbage, not an error.
/// Callers detect that through UTF-8 decoding and the integrity digest.
pub fn decrypt_in_place(
    key: &SymmetricKey,
    iv: &[u8; IV_LEN],
    buf: &mut [u8],
    chunk_size: usize,
) -> Result<()> {
    validate_chunk_size(chunk_size)?;
    if buf.len() % BLOCK_LEN != 0 {
        return Err(MumsError::InvalidVaultFormat(format!(
            "ciphertext length {} is not a multiple of {BLOCK_LEN}",
            buf.len()
        )));
    }

    let mut cipher =
        Aes256CbcDec::new_from_slices(key.as_bytes(), iv).map_err(|_| MumsError::DecryptionFailed)?;

    for chunk in buf.chunks_mut(chunk_size) {
        for block in chunk.chunks_exact_mut(BLOCK_LEN) {
            cipher.decrypt_block_mut(GenericArray::from_mut_slice(block));
        }
    }
    Ok(())
}
