//! Passphrase-to-key derivation.
//!
//! The symmetric key is the SHA-256 digest of the passphrase's UTF-8
//! bytes.  There is no salt and no work factor: the keyfile is expected
//! to carry enough entropy on its own (an SSH private key by default).

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::errors::{MumsError, Result};

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte AES-256 key that zeroes its memory when dropped.
///
/// Derived fresh for every command and never written anywhere.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SymmetricKey {
    bytes: [u8; KEY_LEN],
}

impl SymmetricKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// Derive the vault key from raw passphrase bytes.
///
/// The passphrase must be valid UTF-8; anything else is rejected with
/// `MumsError::Encoding` rather than hashed as opaque bytes.
pub fn derive_key(passphrase: &[u8]) -> Result<SymmetricKey> {
    let text = std::str::from_utf8(passphrase)
        .map_err(|e| MumsError::Encoding(format!("passphrase is not valid UTF-8: {e}")))?;
    Ok(derive_key_from_str(text))
}

/// Derive the vault key from a passphrase that is already text.
pub fn derive_key_from_str(passphrase: &str) -> SymmetricKey {
    let digest = Sha256::digest(passphrase.as_bytes());
    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&digest);
    SymmetricKey::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_passphrase_same_key() {
        let k1 = derive_key(b"hunter2").unwrap();
        let k2 = derive_key(b"hunter2").unwrap();
        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_passphrase_different_key() {
        let k1 = derive_key(b"hunter2").unwrap();
        let k2 = derive_key(b"hunter3").unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn key_is_sha256_of_passphrase() {
        // sha256("abc")
        let key = derive_key(b"abc").unwrap();
        let expected: [u8; 32] = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(key.as_bytes(), &expected);
    }

    #[test]
    fn non_utf8_passphrase_is_rejected() {
        let result = derive_key(&[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(MumsError::Encoding(_))));
    }

    #[test]
    fn debug_does_not_leak_key_bytes() {
        let key = derive_key(b"abc").unwrap();
        assert_eq!(format!("{key:?}"), "SymmetricKey(..)");
    }
}
