//! Binary vault container format.
//!
//! A vault file has this layout:
//!
//! ```text
//! [plaintext length: 8 bytes LE][IV: 16 bytes][digest: 32 bytes][AES-256-CBC ciphertext]
//! ```
//!
//! - **Length**: byte length of the plaintext before padding.  It is the
//!   only thing that tells decryption where the plaintext ends.
//! - **IV**: random per write, never reused.
//! - **Digest**: see `crypto::integrity`.
//! - **Ciphertext**: the plaintext padded with ASCII spaces to a multiple
//!   of 16 bytes, encrypted in CBC mode.

use std::fs;
use std::path::Path;

use zeroize::Zeroize;

use crate::crypto::encryption::{
    decrypt_in_place, encrypt_in_place, generate_iv, pad_with_spaces, padded_len,
    validate_chunk_size, DEFAULT_CHUNK_SIZE, IV_LEN,
};
use crate::crypto::integrity::{compute_digest, verify_digest, DIGEST_LEN};
use crate::crypto::kdf::SymmetricKey;
use crate::errors::{MumsError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Size of the little-endian length field.
const LENGTH_LEN: usize = 8;

/// Total header size: length + IV + digest.
pub const HEADER_LEN: usize = LENGTH_LEN + IV_LEN + DIGEST_LEN;

// ---------------------------------------------------------------------------
// ContainerHeader
// ---------------------------------------------------------------------------

/// The fixed 56-byte header at the start of every vault file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Plaintext length in bytes, before padding.
    pub plaintext_len: u64,
    pub iv: [u8; IV_LEN],
    pub digest: [u8; DIGEST_LEN],
}

impl ContainerHeader {
    /// Serialize the header into its on-disk form.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..LENGTH_LEN].copy_from_slice(&self.plaintext_len.to_le_bytes());
        out[LENGTH_LEN..LENGTH_LEN + IV_LEN].copy_from_slice(&self.iv);
        out[LENGTH_LEN + IV_LEN..].copy_from_slice(&self.digest);
        out
    }

    /// Split a container into its header and ciphertext.
    pub fn parse(container: &[u8]) -> Result<(Self, &[u8])> {
        if container.len() < HEADER_LEN {
            return Err(MumsError::InvalidVaultFormat(format!(
                "file is {} bytes, smaller than the {HEADER_LEN}-byte header",
                container.len()
            )));
        }

        let (header, body) = container.split_at(HEADER_LEN);

        let mut len_bytes = [0u8; LENGTH_LEN];
        len_bytes.copy_from_slice(&header[..LENGTH_LEN]);
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&header[LENGTH_LEN..LENGTH_LEN + IV_LEN]);
        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(&header[LENGTH_LEN + IV_LEN..]);

        Ok((
            Self {
                plaintext_len: u64::from_le_bytes(len_bytes),
                iv,
                digest,
            },
            body,
        ))
    }
}

// ---------------------------------------------------------------------------
// VaultCodec
// ---------------------------------------------------------------------------

/// Encrypts plaintext into vault containers and back.
#[derive(Debug, Clone, Copy)]
pub struct VaultCodec {
    chunk_size: usize,
}

impl Default for VaultCodec {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl VaultCodec {
    /// Build a codec with a custom chunk size (positive multiple of 16).
    pub fn with_chunk_size(chunk_size: usize) -> Result<Self> {
        validate_chunk_size(chunk_size)?;
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Encrypt `plaintext` under a freshly generated IV.
    pub fn encrypt(&self, key: &SymmetricKey, plaintext: &str) -> Result<Vec<u8>> {
        let iv = generate_iv()?;
        self.encrypt_with_iv(key, &iv, plaintext)
    }

    /// Encrypt `plaintext` under a caller-chosen IV.
    ///
    /// Reusing an IV with the same key leaks plaintext structure; outside
    /// of fixed test vectors use `encrypt`.
    pub fn encrypt_with_iv(
        &self,
        key: &SymmetricKey,
        iv: &[u8; IV_LEN],
        plaintext: &str,
    ) -> Result<Vec<u8>> {
        let header = ContainerHeader {
            plaintext_len: plaintext.len() as u64,
            iv: *iv,
            digest: compute_digest(iv, plaintext),
        };

        let mut body = plaintext.as_bytes().to_vec();
        pad_with_spaces(&mut body);
        let encrypted = encrypt_in_place(key, iv, &mut body, self.chunk_size);
        if let Err(e) = encrypted {
            body.zeroize();
            return Err(e);
        }

        let mut out = Vec::with_capacity(HEADER_LEN + body.len());
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// Decrypt and verify a container produced by `encrypt`.
    ///
    /// The stored length is authoritative: the plaintext is truncated to
    /// it, never trimmed of trailing whitespace.
    pub fn decrypt(&self, key: &SymmetricKey, container: &[u8]) -> Result<String> {
        let (header, ciphertext) = ContainerHeader::parse(container)?;

        let plaintext_len = usize::try_from(header.plaintext_len).map_err(|_| {
            MumsError::InvalidVaultFormat(format!(
                "length field {} exceeds platform address space",
                header.plaintext_len
            ))
        })?;
        let expected = padded_len(plaintext_len).ok_or_else(|| {
            MumsError::InvalidVaultFormat(format!(
                "length field {plaintext_len} is too large to be a vault"
            ))
        })?;
        if ciphertext.len() != expected {
            return Err(MumsError::InvalidVaultFormat(format!(
                "length field {plaintext_len} does not match {} bytes of ciphertext",
                ciphertext.len()
            )));
        }

        let mut buf = ciphertext.to_vec();
        decrypt_in_place(key, &header.iv, &mut buf, self.chunk_size)?;
        buf.truncate(plaintext_len);

        let plaintext = String::from_utf8(buf).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            MumsError::DecryptionFailed
        })?;

        verify_digest(&header.iv, &plaintext, &header.digest)?;
        Ok(plaintext)
    }
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Read a whole container file, or `None` if it does not exist.
pub fn read_vault(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write a container file to disk **atomically**.
///
/// The bytes go to a temp file in the same directory, which is then
/// renamed over `path`, so readers never see a half-written vault.
pub fn write_vault(path: &Path, container: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let written =
        write_private(&tmp_path, container).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Write `data` to `path`, restricted to owner read/write on Unix.
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    fs::write(path, data)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::derive_key;

    #[test]
    fn header_layout_is_little_endian() {
        let header = ContainerHeader {
            plaintext_len: 0x0102,
            iv: [0xAA; IV_LEN],
            digest: [0xBB; DIGEST_LEN],
        };
        let bytes = header.to_bytes();
        assert_eq!(&bytes[..8], &[0x02, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..24], &[0xAA; 16]);
        assert_eq!(&bytes[24..56], &[0xBB; 32]);

        let (parsed, rest) = ContainerHeader::parse(&bytes).unwrap();
        assert_eq!(parsed, header);
        assert!(rest.is_empty());
    }

    #[test]
    fn short_input_is_not_a_vault() {
        let result = ContainerHeader::parse(&[0u8; HEADER_LEN - 1]);
        assert!(matches!(result, Err(MumsError::InvalidVaultFormat(_))));
    }

    #[test]
    fn empty_mapping_still_produces_a_ciphertext_block() {
        let key = derive_key(b"k").unwrap();
        let container = VaultCodec::default().encrypt(&key, "{}").unwrap();
        assert_eq!(container.len(), HEADER_LEN + 16);
    }

    #[test]
    fn codec_rejects_bad_chunk_size() {
        assert!(VaultCodec::with_chunk_size(100).is_err());
        assert_eq!(VaultCodec::with_chunk_size(64).unwrap().chunk_size(), 64);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let key = derive_key(b"k").unwrap();
        let mut container = VaultCodec::default().encrypt(&key, "{}").unwrap();
        container[0] = 40;
        let result = VaultCodec::default().decrypt(&key, &container);
        assert!(matches!(result, Err(MumsError::InvalidVaultFormat(_))));
    }

    #[test]
    fn write_vault_replaces_file_and_cleans_temp() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("prod");

        write_vault(&path, b"first").unwrap();
        write_vault(&path, b"second").unwrap();

        assert_eq!(read_vault(&path).unwrap().unwrap(), b"second");
        assert!(!dir.path().join(".prod.tmp").exists());
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("prod");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), b"x").unwrap();

        assert!(write_vault(&path, b"data").is_err());
        assert!(!dir.path().join(".prod.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn written_vault_is_owner_only_even_over_stale_temp() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("prod");
        let stale = dir.path().join(".prod.tmp");
        fs::write(&stale, b"leftover").unwrap();
        fs::set_permissions(&stale, fs::Permissions::from_mode(0o644)).unwrap();

        write_vault(&path, b"data").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!stale.exists());
    }

    #[test]
    fn read_vault_missing_file_is_none() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(read_vault(&dir.path().join("missing")).unwrap().is_none());
    }
}
