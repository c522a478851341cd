//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` wraps the container codec and the JSON mapping so the
//! rest of the application can write
//! `store.set("DATABASE_URL", "postgres://...")` and `store.persist(&key)`.
//!
//! The key is passed to `load` and `persist` rather than kept in the
//! store, so it lives only as long as the command that derived it.

use std::path::{Path, PathBuf};

use serde_json::Value;
use zeroize::Zeroizing;

use crate::crypto::kdf::SymmetricKey;
use crate::errors::{MumsError, Result};

use super::format::{self, VaultCodec};
use super::mapping::{self, env_value, VaultMapping};

/// An opened vault: its location, its codec and the decrypted mapping.
pub struct VaultStore {
    /// Path to the container file on disk.
    path: PathBuf,

    /// Codec used to decrypt on load and encrypt on persist.
    codec: VaultCodec,

    /// Decrypted entries, in insertion order.
    entries: VaultMapping,
}

impl std::fmt::Debug for VaultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultStore")
            .field("path", &self.path)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the vault at `path`.
    ///
    /// A missing file is a vault that has not been written yet and loads
    /// as an empty mapping.  Otherwise the container is decrypted,
    /// verified and parsed; errors come back as-is so callers can tell
    /// "wrong key / corrupted" (`is_wrong_key_or_corrupt`) apart from
    /// "not a vault".
    pub fn load(path: &Path, key: &SymmetricKey, codec: VaultCodec) -> Result<Self> {
        let entries = match format::read_vault(path)? {
            None => VaultMapping::new(),
            Some(container) => {
                let plaintext = Zeroizing::new(codec.decrypt(key, &container)?);
                mapping::from_json(&plaintext)?
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            codec,
            entries,
        })
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Insert or overwrite an entry.  An overwritten entry keeps its
    /// position in the mapping.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        Self::validate_entry_name(name)?;
        self.entries.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Look up an entry's value.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.entries
            .get(name)
            .ok_or_else(|| MumsError::EntryNotFound(name.to_string()))
    }

    /// Remove an entry and return its value.  Removing a name that is
    /// not present is an error, not a no-op.
    pub fn delete(&mut self, name: &str) -> Result<Value> {
        self.entries
            .shift_remove(name)
            .ok_or_else(|| MumsError::EntryNotFound(name.to_string()))
    }

    /// All entries rendered as environment variable pairs, in vault order.
    ///
    /// Used by the `run` and `show` commands.
    pub fn env_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.clone(), env_value(value).into_owned()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Serialize the mapping, encrypt it under a fresh IV and replace the
    /// vault file in full.
    pub fn persist(&self, key: &SymmetricKey) -> Result<()> {
        let plaintext = Zeroizing::new(mapping::to_json(&self.entries)?);
        let container = self.codec.encrypt(key, &plaintext)?;
        format::write_vault(&self.path, &container)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the decrypted mapping.
    pub fn entries(&self) -> &VaultMapping {
        &self.entries
    }

    /// Returns the number of entries in the vault.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the vault has an entry with the given name.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Names end up as environment variable names, so they must be
    /// non-empty and free of `=` and NUL.
    fn validate_entry_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(MumsError::InvalidEntryName(
                "entry name cannot be empty".into(),
            ));
        }
        if name.contains('=') || name.contains('\0') {
            return Err(MumsError::InvalidEntryName(format!(
                "'{}' cannot contain '=' or NUL characters",
                name.escape_default()
            )));
        }
        Ok(())
    }
}
