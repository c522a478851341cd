use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::encryption::{validate_chunk_size, DEFAULT_CHUNK_SIZE};
use crate::crypto::keyfile::{default_keyfile_path, expand_home};
use crate::errors::{MumsError, Result};
use crate::vault::VaultCodec;

/// Project-level configuration, loaded from `.mums.toml`.
///
/// Every field has a sensible default so mums works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Keyfile to use when `--key-file` is not given (`~/` is expanded).
    #[serde(default)]
    pub key_file: Option<String>,

    /// Cipher chunk size in bytes; a positive multiple of 16.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Hold an advisory lock on the vault directory while reading or
    /// rewriting a vault.
    #[serde(default = "default_lock")]
    pub lock: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_lock() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_file: None,
            chunk_size: default_chunk_size(),
            lock: default_lock(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".mums.toml";

    /// Load settings from `<project_dir>/.mums.toml`.
    ///
    /// If the file does not exist, defaults are returned.  If it exists
    /// but cannot be parsed or holds invalid values, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            MumsError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        validate_chunk_size(settings.chunk_size)?;

        Ok(settings)
    }

    /// Build the vault codec for the configured chunk size.
    pub fn codec(&self) -> Result<VaultCodec> {
        VaultCodec::with_chunk_size(self.chunk_size)
    }

    /// Resolve the keyfile path: explicit override, then the configured
    /// `key_file`, then `~/.ssh/id_rsa`.
    pub fn key_file_path(&self, explicit: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = explicit.or(self.key_file.as_deref()) {
            return Ok(expand_home(path));
        }
        default_keyfile_path().ok_or_else(|| {
            MumsError::KeyfileError(
                "cannot determine home directory for the default keyfile, use --key-file".into(),
            )
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────
