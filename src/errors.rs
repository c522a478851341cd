use thiserror::Error;

/// All errors that can occur in mums.
#[derive(Debug, Error)]
pub enum MumsError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: wrong key or corrupted vault")]
    DecryptionFailed,

    #[error("Integrity check failed: wrong key or the vault file was modified")]
    IntegrityMismatch,

    #[error("Invalid encoding: {0}")]
    Encoding(String),

    // --- Vault errors ---
    #[error("Not a vault file: {0}")]
    InvalidVaultFormat(String),

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Invalid entry name: {0}")]
    InvalidEntryName(String),

    // --- Keyfile errors ---
    #[error("Keyfile error: {0}")]
    KeyfileError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Child process exited with code {0}")]
    ChildProcessFailed(i32),

    #[error("No command specified, use `mums <VAULT> run -- <command>`")]
    NoCommandSpecified,
}

impl MumsError {
    /// True for failures that mean "wrong key or corrupted file", as opposed
    /// to a file that is not a vault at all.
    pub fn is_wrong_key_or_corrupt(&self) -> bool {
        matches!(self, Self::DecryptionFailed | Self::IntegrityMismatch)
    }
}

/// Convenience type alias for mums results.
pub type Result<T> = std::result::Result<T, MumsError>;
