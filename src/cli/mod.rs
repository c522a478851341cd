//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::env::VarError;
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::kdf::{derive_key, SymmetricKey};
use crate::crypto::keyfile::load_passphrase;
use crate::errors::{MumsError, Result};
use crate::vault::{VaultLock, VaultStore};

/// Environment variable holding the passphrase directly (CI/CD).
const PASSPHRASE_ENV: &str = "MUMS_PASSPHRASE";

/// mums: encrypted environment variables.
#[derive(Parser)]
#[command(
    name = "mums",
    about = "Encrypted environment variables in a single vault file",
    version
)]
pub struct Cli {
    /// Path to the vault file (created by the first `store`)
    pub vault: PathBuf,

    /// File whose content is the vault passphrase (default: ~/.ssh/id_rsa)
    #[arg(long, env = "MUMS_KEY_FILE", global = true)]
    pub key_file: Option<String>,

    /// Prompt for the passphrase instead of reading a keyfile
    #[arg(long, global = true)]
    pub ask_passphrase: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Show the NAME=VALUE pairs stored in the vault
    Show,

    /// Store a value under a name (add or overwrite)
    Store {
        /// Variable name (e.g. DATABASE_URL)
        name: String,
        /// Value to store
        value: String,
    },

    /// Remove the variable with the given name
    Remove {
        /// Variable name
        name: String,
    },

    /// Run a command with the vault's variables in its environment
    Run {
        /// Start with a clean environment (only vault variables, no inherited vars)
        #[arg(long)]
        clean_env: bool,

        /// Command and arguments (after --)
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },

    /// List variable names and value kinds without revealing values
    List,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.mums.toml` from the current directory (or defaults).
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Get the vault passphrase, trying in order:
/// 1. Interactive prompt, if `--ask-passphrase` was given
/// 2. `MUMS_PASSPHRASE` env var (CI/CD)
/// 3. The keyfile's content
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn read_passphrase(cli: &Cli, settings: &Settings) -> Result<Zeroizing<String>> {
    if cli.ask_passphrase {
        let pw = dialoguer::Password::new()
            .with_prompt("Vault passphrase")
            .interact()
            .map_err(|e| MumsError::CommandFailed(format!("passphrase prompt: {e}")))?;
        return Ok(Zeroizing::new(pw));
    }

    match std::env::var(PASSPHRASE_ENV) {
        Ok(pw) if !pw.is_empty() => return Ok(Zeroizing::new(pw)),
        Ok(_) | Err(VarError::NotPresent) => {}
        Err(VarError::NotUnicode(_)) => {
            return Err(MumsError::Encoding(format!("{PASSPHRASE_ENV} is not valid UTF-8")));
        }
    }

    if cli.key_file.is_none() && settings.key_file.is_none() {
        output::warning(
            "Using ~/.ssh/id_rsa as the keyfile; a dedicated --key-file is safer for shared vaults.",
        );
    }

    let path = settings.key_file_path(cli.key_file.as_deref())?;
    load_passphrase(&path)
}

/// Derive the vault key for this invocation.
pub fn vault_key(cli: &Cli, settings: &Settings) -> Result<SymmetricKey> {
    let passphrase = read_passphrase(cli, settings)?;
    derive_key(passphrase.as_bytes())
}

/// Take the vault lock (unless disabled in settings).
pub fn lock_vault(cli: &Cli, settings: &Settings, exclusive: bool) -> Result<VaultLock> {
    if !settings.lock {
        return Ok(VaultLock::disabled());
    }
    if exclusive {
        VaultLock::exclusive(&cli.vault)
    } else {
        VaultLock::shared(&cli.vault)
    }
}

/// Load the vault named on the command line.
pub fn open_store(cli: &Cli, settings: &Settings, key: &SymmetricKey) -> Result<VaultStore> {
    VaultStore::load(&cli.vault, key, settings.codec()?)
}
