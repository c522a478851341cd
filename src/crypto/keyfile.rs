//! Keyfile handling.
//!
//! A keyfile is any text file; its content is the vault passphrase.  By
//! default `~/.ssh/id_rsa` is used, which is fine for a single user but
//! a poor choice for a team.  Whatever it is, keep it out of the
//! repository that holds the vault.

use std::fs;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::errors::{MumsError, Result};

/// Keyfile used when none is configured, relative to the home directory.
const DEFAULT_KEYFILE: &str = ".ssh/id_rsa";

/// `~/.ssh/id_rsa`, or `None` if the home directory cannot be determined.
pub fn default_keyfile_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_KEYFILE))
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Read a keyfile and return its content as passphrase text.
///
/// The file is read as text: it must be UTF-8, and `\r\n` or lone `\r`
/// line endings are normalized to `\n` so the same keyfile yields the
/// same key on every platform.
pub fn load_passphrase(path: &Path) -> Result<Zeroizing<String>> {
    if !path.exists() {
        return Err(MumsError::KeyfileError(format!(
            "keyfile not found at {}",
            path.display()
        )));
    }

    let data = Zeroizing::new(
        fs::read(path)
            .map_err(|e| MumsError::KeyfileError(format!("failed to read keyfile: {e}")))?,
    );

    let text = std::str::from_utf8(&data).map_err(|e| {
        MumsError::Encoding(format!("keyfile {} is not valid UTF-8: {e}", path.display()))
    })?;

    Ok(Zeroizing::new(normalize_newlines(text)))
}

/// Translate `\r\n` and `\r` into `\n`.
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
