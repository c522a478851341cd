//! Advisory locking around vault read-modify-write.
//!
//! The lock is held on the directory that contains the vault, not
//! on the vault file itself: `write_vault` replaces the file by rename,
//! which would silently detach a lock held on the old inode.  Locking the
//! directory also avoids leaving lock files next to the vault.
//!
//! The lock is released when the guard is dropped.

use std::fs::File;
use std::path::Path;

use crate::errors::Result;

/// Held for the duration of a load / mutate / persist sequence.
#[derive(Debug)]
pub struct VaultLock {
    _dir: Option<File>,
}

impl VaultLock {
    /// Shared lock for read-only commands.
    pub fn shared(vault_path: &Path) -> Result<Self> {
        Self::acquire(vault_path, false)
    }

    /// Exclusive lock for commands that rewrite the vault.
    pub fn exclusive(vault_path: &Path) -> Result<Self> {
        Self::acquire(vault_path, true)
    }

    /// A guard that locks nothing (locking disabled in settings).
    pub fn disabled() -> Self {
        Self { _dir: None }
    }

    #[cfg(unix)]
    fn acquire(vault_path: &Path, exclusive: bool) -> Result<Self> {
        use fs2::FileExt;

        let dir = match vault_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        // A missing directory means there is no vault to race on; the
        // write that follows will report the real error.
        if !dir.is_dir() {
            return Ok(Self::disabled());
        }

        let handle = File::open(dir)?;
        if exclusive {
            FileExt::lock_exclusive(&handle)?;
        } else {
            FileExt::lock_shared(&handle)?;
        }

        Ok(Self { _dir: Some(handle) })
    }

    #[cfg(not(unix))]
    fn acquire(_vault_path: &Path, _exclusive: bool) -> Result<Self> {
        Ok(Self::disabled())
    }
}
