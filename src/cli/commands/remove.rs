//! `mums remove`: delete an entry from the vault.

use crate::cli::output;
use crate::cli::{load_settings, lock_vault, open_store, vault_key, Cli};
use crate::errors::Result;

/// Execute the `remove` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let settings = load_settings()?;
    let key = vault_key(cli, &settings)?;

    let _lock = lock_vault(cli, &settings, true)?;
    let mut store = open_store(cli, &settings, &key)?;

    // Fails with EntryNotFound before anything is rewritten.
    store.delete(name)?;
    store.persist(&key)?;

    output::success(&format!("Removed variable '{name}'"));

    Ok(())
}
