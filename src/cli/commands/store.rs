//! `mums store`: add or overwrite an entry in the vault.

use crate::cli::output;
use crate::cli::{load_settings, lock_vault, open_store, vault_key, Cli};
use crate::errors::Result;

/// Execute the `store` command.
pub fn execute(cli: &Cli, name: &str, value: &str) -> Result<()> {
    let settings = load_settings()?;
    let key = vault_key(cli, &settings)?;

    // Hold the lock across load, mutate and persist.
    let _lock = lock_vault(cli, &settings, true)?;
    let mut store = open_store(cli, &settings, &key)?;

    let existed = store.contains_key(name);
    store.set(name, value)?;
    store.persist(&key)?;

    let op = if existed { "updated" } else { "added" };
    output::success(&format!(
        "Variable '{}' {} in {} ({} total)",
        name,
        op,
        cli.vault.display(),
        store.len()
    ));

    Ok(())
}
