//! `mums list`: display entry names in a table.

use crate::cli::output;
use crate::cli::{load_settings, lock_vault, open_store, vault_key, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let key = vault_key(cli, &settings)?;

    let _lock = lock_vault(cli, &settings, false)?;
    let store = open_store(cli, &settings, &key)?;

    output::info(&format!(
        "{}: {} variable(s)",
        cli.vault.display(),
        store.len()
    ));

    output::print_entries_table(store.entries());

    Ok(())
}
