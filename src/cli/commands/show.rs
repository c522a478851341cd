//! `mums show`: print every entry as NAME=VALUE.

use crate::cli::{load_settings, lock_vault, open_store, vault_key, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings()?;
    let key = vault_key(cli, &settings)?;

    let _lock = lock_vault(cli, &settings, false)?;
    let store = open_store(cli, &settings, &key)?;

    // Plain output, one pair per line, so it can be piped or sourced.
    for (name, value) in store.env_pairs() {
        println!("{name}={value}");
    }

    Ok(())
}
