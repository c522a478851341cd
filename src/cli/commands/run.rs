//! `mums run`: inject the vault's entries into a child process.

use crate::cli::output;
use crate::cli::{load_settings, lock_vault, open_store, vault_key, Cli};
use crate::errors::{MumsError, Result};
use crate::runner;

/// Execute the `run` command.
pub fn execute(cli: &Cli, command: &[String], clean_env: bool) -> Result<()> {
    if command.is_empty() {
        return Err(MumsError::NoCommandSpecified);
    }

    let settings = load_settings()?;
    let key = vault_key(cli, &settings)?;

    // Only hold the lock while reading; the child may run for a long time.
    let env = {
        let _lock = lock_vault(cli, &settings, false)?;
        open_store(cli, &settings, &key)?.env_pairs()
    };
    drop(key);

    let target = if clean_env {
        "clean environment"
    } else {
        "environment"
    };
    output::status(&format!("Injected {} variables into {target}", env.len()));

    runner::run(command, &env, clean_env)
}
