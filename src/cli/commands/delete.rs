//! `keysafe delete`: remove a secret.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::config::Settings;
use crate::errors::{Result, StoreError};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, settings: &Settings, key: &str, force: bool) -> Result<()> {
    let store = open_store(cli, settings)?;

    // Validate before prompting so an empty key never reaches the vault.
    store.build_query(key)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete secret '{key}'?"))
            .default(false)
            .interact()
            .map_err(|e| StoreError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    // Deleting a key that does not exist is not an error.
    store.remove(key)?;

    output::success(&format!(
        "Deleted secret '{key}' from service '{}'",
        store.namespace()
    ));

    Ok(())
}
