//! `keysafe list`: display all keys in the namespace.

use std::collections::BTreeSet;

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::config::Settings;
use crate::errors::{Result, StoreError};

/// Execute the `list` command.
pub fn execute(cli: &Cli, settings: &Settings, json: bool) -> Result<()> {
    let store = open_store(cli, settings)?;
    let keys = store.list()?;

    if json {
        println!("{}", render_json(&keys)?);
        return Ok(());
    }

    output::info(&format!(
        "service '{}': {} secret(s)",
        store.namespace(),
        keys.len()
    ));

    output::print_keys_table(&keys);

    Ok(())
}

/// Render keys as a pretty-printed JSON array, sorted.
pub fn render_json(keys: &BTreeSet<String>) -> Result<String> {
    serde_json::to_string_pretty(keys)
        .map_err(|e| StoreError::CommandFailed(format!("JSON output: {e}")))
}
