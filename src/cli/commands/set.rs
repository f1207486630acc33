//! `keysafe set`: add or replace a secret.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_store, prompt_secret, Cli};
use crate::config::Settings;
use crate::errors::{Result, StoreError};
use crate::store::SecureStore;
use crate::vault::Vault;

/// Execute the `set` command.
pub fn execute(cli: &Cli, settings: &Settings, key: &str, value: Option<&str>) -> Result<()> {
    let store = open_store(cli, settings)?;

    // Reject an empty key before asking for a value.
    store.build_query(key)?;

    // Determine the secret value from one of three sources.
    let secret_value = Zeroizing::new(if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line; it may appear in shell history.");
        v.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 3: Interactive secure prompt (default).
        prompt_secret(&format!("Enter value for {key}"))?
    });

    let replaced = store_value(&store, key, &secret_value)?;

    let verb = if replaced { "replaced in" } else { "added to" };
    output::success(&format!(
        "Secret '{key}' {verb} service '{}'",
        store.namespace()
    ));

    Ok(())
}

/// Store `value` under `key`, returning `true` when an earlier value was
/// replaced. Vault failures while checking for the earlier value propagate.
pub fn store_value<V: Vault>(store: &SecureStore<V>, key: &str, value: &str) -> Result<bool> {
    store.build_query(key)?;

    let replaced = match store.get(key) {
        Ok(previous) => {
            drop(Zeroizing::new(previous));
            true
        }
        // An undecodable entry still exists and is about to be replaced.
        Err(StoreError::Unretrievable) => true,
        Err(e) if e.is_not_found() => false,
        Err(e) => return Err(e),
    };

    store.set(value, key)?;
    Ok(replaced)
}
