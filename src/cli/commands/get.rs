//! `keysafe get`: retrieve and print a single secret's value.

use crate::cli::{open_store, Cli};
use crate::config::Settings;
use crate::errors::{Result, StoreError};
use crate::store::SecureStore;
use crate::vault::Vault;

/// Execute the `get` command.
pub fn execute(cli: &Cli, settings: &Settings, key: &str) -> Result<()> {
    let store = open_store(cli, settings)?;

    // Print the raw value to stdout so it can be piped.
    let value = lookup(&store, key)?;
    println!("{value}");
    Ok(())
}

/// Fetch `key`, turning a missing entry into a message naming the service.
pub fn lookup<V: Vault>(store: &SecureStore<V>, key: &str) -> Result<String> {
    match store.get(key) {
        Ok(value) => Ok(value),
        Err(e) if e.is_not_found() => Err(StoreError::CommandFailed(format!(
            "no secret stored under '{key}' in service '{}'",
            store.namespace()
        ))),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Namespace;
    use crate::vault::MemoryVault;

    fn store() -> SecureStore<MemoryVault> {
        SecureStore::new(Namespace::new("get-test").unwrap(), MemoryVault::new())
    }

    #[test]
    fn returns_the_stored_value() {
        let store = store();
        store.set("s3cr3t", "DB_PASSWORD").unwrap();
        assert_eq!(lookup(&store, "DB_PASSWORD").unwrap(), "s3cr3t");
    }

    #[test]
    fn missing_key_names_the_service() {
        let err = lookup(&store(), "NOPE").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'NOPE'"));
        assert!(msg.contains("'get-test'"));
    }
}
