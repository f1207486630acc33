//! Key-addressed secret storage on top of a platform vault.
//!
//! `SecureStore` is the only thing callers talk to. It builds vault
//! descriptors scoped to one `Namespace`, runs set / get / list / remove
//! against a `Vault`, and translates vault statuses into `StoreError`.
//! Nothing is cached: the vault is the single source of truth.

pub mod namespace;

use std::collections::BTreeSet;

use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::errors::{Result, StoreError};
use crate::vault::{ItemClass, MatchLimit, QueryDescriptor, Vault, VaultStatus};

pub use namespace::{Namespace, FALLBACK_SERVICE};

/// The store handle. Create one with `SecureStore::new`, then call its
/// methods; it holds no state besides the namespace and the vault.
pub struct SecureStore<V> {
    namespace: Namespace,
    vault: V,
}

impl<V: Vault> SecureStore<V> {
    pub fn new(namespace: Namespace, vault: V) -> Self {
        Self { namespace, vault }
    }

    /// Returns the namespace every query is scoped to.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Returns the underlying vault.
    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Build a descriptor for `key`: generic-password class, this
    /// namespace, account = key bytes.
    pub fn build_query(&self, key: &str) -> Result<QueryDescriptor> {
        if key.is_empty() {
            return Err(StoreError::InvalidData("key cannot be empty".into()));
        }

        Ok(
            QueryDescriptor::new(ItemClass::GenericPassword, self.namespace.as_str())
                .with_account(key.as_bytes()),
        )
    }

    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// The vault only supports strict insert, so this removes the old entry
    /// and then inserts the new one. If the insert fails the key is left
    /// unset: the previous value is already gone.
    pub fn set(&self, value: &str, key: &str) -> Result<()> {
        if value.is_empty() || key.is_empty() {
            return Err(StoreError::InvalidData(
                "key and value must both be non-empty".into(),
            ));
        }

        // Step 1: clear any stale entry. Nothing to delete is fine.
        self.remove(key)?;

        // Step 2: strict insert of the new payload.
        let query = self.build_query(key)?.with_value(value.as_bytes());
        self.vault.insert(&query).map_err(|status| {
            warn!(service = %self.namespace, key, %status, "insert failed after removing old entry");
            StoreError::VaultFailure(status)
        })?;

        debug!(service = %self.namespace, key, "entry stored");
        Ok(())
    }

    /// Retrieve the value stored under `key`.
    ///
    /// A missing key is reported as `VaultFailure(ITEM_NOT_FOUND)`, like any
    /// other vault failure; see `StoreError::is_not_found`.
    pub fn get(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(StoreError::InvalidData("key cannot be empty".into()));
        }

        let query = self
            .build_query(key)?
            .returning_data()
            .limit(MatchLimit::One);

        let items = self.vault.query(&query).map_err(StoreError::VaultFailure)?;

        let data = items
            .into_iter()
            .next()
            .and_then(|item| item.data)
            .ok_or(StoreError::Unretrievable)?;

        // Convert via from_utf8 on a copy so the Zeroizing buffer is wiped on
        // drop; zeroize the bytes inside the error on failure.
        String::from_utf8(data.to_vec()).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            StoreError::Unretrievable
        })
    }

    /// List every key stored in this namespace.
    ///
    /// Entries whose account cannot be decoded as UTF-8 are skipped rather
    /// than failing the whole enumeration.
    pub fn list(&self) -> Result<BTreeSet<String>> {
        let query = QueryDescriptor::new(ItemClass::GenericPassword, self.namespace.as_str())
            .returning_attributes()
            .limit(MatchLimit::All);

        let items = match self.vault.query(&query) {
            Ok(items) => items,
            Err(VaultStatus::ITEM_NOT_FOUND) => return Ok(BTreeSet::new()),
            Err(status) => return Err(StoreError::VaultFailure(status)),
        };

        let mut keys = BTreeSet::new();
        for account in items.into_iter().filter_map(|item| item.account) {
            match String::from_utf8(account) {
                Ok(key) => {
                    keys.insert(key);
                }
                Err(_) => debug!(service = %self.namespace, "skipping entry with non-UTF-8 account"),
            }
        }

        Ok(keys)
    }

    /// Remove the entry stored under `key`.
    ///
    /// The delete status is not checked: removing a key that does not exist
    /// succeeds.
    pub fn remove(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidData("key cannot be empty".into()));
        }

        let query = self.build_query(key)?;
        if let Err(status) = self.vault.delete(&query) {
            debug!(service = %self.namespace, key, %status, "delete reported non-success; ignored");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::MemoryVault;

    fn store() -> SecureStore<MemoryVault> {
        SecureStore::new(Namespace::new("test.service").unwrap(), MemoryVault::new())
    }

    #[test]
    fn build_query_scopes_to_namespace_and_key() {
        let store = store();
        let q = store.build_query("token").unwrap();
        assert_eq!(q.class, ItemClass::GenericPassword);
        assert_eq!(q.service, "test.service");
        assert_eq!(q.account.as_deref(), Some(&b"token"[..]));
        assert!(q.value.is_none());
        assert!(!q.return_data);
        assert!(!q.return_attributes);
    }

    #[test]
    fn build_query_rejects_empty_key() {
        assert!(matches!(
            store().build_query(""),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn set_leaves_a_single_record() {
        let store = store();
        store.set("v1", "k").unwrap();
        store.set("v2", "k").unwrap();
        assert_eq!(store.vault().len(), 1);
        assert_eq!(store.get("k").unwrap(), "v2");
    }

    #[test]
    fn get_on_empty_namespace_is_not_found() {
        let err = store().get("missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn list_on_empty_namespace_is_empty() {
        assert!(store().list().unwrap().is_empty());
    }

    #[test]
    fn unicode_keys_and_values_roundtrip() {
        let store = store();
        store.set("пароль 🔑", "clé").unwrap();
        assert_eq!(store.get("clé").unwrap(), "пароль 🔑");
        assert!(store.list().unwrap().contains("clé"));
    }
}
