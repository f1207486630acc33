//! In-process vault backed by a map.
//!
//! Records live only as long as the `MemoryVault` value. Used by tests and
//! by the CLI's `--backend memory` scratch mode; it offers none of the
//! at-rest protection of a platform vault.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::trace;
use zeroize::Zeroizing;

use super::query::{ItemClass, MatchLimit, QueryDescriptor, VaultItem};
use super::status::VaultStatus;
use super::Vault;

/// Record identity: class + service + account.
type RecordKey = (ItemClass, String, Vec<u8>);

/// An in-memory `Vault`.
#[derive(Default)]
pub struct MemoryVault {
    records: Mutex<BTreeMap<RecordKey, Zeroizing<Vec<u8>>>>,
    calls: AtomicUsize,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of primitive calls (insert, query, delete) made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of records currently stored across all services.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<RecordKey, Zeroizing<Vec<u8>>>>, VaultStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .map_err(|_| VaultStatus::INTERNAL_COMPONENT)
    }
}

impl Vault for MemoryVault {
    fn insert(&self, query: &QueryDescriptor) -> Result<(), VaultStatus> {
        let mut records = self.lock()?;

        let (Some(account), Some(value)) = (&query.account, &query.value) else {
            return Err(VaultStatus::PARAM);
        };

        let key = (query.class, query.service.clone(), account.clone());
        if records.contains_key(&key) {
            return Err(VaultStatus::DUPLICATE_ITEM);
        }

        trace!(service = %query.service, "memory vault insert");
        records.insert(key, value.clone());
        Ok(())
    }

    fn query(&self, query: &QueryDescriptor) -> Result<Vec<VaultItem>, VaultStatus> {
        let records = self.lock()?;

        let limit = match query.match_limit {
            MatchLimit::One => 1,
            MatchLimit::All => usize::MAX,
        };

        let items: Vec<VaultItem> = records
            .iter()
            .filter(|((class, service, account), _)| query.matches(*class, service, account))
            .take(limit)
            .map(|((_, _, account), data)| VaultItem {
                account: query.return_attributes.then(|| account.clone()),
                data: query.return_data.then(|| data.clone()),
            })
            .collect();

        if items.is_empty() {
            return Err(VaultStatus::ITEM_NOT_FOUND);
        }
        Ok(items)
    }

    fn delete(&self, query: &QueryDescriptor) -> Result<(), VaultStatus> {
        let mut records = self.lock()?;

        let before = records.len();
        records.retain(|(class, service, account), _| !query.matches(*class, service, account));

        if records.len() == before {
            return Err(VaultStatus::ITEM_NOT_FOUND);
        }
        trace!(service = %query.service, removed = before - records.len(), "memory vault delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(service: &str) -> QueryDescriptor {
        QueryDescriptor::new(ItemClass::GenericPassword, service)
    }

    #[test]
    fn insert_requires_account_and_value() {
        let vault = MemoryVault::new();
        assert_eq!(
            vault.insert(&descriptor("svc").with_value("v")),
            Err(VaultStatus::PARAM)
        );
        assert_eq!(
            vault.insert(&descriptor("svc").with_account("k")),
            Err(VaultStatus::PARAM)
        );
        assert!(vault.is_empty());
    }

    #[test]
    fn insert_is_strict() {
        let vault = MemoryVault::new();
        let q = descriptor("svc").with_account("k").with_value("v1");
        vault.insert(&q).unwrap();

        let again = descriptor("svc").with_account("k").with_value("v2");
        assert_eq!(vault.insert(&again), Err(VaultStatus::DUPLICATE_ITEM));
        assert_eq!(vault.len(), 1);
    }

    #[test]
    fn query_respects_match_limit_and_return_flags() {
        let vault = MemoryVault::new();
        for key in ["a", "b", "c"] {
            vault
                .insert(&descriptor("svc").with_account(key).with_value("v"))
                .unwrap();
        }

        let one = vault.query(&descriptor("svc").returning_data()).unwrap();
        assert_eq!(one.len(), 1);
        assert!(one[0].account.is_none());
        assert_eq!(one[0].data.as_deref().map(Vec::as_slice), Some(&b"v"[..]));

        let all = vault
            .query(
                &descriptor("svc")
                    .returning_attributes()
                    .limit(MatchLimit::All),
            )
            .unwrap();
        let accounts: Vec<_> = all.iter().filter_map(|i| i.account.clone()).collect();
        assert_eq!(accounts, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
        assert!(all.iter().all(|i| i.data.is_none()));
    }

    #[test]
    fn query_with_no_match_is_not_found() {
        let vault = MemoryVault::new();
        vault
            .insert(&descriptor("svc").with_account("k").with_value("v"))
            .unwrap();
        assert_eq!(
            vault.query(&descriptor("other").limit(MatchLimit::All)),
            Err(VaultStatus::ITEM_NOT_FOUND)
        );
    }

    #[test]
    fn delete_reports_missing_records() {
        let vault = MemoryVault::new();
        let q = descriptor("svc").with_account("k");
        assert_eq!(vault.delete(&q), Err(VaultStatus::ITEM_NOT_FOUND));

        vault.insert(&q.clone().with_value("v")).unwrap();
        assert_eq!(vault.delete(&q), Ok(()));
        assert!(vault.is_empty());
    }

    #[test]
    fn every_primitive_counts_as_a_call() {
        let vault = MemoryVault::new();
        assert_eq!(vault.calls(), 0);
        let _ = vault.insert(&descriptor("svc").with_account("k").with_value("v"));
        let _ = vault.query(&descriptor("svc"));
        let _ = vault.delete(&descriptor("svc"));
        assert_eq!(vault.calls(), 3);
    }
}
