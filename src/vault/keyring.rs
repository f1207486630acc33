//! OS keyring backend.
//!
//! Stores each record in the operating system's secure credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KWallet), with kernel keyutils
//!   as a session cache in front of it
//!
//! The keyring API addresses one credential at a time and cannot enumerate,
//! so the accounts stored under each service are tracked in a separate
//! index credential (service `<service>.index`, user `accounts`) holding a
//! JSON array. Services ending in `.index` are reserved for these indexes
//! and refused by every primitive. Key-only enumeration trusts the index;
//! payload lookups skip accounts whose credential has disappeared.

use std::collections::BTreeSet;
use std::sync::Mutex;

use keyring::Entry;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::query::{MatchLimit, QueryDescriptor, VaultItem};
use super::status::VaultStatus;
use super::{Vault, RESERVED_SERVICE_SUFFIX};

/// User name of the per-service index credential.
const INDEX_USER: &str = "accounts";

/// A `Vault` backed by the `keyring` crate.
#[derive(Default)]
pub struct KeyringVault {
    /// Serializes index read-modify-write cycles within this process.
    index_lock: Mutex<()>,
}

impl KeyringVault {
    pub fn new() -> Self {
        Self::default()
    }

    fn index_service(service: &str) -> String {
        format!("{service}{RESERVED_SERVICE_SUFFIX}")
    }

    fn read_index(service: &str) -> Result<BTreeSet<String>, VaultStatus> {
        let entry = entry_for(&Self::index_service(service), INDEX_USER)?;

        match entry.get_password() {
            Ok(json) => serde_json::from_str(&json).map_err(|e| {
                warn!(service, "keyring index is corrupt: {e}");
                VaultStatus::DECODE
            }),
            Err(keyring::Error::NoEntry) => Ok(BTreeSet::new()),
            Err(e) => Err(status_from(&e)),
        }
    }

    fn write_index(service: &str, accounts: &BTreeSet<String>) -> Result<(), VaultStatus> {
        let entry = entry_for(&Self::index_service(service), INDEX_USER)?;

        if accounts.is_empty() {
            return match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(status_from(&e)),
            };
        }

        let json = serde_json::to_string(accounts).map_err(|_| VaultStatus::INTERNAL_COMPONENT)?;
        entry.set_password(&json).map_err(|e| status_from(&e))
    }

    /// Apply `change` to the service's index, logging instead of failing:
    /// the credential itself has already been written or removed.
    fn update_index(&self, service: &str, change: impl FnOnce(&mut BTreeSet<String>)) {
        let Ok(_guard) = self.index_lock.lock() else {
            warn!(service, "keyring index lock poisoned; index not updated");
            return;
        };

        let result = Self::read_index(service).and_then(|mut accounts| {
            change(&mut accounts);
            Self::write_index(service, &accounts)
        });

        if let Err(status) = result {
            warn!(service, %status, "failed to update keyring index");
        }
    }
}

/// Keyring users are strings, so the account bytes must be UTF-8.
fn account_name(query: &QueryDescriptor) -> Result<Option<&str>, VaultStatus> {
    query
        .account
        .as_deref()
        .map(|bytes| std::str::from_utf8(bytes).map_err(|_| VaultStatus::PARAM))
        .transpose()
}

/// Index credentials live under `<service>.index`; user data may not.
fn check_service(service: &str) -> Result<(), VaultStatus> {
    if service.ends_with(RESERVED_SERVICE_SUFFIX) {
        return Err(VaultStatus::PARAM);
    }
    Ok(())
}

/// Shape lookup results for `accounts`.
///
/// `fetch` reads one account's payload (`None` when it has vanished). It is
/// only called when the query asks for data or names a single account, so a
/// key-only enumeration never pulls secrets out of the keyring.
fn collect_items(
    accounts: Vec<String>,
    query: &QueryDescriptor,
    mut fetch: impl FnMut(&str) -> Result<Option<Zeroizing<Vec<u8>>>, VaultStatus>,
) -> Result<Vec<VaultItem>, VaultStatus> {
    let limit = match query.match_limit {
        MatchLimit::One => 1,
        MatchLimit::All => usize::MAX,
    };
    let must_fetch = query.return_data || query.account.is_some();

    let mut items = Vec::new();
    for account in accounts {
        if items.len() == limit {
            break;
        }

        let data = if must_fetch {
            match fetch(&account)? {
                Some(secret) => Some(secret),
                None => continue,
            }
        } else {
            None
        };

        items.push(VaultItem {
            account: query.return_attributes.then(|| account.into_bytes()),
            data: if query.return_data { data } else { None },
        });
    }

    if items.is_empty() {
        return Err(VaultStatus::ITEM_NOT_FOUND);
    }
    Ok(items)
}

fn entry_for(service: &str, account: &str) -> Result<Entry, VaultStatus> {
    Entry::new(service, account).map_err(|e| status_from(&e))
}

/// Translate a keyring error into the closest vault status.
fn status_from(err: &keyring::Error) -> VaultStatus {
    match err {
        keyring::Error::NoEntry => VaultStatus::ITEM_NOT_FOUND,
        keyring::Error::NoStorageAccess(_) => VaultStatus::NOT_AVAILABLE,
        keyring::Error::BadEncoding(_) => VaultStatus::DECODE,
        keyring::Error::TooLong(..) | keyring::Error::Invalid(..) => VaultStatus::PARAM,
        keyring::Error::Ambiguous(_) => VaultStatus::DUPLICATE_ITEM,
        other => {
            debug!("keyring platform failure: {other}");
            VaultStatus::IO
        }
    }
}

impl Vault for KeyringVault {
    fn insert(&self, query: &QueryDescriptor) -> Result<(), VaultStatus> {
        check_service(&query.service)?;
        let (Some(account), Some(value)) = (account_name(query)?, &query.value) else {
            return Err(VaultStatus::PARAM);
        };

        let entry = entry_for(&query.service, account)?;
        match entry.get_secret() {
            Ok(_) => return Err(VaultStatus::DUPLICATE_ITEM),
            Err(keyring::Error::NoEntry) => {}
            Err(e) => return Err(status_from(&e)),
        }

        entry.set_secret(value).map_err(|e| status_from(&e))?;
        debug!(service = %query.service, account, "keyring credential stored");

        self.update_index(&query.service, |accounts| {
            accounts.insert(account.to_string());
        });
        Ok(())
    }

    fn query(&self, query: &QueryDescriptor) -> Result<Vec<VaultItem>, VaultStatus> {
        check_service(&query.service)?;
        let accounts: Vec<String> = match account_name(query)? {
            Some(account) => vec![account.to_string()],
            None => Self::read_index(&query.service)?.into_iter().collect(),
        };

        collect_items(accounts, query, |account| {
            match entry_for(&query.service, account)?.get_secret() {
                Ok(secret) => Ok(Some(Zeroizing::new(secret))),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(status_from(&e)),
            }
        })
    }

    fn delete(&self, query: &QueryDescriptor) -> Result<(), VaultStatus> {
        check_service(&query.service)?;
        let accounts: Vec<String> = match account_name(query)? {
            Some(account) => vec![account.to_string()],
            None => Self::read_index(&query.service)?.into_iter().collect(),
        };

        let mut removed = Vec::new();
        for account in accounts {
            match entry_for(&query.service, &account)?.delete_credential() {
                Ok(()) => removed.push(account),
                Err(keyring::Error::NoEntry) => {}
                Err(e) => return Err(status_from(&e)),
            }
        }

        if removed.is_empty() {
            return Err(VaultStatus::ITEM_NOT_FOUND);
        }

        debug!(service = %query.service, count = removed.len(), "keyring credentials deleted");
        self.update_index(&query.service, |index| {
            for account in &removed {
                index.remove(account);
            }
        });
        Ok(())
    }
}
