//! Vault module: the seam between the store and the platform credential vault.
//!
//! This module provides:
//! - The `Vault` trait with the three primitives every backend implements
//! - `QueryDescriptor` and `VaultItem` request/response types (`query`)
//! - `VaultStatus` status codes (`status`)
//! - `MemoryVault`, an in-process backend (`memory`)
//! - `KeyringVault`, the OS keyring backend (`keyring`, feature `keyring-store`)

pub mod memory;
pub mod query;
pub mod status;

#[cfg(feature = "keyring-store")]
pub mod keyring;

use std::sync::Arc;

/// Services with this suffix hold backend bookkeeping, not user entries.
pub const RESERVED_SERVICE_SUFFIX: &str = ".index";

// Re-export the most commonly used items.
pub use memory::MemoryVault;
pub use query::{ItemClass, MatchLimit, QueryDescriptor, VaultItem};
pub use status::VaultStatus;

#[cfg(feature = "keyring-store")]
pub use self::keyring::KeyringVault;

/// A secure key-value vault addressed by class + service + account.
///
/// Implementations own persistence and encryption; callers only build
/// descriptors and interpret statuses.
pub trait Vault: Send + Sync {
    /// Insert one record. Fails with `DUPLICATE_ITEM` if a record with the
    /// same class, service and account already exists.
    fn insert(&self, query: &QueryDescriptor) -> Result<(), VaultStatus>;

    /// Look up matching records, shaped by the descriptor's return flags and
    /// match limit. Zero matches is `ITEM_NOT_FOUND`.
    fn query(&self, query: &QueryDescriptor) -> Result<Vec<VaultItem>, VaultStatus>;

    /// Delete every matching record. Zero matches is `ITEM_NOT_FOUND`.
    fn delete(&self, query: &QueryDescriptor) -> Result<(), VaultStatus>;
}

impl<V: Vault + ?Sized> Vault for &V {
    fn insert(&self, query: &QueryDescriptor) -> Result<(), VaultStatus> {
        (**self).insert(query)
    }

    fn query(&self, query: &QueryDescriptor) -> Result<Vec<VaultItem>, VaultStatus> {
        (**self).query(query)
    }

    fn delete(&self, query: &QueryDescriptor) -> Result<(), VaultStatus> {
        (**self).delete(query)
    }
}

impl<V: Vault + ?Sized> Vault for Box<V> {
    fn insert(&self, query: &QueryDescriptor) -> Result<(), VaultStatus> {
        (**self).insert(query)
    }

    fn query(&self, query: &QueryDescriptor) -> Result<Vec<VaultItem>, VaultStatus> {
        (**self).query(query)
    }

    fn delete(&self, query: &QueryDescriptor) -> Result<(), VaultStatus> {
        (**self).delete(query)
    }
}

impl<V: Vault + ?Sized> Vault for Arc<V> {
    fn insert(&self, query: &QueryDescriptor) -> Result<(), VaultStatus> {
        (**self).insert(query)
    }

    fn query(&self, query: &QueryDescriptor) -> Result<Vec<VaultItem>, VaultStatus> {
        (**self).query(query)
    }

    fn delete(&self, query: &QueryDescriptor) -> Result<(), VaultStatus> {
        (**self).delete(query)
    }
}
