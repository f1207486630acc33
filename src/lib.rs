pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod store;
pub mod vault;

pub use errors::{Result, StoreError};
pub use store::{Namespace, SecureStore};
pub use vault::{MemoryVault, Vault, VaultStatus};
