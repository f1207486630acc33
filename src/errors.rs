use thiserror::Error;

use crate::vault::VaultStatus;

/// All errors that can occur in KeySafe.
#[derive(Debug, Error)]
pub enum StoreError {
    // --- Store errors ---
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Vault failure: {0}")]
    VaultFailure(VaultStatus),

    #[error("Stored entry could not be decoded as UTF-8 text")]
    Unretrievable,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl StoreError {
    /// Returns `true` when the vault reported that no matching item exists.
    ///
    /// `get` folds "not found" into `VaultFailure`; this lets callers that
    /// care tell it apart without matching on status codes.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::VaultFailure(status) if *status == VaultStatus::ITEM_NOT_FOUND)
    }
}

/// Convenience type alias for KeySafe results.
pub type Result<T> = std::result::Result<T, StoreError>;
