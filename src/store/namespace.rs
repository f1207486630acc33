//! Service namespace that scopes every entry a store touches.

use std::fmt;

use crate::errors::{Result, StoreError};
use crate::vault::RESERVED_SERVICE_SUFFIX;

/// Service name used when the host identity cannot be determined.
pub const FALLBACK_SERVICE: &str = "com.keysafe.store";

/// The service string under which all entries of one store live.
///
/// Resolved once at startup and injected into `SecureStore::new`; two
/// stores with different namespaces never see each other's entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace from an explicit name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::InvalidData(
                "service namespace cannot be empty".into(),
            ));
        }
        if name.ends_with(RESERVED_SERVICE_SUFFIX) {
            return Err(StoreError::InvalidData(format!(
                "service namespace cannot end with '{RESERVED_SERVICE_SUFFIX}'"
            )));
        }
        Ok(Self(name))
    }

    /// Derive the namespace from the hosting application's identity.
    ///
    /// Uses the running executable's file stem (e.g. `keysafe`), or
    /// `FALLBACK_SERVICE` when that is unavailable.
    pub fn from_host() -> Self {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .and_then(|stem| Self::new(stem).ok())
            .unwrap_or_else(Self::fallback)
    }

    pub fn fallback() -> Self {
        Self(FALLBACK_SERVICE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
