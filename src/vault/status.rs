//! Vault status codes.
//!
//! Every vault primitive reports its outcome as a numeric status, modelled
//! on the Security framework's `OSStatus`.  Backends that are not Apple
//! Keychain translate their native errors into the closest code here so
//! the store layer only ever deals with one vocabulary.

use std::fmt;

/// A status code returned by a vault primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VaultStatus(pub i32);

impl VaultStatus {
    pub const SUCCESS: Self = Self(0);
    pub const UNIMPLEMENTED: Self = Self(-4);
    pub const IO: Self = Self(-36);
    pub const PARAM: Self = Self(-50);
    pub const INTERNAL_COMPONENT: Self = Self(-2070);
    pub const NOT_AVAILABLE: Self = Self(-25291);
    pub const AUTH_FAILED: Self = Self(-25293);
    pub const DUPLICATE_ITEM: Self = Self(-25299);
    pub const ITEM_NOT_FOUND: Self = Self(-25300);
    pub const INTERACTION_NOT_ALLOWED: Self = Self(-25308);
    pub const DECODE: Self = Self(-26275);

    /// Raw numeric code.
    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Short human-readable description of a known code.
    pub fn message(self) -> &'static str {
        match self {
            Self::SUCCESS => "no error",
            Self::UNIMPLEMENTED => "function or operation not implemented",
            Self::IO => "I/O error",
            Self::PARAM => "one or more parameters passed to the vault were not valid",
            Self::INTERNAL_COMPONENT => "an internal vault component failed",
            Self::NOT_AVAILABLE => "no secure storage is available",
            Self::AUTH_FAILED => "the user name or passphrase was not correct",
            Self::DUPLICATE_ITEM => "the item already exists",
            Self::ITEM_NOT_FOUND => "the item could not be found",
            Self::INTERACTION_NOT_ALLOWED => "user interaction is not allowed",
            Self::DECODE => "unable to decode the provided data",
            _ => "unknown vault status",
        }
    }
}

impl fmt::Display for VaultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.message(), self.0)
    }
}
