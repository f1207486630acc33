//! Query descriptors and result items exchanged with a vault.
//!
//! A `QueryDescriptor` is the structured request sent to every vault
//! primitive: the record class, the service namespace, and optionally the
//! account, the payload to store, and flags shaping what a lookup returns.

use std::fmt;

use zeroize::Zeroizing;

/// Class tag of a vault record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemClass {
    /// A generic secret (password, token) with no protocol semantics.
    GenericPassword,
}

/// How many matching records a lookup may return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchLimit {
    #[default]
    One,
    All,
}

/// A request addressed to a vault primitive.
#[derive(Clone)]
pub struct QueryDescriptor {
    pub class: ItemClass,
    pub service: String,
    /// Account attribute (the entry key as bytes). `None` matches every
    /// account in the service.
    pub account: Option<Vec<u8>>,
    /// Payload to store; only meaningful for `insert`.
    pub value: Option<Zeroizing<Vec<u8>>>,
    /// Ask a lookup to return each match's payload.
    pub return_data: bool,
    /// Ask a lookup to return each match's attributes.
    pub return_attributes: bool,
    pub match_limit: MatchLimit,
}

impl QueryDescriptor {
    /// A descriptor scoped to a class and service, matching every account.
    pub fn new(class: ItemClass, service: impl Into<String>) -> Self {
        Self {
            class,
            service: service.into(),
            account: None,
            value: None,
            return_data: false,
            return_attributes: false,
            match_limit: MatchLimit::default(),
        }
    }

    pub fn with_account(mut self, account: impl Into<Vec<u8>>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.value = Some(Zeroizing::new(value.into()));
        self
    }

    pub fn returning_data(mut self) -> Self {
        self.return_data = true;
        self
    }

    pub fn returning_attributes(mut self) -> Self {
        self.return_attributes = true;
        self
    }

    pub fn limit(mut self, limit: MatchLimit) -> Self {
        self.match_limit = limit;
        self
    }

    /// Returns `true` if a record stored under `class`/`service`/`account`
    /// is selected by this descriptor.
    pub fn matches(&self, class: ItemClass, service: &str, account: &[u8]) -> bool {
        self.class == class
            && self.service == service
            && self.account.as_deref().map_or(true, |a| a == account)
    }
}

// Hand-written so the payload never ends up in logs or panic messages.
impl fmt::Debug for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryDescriptor")
            .field("class", &self.class)
            .field("service", &self.service)
            .field(
                "account",
                &self.account.as_deref().map(String::from_utf8_lossy),
            )
            .field("value", &self.value.as_ref().map(|_| "<redacted>"))
            .field("return_data", &self.return_data)
            .field("return_attributes", &self.return_attributes)
            .field("match_limit", &self.match_limit)
            .finish()
    }
}

/// One record returned by a lookup, shaped by the descriptor's flags.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct VaultItem {
    /// Present when attributes were requested.
    pub account: Option<Vec<u8>>,
    /// Present when data was requested.
    pub data: Option<Zeroizing<Vec<u8>>>,
}

impl fmt::Debug for VaultItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultItem")
            .field(
                "account",
                &self.account.as_deref().map(String::from_utf8_lossy),
            )
            .field("data", &self.data.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
