//! Item identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Longest identifier accepted from storage or a scanned code.
pub const MAX_ID_LEN: usize = 128;

/// Opaque identifier of an inventory item.
///
/// Stored ids are arbitrary strings (older data sets use `"1"`, `"2"`, …; new
/// items get a UUIDv7). The only shape requirement is that the id is
/// non-empty, free of surrounding whitespace and control characters, at most
/// [`MAX_ID_LEN`] bytes long, and does not start with `{`. An id is printed
/// verbatim into scan codes, where a leading `{` marks a JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Create a fresh identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Validate and wrap an identifier.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::invalid_id("ItemId: empty"));
        }
        if raw.len() > MAX_ID_LEN {
            return Err(DomainError::invalid_id(format!(
                "ItemId: longer than {MAX_ID_LEN} bytes"
            )));
        }
        if raw.trim() != raw {
            return Err(DomainError::invalid_id("ItemId: surrounding whitespace"));
        }
        if raw.chars().any(char::is_control) {
            return Err(DomainError::invalid_id("ItemId: control character"));
        }
        if raw.starts_with('{') {
            return Err(DomainError::invalid_id("ItemId: leading '{'"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ItemId> for String {
    fn from(value: ItemId) -> Self {
        value.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
