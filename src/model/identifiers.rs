//! Identifier newtypes with smart constructors.

use std::fmt;
use thiserror::Error;

/// Error returned when constructing an [`ItemId`] from an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Item id must not be empty")]
pub struct InvalidItemId;

/// Opaque identifier for a calendar item, unique within the working set.
///
/// Wraps a non-empty string. Use [`ItemId::new`] to construct; the raw
/// constructor is never exported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Create a validated item id.
    ///
    /// Returns `Err(InvalidItemId)` for an empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidItemId> {
        let id = id.into();
        if id.is_empty() {
            Err(InvalidItemId)
        } else {
            Ok(Self(id))
        }
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
