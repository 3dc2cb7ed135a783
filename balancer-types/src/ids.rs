//! Identifier type shared by every entity kind.
//!
//! Identifiers are assigned by the caller and are unique only within their
//! entity kind. They map directly onto the `INTEGER PRIMARY KEY` column of
//! each table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Unique identifier of an entity within its kind.
///
/// Any `i64` can be held, but only positive values are accepted by the
/// writer; see [`EntityId::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Creates an identifier from a raw integer.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Whether this identifier may be persisted.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }

    /// Parses an identifier from a decimal string, trimming whitespace.
    pub fn parse(s: &str) -> Result<Self, Error> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| Error::InvalidId(format!("{s:?}: {e}")))
    }
}

impl From<i64> for EntityId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<i32> for EntityId {
    fn from(raw: i32) -> Self {
        Self(i64::from(raw))
    }
}

impl From<u32> for EntityId {
    fn from(raw: u32) -> Self {
        Self(i64::from(raw))
    }
}

impl From<EntityId> for i64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
