//! Record identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Identifier assigned to a record by its collection.
///
/// Identifiers are positive integers. A record without one has not been
/// persisted yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RecordId(u64);

impl RecordId {
    /// Create a record identifier.
    ///
    /// # Errors
    ///
    /// Returns an error for zero.
    pub fn new(value: u64) -> Result<Self, Error> {
        if value == 0 {
            return Err(InvalidInputError::RecordId {
                value: value.to_string(),
                reason: "must be a positive integer".to_string(),
            }
            .into());
        }
        Ok(Self(value))
    }

    /// The first identifier handed out in an empty collection.
    pub const FIRST: RecordId = RecordId(1);

    /// Returns the numeric value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The identifier immediately after this one.
    ///
    /// # Errors
    ///
    /// Returns an error when this is already the largest identifier.
    pub fn next(self) -> Result<RecordId, Error> {
        match self.0.checked_add(1) {
            Some(value) => Ok(RecordId(value)),
            None => Err(InvalidInputError::RecordId {
                value: self.0.to_string(),
                reason: "no identifier follows it".to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<u64>().map_err(|e| InvalidInputError::RecordId {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        Self::new(value)
    }
}

impl TryFrom<u64> for RecordId {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for u64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}
