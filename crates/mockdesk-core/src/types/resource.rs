//! Collection resource name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated REST collection name, used as a single URL path segment.
///
/// # Example
///
/// ```
/// use mockdesk_core::Resource;
///
/// let users = Resource::new("users").unwrap();
/// assert_eq!(users.as_str(), "users");
/// assert!(Resource::new("users/1").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resource(String);

impl Resource {
    /// Create a resource name, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error unless the name is 1-64 characters of lowercase
    /// ASCII letters, digits, `-` or `_`, starting with a letter.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// The posts collection.
    pub fn posts() -> Self {
        Self("posts".to_string())
    }

    /// The users collection.
    pub fn users() -> Self {
        Self("users".to_string())
    }

    /// Returns the resource name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::Resource {
                value: s.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if s.is_empty() {
            return Err(invalid("cannot be empty"));
        }
        if s.len() > 64 {
            return Err(invalid("must be at most 64 characters"));
        }
        if !s.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(invalid("must start with a lowercase letter"));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(invalid(
                "may only contain lowercase letters, digits, '-' and '_'",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Resource {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Resource> for String {
    fn from(resource: Resource) -> Self {
        resource.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resources_are_valid() {
        assert!(Resource::new(Resource::posts().as_str()).is_ok());
        assert!(Resource::new(Resource::users().as_str()).is_ok());
    }

    #[test]
    fn rejects_path_characters() {
        assert!(Resource::new("").is_err());
        assert!(Resource::new("Users").is_err());
        assert!(Resource::new("users/1").is_err());
        assert!(Resource::new("1users").is_err());
        assert!(Resource::new("../etc").is_err());
    }
}
