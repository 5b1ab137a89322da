//! Username/password pair.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A username/password pair, either typed by the user or returned by the
/// credential endpoint.
///
/// The password is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use mockdesk_core::Credentials;
///
/// let creds = Credentials::new("emilys", "emilyspass");
/// assert_eq!(creds.username(), "emilys");
/// assert!(!format!("{:?}", creds).contains("emilyspass"));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// Only for building requests; never log it.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Exact, case-sensitive match of both parts.
    pub fn matches(&self, other: &Credentials) -> bool {
        self.username == other.username && self.password == other.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
