//! Credential endpoint trait.

use async_trait::async_trait;

use crate::{Credentials, Result};

/// The demo endpoint that hands out known username/password pairs.
///
/// The pass/fail decision is made locally by the caller.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Fetch up to `limit` known credential pairs.
    async fn credentials(&self, limit: Option<u32>) -> Result<Vec<Credentials>>;

    /// Register a new account.
    async fn register(&self, credentials: &Credentials) -> Result<()>;
}
