//! Credential endpoint backend.

use async_trait::async_trait;
use tracing::{debug, instrument};

use mockdesk_core::traits::CredentialSource;
use mockdesk_core::{BaseUrl, Credentials, Result};

use crate::client::RestClient;
use crate::endpoints::*;

/// The demo auth API: lists known pairs and accepts registrations.
#[derive(Debug, Clone)]
pub struct HttpCredentialSource {
    client: RestClient,
}

impl HttpCredentialSource {
    pub fn new(base: BaseUrl) -> Result<Self> {
        Ok(Self {
            client: RestClient::new(base)?,
        })
    }

    pub fn base(&self) -> &BaseUrl {
        self.client.base()
    }
}

#[async_trait]
impl CredentialSource for HttpCredentialSource {
    #[instrument(skip(self))]
    async fn credentials(&self, limit: Option<u32>) -> Result<Vec<Credentials>> {
        let query = CredentialQuery {
            limit,
            select: CREDENTIAL_FIELDS,
        };
        let response: CredentialListResponse = self.client.get(CREDENTIALS, &query).await?;
        debug!(count = response.users.len(), "Fetched credential pairs");

        Ok(response
            .users
            .into_iter()
            .map(|entry| Credentials::new(entry.username, entry.password))
            .collect())
    }

    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    async fn register(&self, credentials: &Credentials) -> Result<()> {
        let request = RegisterRequest {
            username: credentials.username(),
            password: credentials.password(),
        };
        // The created user echoed back is not needed.
        let _: serde_json::Value = self.client.post(REGISTER, &request).await?;
        Ok(())
    }
}
