//! REST collection backend.

use async_trait::async_trait;
use tracing::{debug, instrument};

use mockdesk_core::traits::{ListParams, RemoteCollection};
use mockdesk_core::{BaseUrl, Record, RecordId, Resource, Result};

use crate::client::RestClient;
use crate::endpoints::CollectionQuery;

/// A collection served at `{base}/{resource}`.
#[derive(Debug, Clone)]
pub struct HttpCollection {
    resource: Resource,
    client: RestClient,
}

impl HttpCollection {
    /// Create a collection client for `resource` under `base`.
    pub fn new(base: BaseUrl, resource: Resource) -> Result<Self> {
        Ok(Self {
            resource,
            client: RestClient::new(base)?,
        })
    }

    /// Share an existing client.
    pub fn with_client(client: RestClient, resource: Resource) -> Self {
        Self { resource, client }
    }

    pub fn base(&self) -> &BaseUrl {
        self.client.base()
    }

    fn item_path(&self, id: RecordId) -> String {
        format!("{}/{}", self.resource, id)
    }
}

#[async_trait]
impl RemoteCollection for HttpCollection {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    #[instrument(skip(self), fields(resource = %self.resource))]
    async fn list(&self, params: &ListParams) -> Result<Vec<Record>> {
        let query = CollectionQuery {
            limit: params.limit,
            select: params.select_param(),
        };
        let records: Vec<Record> = self.client.get(self.resource.as_str(), &query).await?;
        debug!(count = records.len(), "Listed records");

        // Servers that ignore `select` still send every field.
        if params.select.is_empty() {
            Ok(records)
        } else {
            Ok(records.iter().map(|r| r.select(&params.select)).collect())
        }
    }

    #[instrument(skip(self, record), fields(resource = %self.resource))]
    async fn create(&self, record: &Record) -> Result<Record> {
        self.client.post(self.resource.as_str(), record).await
    }

    #[instrument(skip(self, record), fields(resource = %self.resource))]
    async fn update(&self, id: RecordId, record: &Record) -> Result<Record> {
        self.client.put(&self.item_path(id), record).await
    }

    #[instrument(skip(self), fields(resource = %self.resource))]
    async fn delete(&self, id: RecordId) -> Result<()> {
        self.client.delete(&self.item_path(id)).await
    }
}
