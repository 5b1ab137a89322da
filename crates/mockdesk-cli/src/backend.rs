//! Backend selection: `file://` roots use the local files, everything else
//! goes over HTTP.

use anyhow::{Context, Result};
use async_trait::async_trait;

use mockdesk_core::traits::{CredentialSource, ListParams, RemoteCollection};
use mockdesk_core::{BaseUrl, Credentials, Record, RecordId, Resource};
use mockdesk_file::{FileCollection, FileCredentialSource};
use mockdesk_http::{HttpCollection, HttpCredentialSource};

/// Collection wrapper for CLI use.
#[derive(Debug)]
pub enum CliCollection {
    File(FileCollection),
    Http(HttpCollection),
}

impl CliCollection {
    pub fn open(base: &BaseUrl, resource: Resource) -> Result<Self> {
        if base.is_local() {
            let path = base
                .to_file_path()
                .context("Failed to convert file:// URL to path")?;
            Ok(CliCollection::File(FileCollection::new(path, resource)))
        } else {
            let collection = HttpCollection::new(base.clone(), resource)
                .context("Failed to build HTTP client")?;
            Ok(CliCollection::Http(collection))
        }
    }
}

#[async_trait]
impl RemoteCollection for CliCollection {
    fn resource(&self) -> &Resource {
        match self {
            CliCollection::File(c) => c.resource(),
            CliCollection::Http(c) => c.resource(),
        }
    }

    async fn list(&self, params: &ListParams) -> mockdesk_core::Result<Vec<Record>> {
        match self {
            CliCollection::File(c) => c.list(params).await,
            CliCollection::Http(c) => c.list(params).await,
        }
    }

    async fn create(&self, record: &Record) -> mockdesk_core::Result<Record> {
        match self {
            CliCollection::File(c) => c.create(record).await,
            CliCollection::Http(c) => c.create(record).await,
        }
    }

    async fn update(&self, id: RecordId, record: &Record) -> mockdesk_core::Result<Record> {
        match self {
            CliCollection::File(c) => c.update(id, record).await,
            CliCollection::Http(c) => c.update(id, record).await,
        }
    }

    async fn delete(&self, id: RecordId) -> mockdesk_core::Result<()> {
        match self {
            CliCollection::File(c) => c.delete(id).await,
            CliCollection::Http(c) => c.delete(id).await,
        }
    }
}

/// Credential source wrapper for CLI use.
#[derive(Debug)]
pub enum CliCredentials {
    File(FileCredentialSource),
    Http(HttpCredentialSource),
}

impl CliCredentials {
    pub fn open(base: &BaseUrl) -> Result<Self> {
        if base.is_local() {
            let path = base
                .to_file_path()
                .context("Failed to convert file:// URL to path")?;
            Ok(CliCredentials::File(FileCredentialSource::new(path)))
        } else {
            let source =
                HttpCredentialSource::new(base.clone()).context("Failed to build HTTP client")?;
            Ok(CliCredentials::Http(source))
        }
    }
}

#[async_trait]
impl CredentialSource for CliCredentials {
    async fn credentials(&self, limit: Option<u32>) -> mockdesk_core::Result<Vec<Credentials>> {
        match self {
            CliCredentials::File(s) => s.credentials(limit).await,
            CliCredentials::Http(s) => s.credentials(limit).await,
        }
    }

    async fn register(&self, credentials: &Credentials) -> mockdesk_core::Result<()> {
        match self {
            CliCredentials::File(s) => s.register(credentials).await,
            CliCredentials::Http(s) => s.register(credentials).await,
        }
    }
}
