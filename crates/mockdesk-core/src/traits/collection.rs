//! Remote collection trait.

use async_trait::async_trait;

use crate::Result;
use crate::record::Record;
use crate::types::{RecordId, Resource};

/// Parameters for listing a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Maximum number of records to return.
    pub limit: Option<u32>,
    /// Restrict each record to these fields.
    pub select: Vec<String>,
}

impl ListParams {
    /// List at most `limit` records.
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            select: Vec::new(),
        }
    }

    /// Restrict each record to the given fields.
    pub fn with_select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Field selection as a comma separated list, if any.
    pub fn select_param(&self) -> Option<String> {
        if self.select.is_empty() {
            None
        } else {
            Some(self.select.join(","))
        }
    }
}

/// A REST collection of records.
///
/// Every method issues exactly one request. Network failures and non-2xx
/// answers come back as [`TransportError`](crate::error::TransportError);
/// nothing is retried and payloads are not validated here.
#[async_trait]
pub trait RemoteCollection: Send + Sync {
    /// The collection this client talks to.
    fn resource(&self) -> &Resource;

    /// List records.
    async fn list(&self, params: &ListParams) -> Result<Vec<Record>>;

    /// Create a record and return the server's representation of it.
    async fn create(&self, record: &Record) -> Result<Record>;

    /// Replace the record with the given identifier.
    async fn update(&self, id: RecordId, record: &Record) -> Result<Record>;

    /// Delete the record with the given identifier.
    async fn delete(&self, id: RecordId) -> Result<()>;
}
