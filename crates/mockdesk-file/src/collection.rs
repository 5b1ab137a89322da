//! Offline collections API over local JSON files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use mockdesk_core::error::TransportError;
use mockdesk_core::record::next_id;
use mockdesk_core::traits::{ListParams, RemoteCollection};
use mockdesk_core::{Error, Record, RecordId, Resource, Result};

use crate::io::{read_optional, with_lock, write_atomic};

pub(crate) fn map_io(err: std::io::Error) -> Error {
    TransportError::Connection {
        message: format!("IO error: {}", err),
    }
    .into()
}

pub(crate) fn map_json(err: serde_json::Error) -> Error {
    TransportError::Decode {
        message: err.to_string(),
    }
    .into()
}

/// A collection stored as a JSON array in `<root>/<resource>.json`.
///
/// Behaves like a real API that persists: creates get the next free id,
/// unknown ids answer 404. A missing file is an empty collection.
#[derive(Debug, Clone)]
pub struct FileCollection {
    root: PathBuf,
    resource: Resource,
}

impl FileCollection {
    pub fn new(root: impl AsRef<Path>, resource: Resource) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            resource,
        }
    }

    /// Path of the backing JSON file.
    pub fn path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.resource))
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(format!(".{}.lock", self.resource))
    }

    /// Replace the whole collection.
    pub fn seed(&self, records: &[Record]) -> Result<()> {
        let content = serde_json::to_string_pretty(records).map_err(map_json)?;
        with_lock(&self.lock_path(), || write_atomic(&self.path(), &content)).map_err(map_io)
    }

    fn read(&self) -> Result<Vec<Record>> {
        match read_optional(&self.path()).map_err(map_io)? {
            Some(content) => serde_json::from_str(&content).map_err(map_json),
            None => Ok(Vec::new()),
        }
    }

    fn write(&self, records: &[Record]) -> Result<()> {
        let content = serde_json::to_string_pretty(records).map_err(map_json)?;
        write_atomic(&self.path(), &content).map_err(map_io)
    }

    /// Read, change and write back under the collection lock.
    fn modify<T>(&self, f: impl FnOnce(&mut Vec<Record>) -> Result<T>) -> Result<T> {
        with_lock(&self.lock_path(), || {
            Ok(self.read().and_then(|mut records| {
                let value = f(&mut records)?;
                self.write(&records)?;
                Ok(value)
            }))
        })
        .map_err(map_io)?
    }
}

fn position(records: &[Record], id: RecordId) -> Result<usize> {
    records
        .iter()
        .position(|r| r.id() == Some(id))
        .ok_or_else(|| TransportError::status(404).into())
}

#[async_trait]
impl RemoteCollection for FileCollection {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    #[instrument(skip(self), fields(resource = %self.resource))]
    async fn list(&self, params: &ListParams) -> Result<Vec<Record>> {
        let records = self.read()?;
        let limit = params.limit.map_or(usize::MAX, |l| l as usize);

        let records: Vec<Record> = records
            .iter()
            .take(limit)
            .map(|r| {
                if params.select.is_empty() {
                    r.clone()
                } else {
                    r.select(&params.select)
                }
            })
            .collect();

        debug!(count = records.len(), "Listed local records");
        Ok(records)
    }

    #[instrument(skip(self, record), fields(resource = %self.resource))]
    async fn create(&self, record: &Record) -> Result<Record> {
        self.modify(|records| {
            let id = next_id(records)?;
            let created = record.clone().with_id(id);
            records.push(created.clone());
            debug!(id = %id, "Created local record");
            Ok(created)
        })
    }

    #[instrument(skip(self, record), fields(resource = %self.resource))]
    async fn update(&self, id: RecordId, record: &Record) -> Result<Record> {
        self.modify(|records| {
            let index = position(records, id)?;
            let updated = record.clone().with_id(id);
            records[index] = updated.clone();
            debug!(id = %id, "Updated local record");
            Ok(updated)
        })
    }

    #[instrument(skip(self), fields(resource = %self.resource))]
    async fn delete(&self, id: RecordId) -> Result<()> {
        self.modify(|records| {
            let index = position(records, id)?;
            records.remove(index);
            debug!(id = %id, "Deleted local record");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn post(id: u64, title: &str) -> Record {
        Record::new(json!({"userId": 1, "id": id, "title": title, "body": ""})).unwrap()
    }

    #[tokio::test]
    async fn missing_file_is_empty_collection() {
        let dir = TempDir::new().unwrap();
        let posts = FileCollection::new(dir.path(), Resource::posts());
        assert!(posts.list(&ListParams::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_honours_limit_and_selection() {
        let dir = TempDir::new().unwrap();
        let posts = FileCollection::new(dir.path(), Resource::posts());
        posts
            .seed(&[post(1, "one"), post(2, "two"), post(3, "three")])
            .unwrap();

        let params = ListParams::limit(2).with_select(["title"]);
        let records = posts.list(&params).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text("title"), Some("two"));
        assert!(records[1].get("body").is_none());
    }

    #[tokio::test]
    async fn create_persists_with_next_id() {
        let dir = TempDir::new().unwrap();
        let posts = FileCollection::new(dir.path(), Resource::posts());
        posts.seed(&[post(4, "four")]).unwrap();

        let created = posts
            .create(&Record::new(json!({"title": "new"})).unwrap())
            .await
            .unwrap();
        assert_eq!(created.id().unwrap().get(), 5);

        let reread = FileCollection::new(dir.path(), Resource::posts());
        assert_eq!(reread.list(&ListParams::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_ids_answer_404() {
        let dir = TempDir::new().unwrap();
        let posts = FileCollection::new(dir.path(), Resource::posts());
        posts.seed(&[post(1, "one")]).unwrap();
        let missing = RecordId::new(9).unwrap();

        let err = posts.delete(missing).await.unwrap_err();
        assert_eq!(err.user_message(), "Request failed with status code 404");
        let err = posts.update(missing, &post(9, "x")).await.unwrap_err();
        assert_eq!(err.user_message(), "Request failed with status code 404");
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let dir = TempDir::new().unwrap();
        let posts = FileCollection::new(dir.path(), Resource::posts());
        posts.seed(&[post(1, "one"), post(2, "two")]).unwrap();

        let id = RecordId::new(1).unwrap();
        posts
            .update(id, &Record::new(json!({"title": "uno"})).unwrap())
            .await
            .unwrap();

        let records = posts.list(&ListParams::default()).await.unwrap();
        assert_eq!(records[0].id(), Some(id));
        assert_eq!(records[0].text("title"), Some("uno"));
        assert_eq!(records[1].text("title"), Some("two"));
    }

    #[tokio::test]
    async fn corrupt_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("posts.json"), "{oops").unwrap();
        let posts = FileCollection::new(dir.path(), Resource::posts());

        let err = posts.list(&ListParams::default()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transport(TransportError::Decode { .. })
        ));
    }
}
