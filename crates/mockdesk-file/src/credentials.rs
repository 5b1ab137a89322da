//! Offline credential endpoint.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use mockdesk_core::traits::CredentialSource;
use mockdesk_core::{Credentials, Result};

use crate::collection::{map_io, map_json};
use crate::io::{read_optional, with_lock, write_atomic};

const CREDENTIALS_FILE: &str = "credentials.json";

/// Known pairs stored as a JSON array in `<root>/credentials.json`.
#[derive(Debug, Clone)]
pub struct FileCredentialSource {
    root: PathBuf,
}

impl FileCredentialSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(CREDENTIALS_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(".credentials.lock")
    }

    fn read(&self) -> Result<Vec<Credentials>> {
        match read_optional(&self.path()).map_err(map_io)? {
            Some(content) => serde_json::from_str(&content).map_err(map_json),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl CredentialSource for FileCredentialSource {
    #[instrument(skip(self))]
    async fn credentials(&self, limit: Option<u32>) -> Result<Vec<Credentials>> {
        let mut pairs = self.read()?;
        if let Some(limit) = limit {
            pairs.truncate(limit as usize);
        }
        debug!(count = pairs.len(), "Read local credential pairs");
        Ok(pairs)
    }

    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    async fn register(&self, credentials: &Credentials) -> Result<()> {
        with_lock(&self.lock_path(), || {
            Ok(self.read().and_then(|mut pairs| {
                pairs.push(credentials.clone());
                let content = serde_json::to_string_pretty(&pairs).map_err(map_json)?;
                write_atomic(&self.path(), &content).map_err(map_io)
            }))
        })
        .map_err(map_io)??;

        debug!("Registered local account");
        Ok(())
    }
}
