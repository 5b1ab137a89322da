//! List controller configuration.

use serde::{Deserialize, Serialize};

use super::window::DEFAULT_PAGE_SIZE;
use crate::traits::ListParams;
use crate::validation::{Schema, schemas};

/// Who decides the identifier of a newly created record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdAssignment {
    /// One more than the largest identifier in the snapshot, or 1 when the
    /// snapshot is empty. For mock backends that echo a fixed identifier.
    /// Not safe with concurrent creators.
    #[default]
    ClientSequential,
    /// Keep the identifier from the create response.
    ServerAssigned,
}

/// How a [`ListController`](super::ListController) loads, filters and
/// validates one collection.
#[derive(Debug, Clone)]
pub struct ListConfig {
    /// Cache key for the snapshot; `None` disables caching.
    pub cache_key: Option<String>,
    /// Store key for submitted searches; `None` keeps them in memory only.
    pub history_key: Option<String>,
    /// Parameters for the initial `list` request.
    pub list_params: ListParams,
    /// Field the search predicate applies to.
    pub search_field: String,
    pub page_size: usize,
    /// Rules applied to create/update input before anything is sent.
    pub schema: Option<Schema>,
    pub id_assignment: IdAssignment,
}

impl ListConfig {
    /// Dashboard posts: 55 posts, searched by title, cached under `posts`
    /// with searches kept under `posts-history`.
    pub fn posts() -> Self {
        Self {
            cache_key: Some("posts".to_string()),
            history_key: Some("posts-history".to_string()),
            list_params: ListParams::limit(55),
            search_field: "title".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            schema: None,
            id_assignment: IdAssignment::ClientSequential,
        }
    }

    /// Users table: 3 users, searched by name, validated with the user
    /// form rules, cached under `users`.
    pub fn users() -> Self {
        Self {
            cache_key: Some("users".to_string()),
            history_key: None,
            list_params: ListParams::limit(3),
            search_field: "name".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            schema: Some(schemas::user()),
            id_assignment: IdAssignment::ClientSequential,
        }
    }

    pub fn with_cache_key(mut self, key: Option<String>) -> Self {
        self.cache_key = key;
        self
    }

    pub fn with_history_key(mut self, key: Option<String>) -> Self {
        self.history_key = key;
        self
    }

    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.list_params.limit = limit;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_search_field(mut self, field: impl Into<String>) -> Self {
        self.search_field = field.into();
        self
    }

    pub fn with_schema(mut self, schema: Option<Schema>) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_id_assignment(mut self, policy: IdAssignment) -> Self {
        self.id_assignment = policy;
        self
    }
}
