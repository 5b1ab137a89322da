//! The list state controller.

use std::future::Future;

use tracing::{debug, info, instrument, warn};

use super::view::{Page, visible_page};
use super::{IdAssignment, ListConfig, PaginationWindow, SearchPredicate};
use crate::error::{Error, InvalidInputError};
use crate::record::{Record, next_id};
use crate::scope::ScopeToken;
use crate::traits::{KeyValueStore, RemoteCollection};
use crate::types::RecordId;
use crate::Result;

/// Load lifecycle of a controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    /// The last load failed; holds the message to display.
    Errored(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Errored(message) => Some(message),
            _ => None,
        }
    }
}

/// Holds one collection snapshot and derives what the view shows.
///
/// The snapshot is only changed after the remote side confirmed a
/// mutation, so a failed request never needs rolling back. All methods
/// that touch state take `&mut self`; there is exactly one mutator.
pub struct ListController<C, S> {
    client: C,
    cache: S,
    config: ListConfig,
    scope: ScopeToken,
    snapshot: Vec<Record>,
    state: LoadState,
    predicate: SearchPredicate,
    window: PaginationWindow,
    history: Vec<String>,
    mutation_error: Option<String>,
}

impl<C, S> ListController<C, S>
where
    C: RemoteCollection,
    S: KeyValueStore,
{
    /// Create an uninitialized controller. Nothing is fetched until
    /// [`load`](Self::load).
    pub fn new(client: C, cache: S, config: ListConfig) -> Self {
        let window = PaginationWindow::new(config.page_size).unwrap_or_else(|_| {
            warn!(page_size = config.page_size, "Invalid page size, using default");
            PaginationWindow::default()
        });

        Self {
            predicate: SearchPredicate::new(config.search_field.clone()),
            client,
            cache,
            config,
            scope: ScopeToken::detached(),
            snapshot: Vec::new(),
            state: LoadState::Uninitialized,
            window,
            history: Vec::new(),
            mutation_error: None,
        }
        .with_stored_history()
    }

    fn with_stored_history(mut self) -> Self {
        self.history = self.read_history();
        self
    }

    /// Tie remote calls to a consumer scope. Results arriving after the
    /// scope ended are discarded.
    pub fn with_scope(mut self, token: ScopeToken) -> Self {
        self.scope = token;
        self
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Load failure message, if the controller is errored.
    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// Message of the last failed mutation, cleared by the next success.
    pub fn mutation_error(&self) -> Option<&str> {
        self.mutation_error.as_deref()
    }

    pub fn snapshot(&self) -> &[Record] {
        &self.snapshot
    }

    pub fn search(&self) -> &SearchPredicate {
        &self.predicate
    }

    pub fn window(&self) -> &PaginationWindow {
        &self.window
    }

    /// Distinct searches submitted so far, oldest first. Restored from the
    /// store when the config names a history key.
    pub fn search_history(&self) -> &[String] {
        &self.history
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Make the snapshot available.
    ///
    /// Uses the cached snapshot when there is one, otherwise lists the
    /// remote collection and caches the result. A failure is recorded as
    /// [`LoadState::Errored`], not returned. Once ready or errored this is
    /// a no-op; use [`reload`](Self::reload) to fetch again.
    #[instrument(skip(self), fields(resource = %self.client.resource()))]
    pub async fn load(&mut self) -> &LoadState {
        match self.state {
            LoadState::Ready | LoadState::Errored(_) => return &self.state,
            LoadState::Uninitialized | LoadState::Loading => {}
        }

        if let Some(records) = self.read_cache() {
            debug!(count = records.len(), "Loaded snapshot from cache");
            self.snapshot = records;
            self.state = LoadState::Ready;
            self.window.clamp(self.match_count());
            return &self.state;
        }

        self.fetch().await
    }

    /// Fetch the collection again, bypassing the cache.
    #[instrument(skip(self), fields(resource = %self.client.resource()))]
    pub async fn reload(&mut self) -> &LoadState {
        self.fetch().await
    }

    async fn fetch(&mut self) -> &LoadState {
        let previous = std::mem::replace(&mut self.state, LoadState::Loading);
        let result = Self::remote(&self.scope, self.client.list(&self.config.list_params)).await;

        match result {
            Ok(records) => {
                info!(count = records.len(), "Fetched snapshot");
                self.snapshot = records;
                self.state = LoadState::Ready;
                self.window.clamp(self.match_count());
                self.write_cache();
            }
            Err(Error::Cancelled) => {
                debug!("Load discarded, consumer scope ended");
                self.state = previous;
            }
            Err(err) => {
                warn!(error = %err, "Fetch failed");
                self.state = LoadState::Errored(err.user_message());
            }
        }

        &self.state
    }

    /// The current page: records matching the search, windowed.
    ///
    /// Empty unless the controller is ready.
    pub fn visible_page(&self) -> Page<'_> {
        if !self.state.is_ready() {
            return Page::empty(&self.window);
        }
        visible_page(&self.snapshot, &self.predicate, &self.window)
    }

    /// Replace the search text and go back to page 0.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.predicate.set(text);
        self.window.reset();
    }

    /// Apply a search and remember it in the history if it is new.
    pub fn submit_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() && !self.history.contains(&text) {
            self.history.push(text.clone());
            self.write_history();
        }
        self.set_search(text);
    }

    /// Move to a page, clamped to the filtered view.
    pub fn set_page(&mut self, page: usize) {
        let total = self.match_count();
        self.window.set_page(page, total);
    }

    /// Change the page size and go back to page 0.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero page size.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        self.window.set_page_size(page_size)
    }

    /// Validate, create remotely, then append to the snapshot.
    ///
    /// The appended record's identifier follows the configured
    /// [`IdAssignment`].
    #[instrument(skip(self, input), fields(resource = %self.client.resource()))]
    pub async fn create(&mut self, input: Record) -> Result<Record> {
        self.ensure_ready()?;
        self.validate(&input)?;
        let sequential = match self.config.id_assignment {
            IdAssignment::ClientSequential => Some(next_id(&self.snapshot)?),
            IdAssignment::ServerAssigned => None,
        };

        let created = Self::remote(&self.scope, self.client.create(&input))
            .await
            .map_err(|e| self.fail_mutation(e))?;

        let id = match sequential {
            Some(id) => id,
            None => {
                let id = created.id().ok_or_else(|| InvalidInputError::Record {
                    reason: "create response carries no id".to_string(),
                })?;
                if self.position(id).is_some() {
                    return Err(InvalidInputError::Record {
                        reason: format!("server assigned id {} is already in the snapshot", id),
                    }
                    .into());
                }
                id
            }
        };

        let record = created.with_id(id);
        self.snapshot.push(record.clone());
        self.committed();

        info!(id = %id, "Created record");
        Ok(record)
    }

    /// Validate, update remotely, then replace the record in place.
    ///
    /// # Errors
    ///
    /// [`Error::NotFoundLocal`] if `id` is not in the snapshot; nothing is
    /// sent in that case.
    #[instrument(skip(self, input), fields(resource = %self.client.resource()))]
    pub async fn update(&mut self, id: RecordId, input: Record) -> Result<Record> {
        self.ensure_ready()?;
        self.validate(&input)?;
        if self.position(id).is_none() {
            return Err(Error::NotFoundLocal { id });
        }

        let outgoing = input.with_id(id);
        let updated = Self::remote(&self.scope, self.client.update(id, &outgoing))
            .await
            .map_err(|e| self.fail_mutation(e))?;

        let record = updated.with_id(id);
        let index = self.position(id).ok_or(Error::NotFoundLocal { id })?;
        self.snapshot[index] = record.clone();
        self.committed();

        info!(id = %id, "Updated record");
        Ok(record)
    }

    /// Delete remotely, then remove from the snapshot.
    ///
    /// # Errors
    ///
    /// [`Error::NotFoundLocal`] if `id` is not in the snapshot; nothing is
    /// sent in that case.
    #[instrument(skip(self), fields(resource = %self.client.resource()))]
    pub async fn delete(&mut self, id: RecordId) -> Result<()> {
        self.ensure_ready()?;
        if self.position(id).is_none() {
            return Err(Error::NotFoundLocal { id });
        }

        Self::remote(&self.scope, self.client.delete(id))
            .await
            .map_err(|e| self.fail_mutation(e))?;

        self.snapshot.retain(|record| record.id() != Some(id));
        self.committed();

        info!(id = %id, "Deleted record");
        Ok(())
    }

    async fn remote<T, F>(scope: &ScopeToken, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        scope.guard(request).await?
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.state.is_ready() {
            Ok(())
        } else {
            Err(InvalidInputError::Other {
                message: format!("{} is not loaded", self.client.resource()),
            }
            .into())
        }
    }

    fn validate(&self, input: &Record) -> Result<()> {
        if let Some(schema) = &self.config.schema {
            schema.validate_record(input)?;
        }
        Ok(())
    }

    fn fail_mutation(&mut self, err: Error) -> Error {
        match &err {
            Error::Cancelled | Error::Validation(_) => {}
            other => {
                warn!(error = %other, "Mutation failed");
                self.mutation_error = Some(other.user_message());
            }
        }
        err
    }

    fn committed(&mut self) {
        self.mutation_error = None;
        self.window.clamp(self.match_count());
        self.write_cache();
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.snapshot.iter().position(|r| r.id() == Some(id))
    }

    fn match_count(&self) -> usize {
        self.snapshot
            .iter()
            .filter(|r| self.predicate.matches(r))
            .count()
    }

    fn read_cache(&self) -> Option<Vec<Record>> {
        let key = self.config.cache_key.as_deref()?;
        match self.cache.get(key) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(records) => Some(records),
                Err(e) => {
                    warn!(key, error = %e, "Ignoring corrupt cached snapshot");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "Cache read failed");
                None
            }
        }
    }

    fn write_cache(&self) {
        let Some(key) = self.config.cache_key.as_deref() else {
            return;
        };
        let result = serde_json::to_string(&self.snapshot)
            .map_err(|e| e.to_string())
            .and_then(|json| self.cache.set(key, &json).map_err(|e| e.to_string()));
        if let Err(e) = result {
            warn!(key, error = %e, "Cache write failed");
        }
    }

    fn read_history(&self) -> Vec<String> {
        let Some(key) = self.config.history_key.as_deref() else {
            return Vec::new();
        };
        match self.cache.get(key) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(key, error = %e, "Ignoring corrupt search history");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "Search history read failed");
                Vec::new()
            }
        }
    }

    fn write_history(&self) {
        let Some(key) = self.config.history_key.as_deref() else {
            return;
        };
        let result = serde_json::to_string(&self.history)
            .map_err(|e| e.to_string())
            .and_then(|json| self.cache.set(key, &json).map_err(|e| e.to_string()));
        if let Err(e) = result {
            warn!(key, error = %e, "Search history write failed");
        }
    }
}

impl<C, S> std::fmt::Debug for ListController<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("state", &self.state)
            .field("records", &self.snapshot.len())
            .field("search", &self.predicate.text())
            .field("window", &self.window)
            .finish()
    }
}
