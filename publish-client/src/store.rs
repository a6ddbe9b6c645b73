//! Published-State Store and Feed Registry.
//!
//! Both are views over one [`StateHandle`], which owns the in-memory
//! [`PublishState`] and its [`Persistence`] backend. Every mutation is
//! applied and saved while the handle's lock is held, so writers touching
//! different notes never overwrite each other's changes.

use std::sync::Arc;

use publish_core::{PublishState, Settings};
use publish_types::{DocumentPath, FeedId, FeedRecord, Lookup, PublishedRecord};
use tokio::sync::Mutex;

use crate::persist::{PersistError, Persistence};

/// Shared owner of the persisted state.
pub struct StateHandle {
    state: Mutex<PublishState>,
    persistence: Box<dyn Persistence>,
}

impl StateHandle {
    /// Load the state from `persistence`.
    ///
    /// Entries the backend could not read are dropped with a warning; the
    /// next save leaves them out of the data file.
    pub async fn open(persistence: impl Persistence + 'static) -> Result<Self, PersistError> {
        let mut state = persistence.load().await?;
        for entry in state.take_skipped() {
            tracing::warn!("Ignoring unreadable entry {} in publish state", entry);
        }
        tracing::debug!(
            "Loaded publish state: {} published, {} feeds",
            state.published_files.len(),
            state.settings.feeds.len()
        );
        Ok(Self::with_state(state, persistence))
    }

    /// Use `state` as the current state without loading.
    pub fn with_state(state: PublishState, persistence: impl Persistence + 'static) -> Self {
        Self {
            state: Mutex::new(state),
            persistence: Box::new(persistence),
        }
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> PublishState {
        self.state.lock().await.clone()
    }

    /// Current settings.
    pub async fn settings(&self) -> Settings {
        self.state.lock().await.settings.clone()
    }

    /// Base URL of the service, without a trailing `/`.
    pub async fn base_url(&self) -> String {
        self.state.lock().await.base_url().to_string()
    }

    /// Change the service base URL.
    pub async fn set_base_url(&self, url: &str) -> Result<(), PersistError> {
        let url = url.trim().to_string();
        self.update(|state| state.settings.url = url).await
    }

    /// Allow or forbid publishing into feeds.
    pub async fn set_feeds_enabled(&self, enabled: bool) -> Result<(), PersistError> {
        self.update(|state| state.settings.feeds_enabled = enabled).await
    }

    pub(crate) async fn read<R>(&self, f: impl FnOnce(&PublishState) -> R) -> R {
        let state = self.state.lock().await;
        f(&*state)
    }

    /// Apply `f` and save the result.
    ///
    /// If saving fails the change stays applied in memory and the error is
    /// returned; a later successful save persists it.
    pub(crate) async fn update<R>(
        &self,
        f: impl FnOnce(&mut PublishState) -> R,
    ) -> Result<R, PersistError> {
        let mut state = self.state.lock().await;
        let result = f(&mut *state);
        if let Err(e) = self.persistence.save(&*state).await {
            tracing::warn!("Failed to save publish state: {}", e);
            return Err(e);
        }
        Ok(result)
    }
}

/// Durable map from note path to remote post identity.
#[derive(Clone)]
pub struct PublishedStore {
    state: Arc<StateHandle>,
}

impl PublishedStore {
    /// Create a store view over `state`.
    pub fn new(state: Arc<StateHandle>) -> Self {
        Self { state }
    }

    /// Look up the record for `path`.
    pub async fn get(&self, path: &DocumentPath) -> Lookup<PublishedRecord> {
        self.state.read(|s| s.published_files.get(path)).await
    }

    /// Record `path` as published, then persist.
    pub async fn put(
        &self,
        path: &DocumentPath,
        record: PublishedRecord,
    ) -> Result<(), PersistError> {
        self.state
            .update(|s| {
                s.published_files.insert(path.clone(), record);
            })
            .await
    }

    /// Forget `path`, then persist. Absent paths are a no-op.
    pub async fn delete(
        &self,
        path: &DocumentPath,
    ) -> Result<Option<PublishedRecord>, PersistError> {
        self.state.update(|s| s.published_files.remove(path)).await
    }

    /// All published notes, ordered by path.
    pub async fn list(&self) -> Vec<(DocumentPath, PublishedRecord)> {
        self.state
            .read(|s| {
                s.published_files
                    .iter()
                    .map(|(path, record)| (path.clone(), record.clone()))
                    .collect()
            })
            .await
    }
}

/// Durable list of feeds created through this vault.
#[derive(Clone)]
pub struct FeedRegistry {
    state: Arc<StateHandle>,
}

impl FeedRegistry {
    /// Create a registry view over `state`.
    pub fn new(state: Arc<StateHandle>) -> Self {
        Self { state }
    }

    /// Look up a feed by id.
    pub async fn get(&self, id: &FeedId) -> Lookup<FeedRecord> {
        self.state.read(|s| s.settings.feeds.get(id)).await
    }

    /// Add a feed (replacing one with the same id), then persist.
    pub async fn add(&self, record: FeedRecord) -> Result<(), PersistError> {
        self.state.update(|s| s.settings.feeds.add(record)).await
    }

    /// Remove a feed, then persist.
    pub async fn delete(&self, id: &FeedId) -> Result<Option<FeedRecord>, PersistError> {
        self.state.update(|s| s.settings.feeds.remove(id)).await
    }

    /// All feeds in creation order.
    pub async fn list(&self) -> Vec<FeedRecord> {
        self.state
            .read(|s| s.settings.feeds.iter().cloned().collect())
            .await
    }
}
