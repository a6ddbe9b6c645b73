//! Synchronization Engine.
//!
//! [`Publisher`] drives the publish lifecycle of notes. Every operation
//! follows the same order:
//!
//! 1. take the note's lock
//! 2. plan against the locally recorded state (no I/O on rejection)
//! 3. read the note's current content
//! 4. call the service
//! 5. commit the acknowledged outcome to the store
//!
//! Local state only changes after the service acknowledged the call, so a
//! failed call leaves it exactly as it was.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use publish_core::{Action, DocumentState, Intent, PreconditionError};
use publish_types::{
    published_url, DocumentPath, FeedId, FeedRecord, FeedScope, Lookup, PublishedRecord,
};
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::content::{ContentSource, ReadError};
use crate::gateway::{Gateway, RemoteError};
use crate::persist::PersistError;
use crate::store::{FeedRegistry, PublishedStore, StateHandle};
use crate::transport::Transport;

/// A publishing operation failed.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// The service call failed; local state is unchanged.
    #[error("remote call failed: {0}")]
    Remote(#[from] RemoteError),

    /// The note could not be read; nothing was sent.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// The service call succeeded but saving local state failed.
    ///
    /// The in-memory state reflects the remote outcome.
    #[error("remote change applied but local state was not saved: {0}")]
    Persist(#[from] PersistError),
}

/// What a note operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A post was created with this identity.
    Created(PublishedRecord),
    /// The existing post was updated.
    Updated(PublishedRecord),
    /// The post was deleted.
    Deleted(PublishedRecord),
}

impl Outcome {
    /// Remote identity the operation acted on.
    pub fn record(&self) -> &PublishedRecord {
        match self {
            Self::Created(record) | Self::Updated(record) | Self::Deleted(record) => record,
        }
    }

    /// Take the remote identity.
    pub fn into_record(self) -> PublishedRecord {
        match self {
            Self::Created(record) | Self::Updated(record) | Self::Deleted(record) => record,
        }
    }
}

/// One async mutex per key. Entries are created on first use.
struct KeyedLocks<K> {
    locks: DashMap<K, Arc<Mutex<()>>>,
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    async fn acquire(&self, key: &K) -> OwnedMutexGuard<()> {
        // Clone the Arc so the map shard is released before waiting.
        let lock = self.locks.entry(key.clone()).or_default().clone();
        lock.lock_owned().await
    }
}

/// Publishes notes and feeds, keeping local state consistent with the
/// service's acknowledgments.
///
/// Operations on the same note (or the same feed) are serialized;
/// operations on different notes run concurrently.
pub struct Publisher<T: Transport, C: ContentSource> {
    state: Arc<StateHandle>,
    posts: PublishedStore,
    feeds: FeedRegistry,
    gateway: Gateway<T>,
    content: C,
    note_locks: KeyedLocks<DocumentPath>,
    feed_locks: KeyedLocks<FeedId>,
}

impl<T: Transport, C: ContentSource> Publisher<T, C> {
    /// Create a publisher over shared state.
    pub fn new(state: Arc<StateHandle>, gateway: Gateway<T>, content: C) -> Self {
        Self {
            posts: PublishedStore::new(Arc::clone(&state)),
            feeds: FeedRegistry::new(Arc::clone(&state)),
            state,
            gateway,
            content,
            note_locks: KeyedLocks::new(),
            feed_locks: KeyedLocks::new(),
        }
    }

    /// Publish an unpublished note.
    ///
    /// Fails with [`PreconditionError::AlreadyPublished`] before any network
    /// call if the note already has a post.
    pub async fn create_post(
        &self,
        path: &DocumentPath,
        scope: FeedScope,
    ) -> Result<PublishedRecord, PublishError> {
        self.apply(path, Intent::Create(scope))
            .await
            .map(Outcome::into_record)
    }

    /// Push the note's current content to its existing post.
    ///
    /// The stored record is not changed.
    pub async fn update_post(&self, path: &DocumentPath) -> Result<PublishedRecord, PublishError> {
        self.apply(path, Intent::Update)
            .await
            .map(Outcome::into_record)
    }

    /// Delete the note's post and forget its identity.
    ///
    /// If the service call fails the record is kept.
    pub async fn delete_post(&self, path: &DocumentPath) -> Result<PublishedRecord, PublishError> {
        self.apply(path, Intent::Delete)
            .await
            .map(Outcome::into_record)
    }

    /// Update the note if it is published, publish it otherwise.
    ///
    /// `scope` only applies when a new post is created.
    pub async fn sync(
        &self,
        path: &DocumentPath,
        scope: FeedScope,
    ) -> Result<Outcome, PublishError> {
        self.apply(path, Intent::Sync(scope)).await
    }

    /// Public URL of the note's post, if it is published.
    pub async fn get_url(&self, path: &DocumentPath) -> Option<String> {
        let record = self.posts.get(path).await.into_option()?;
        let base_url = self.state.base_url().await;
        Some(published_url(&base_url, &record.remote_id))
    }

    /// Create a feed and register it.
    pub async fn create_feed(&self, title: &str) -> Result<FeedRecord, PublishError> {
        let base_url = self.state.base_url().await;
        let feed = self.gateway.create_feed(&base_url, title).await?;
        tracing::info!("Created feed {} ({:?})", feed.id, feed.title);

        self.feeds.add(feed.clone()).await?;
        Ok(feed)
    }

    /// Delete a registered feed.
    ///
    /// Fails with [`PreconditionError::FeedNotFound`] before any network call
    /// if the feed is not registered. If the service call fails the feed
    /// stays registered.
    pub async fn delete_feed(&self, feed_id: &FeedId) -> Result<FeedRecord, PublishError> {
        let _guard = self.feed_locks.acquire(feed_id).await;

        let feed = match self.feeds.get(feed_id).await {
            Lookup::Found(feed) => feed,
            Lookup::NotFound => {
                return Err(PreconditionError::FeedNotFound {
                    feed_id: feed_id.clone(),
                }
                .into())
            }
        };

        let base_url = self.state.base_url().await;
        self.gateway
            .delete_feed(&base_url, &feed.id, &feed.token)
            .await?;
        tracing::info!("Deleted feed {}", feed.id);

        self.feeds.delete(feed_id).await?;
        Ok(feed)
    }

    /// Published-State Store used by this publisher.
    pub fn posts(&self) -> &PublishedStore {
        &self.posts
    }

    /// Feed Registry used by this publisher.
    pub fn feeds(&self) -> &FeedRegistry {
        &self.feeds
    }

    /// Shared state handle (settings access).
    pub fn state(&self) -> &Arc<StateHandle> {
        &self.state
    }

    /// Get a reference to the gateway (for testing).
    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    async fn apply(&self, path: &DocumentPath, intent: Intent) -> Result<Outcome, PublishError> {
        let _guard = self.note_locks.acquire(path).await;
        tracing::debug!("Acquired lock for {}", path);

        let state = DocumentState::from(self.posts.get(path).await);
        let action = state.plan(path, intent)?;
        let base_url = self.state.base_url().await;

        match action {
            Action::CreatePost { scope } => {
                let content = self.content.read_content(path).await?;
                let record = self
                    .gateway
                    .create_post(&base_url, &scope, path.title(), &content)
                    .await?;
                tracing::info!("Published {} as post {}", path, record.remote_id);

                self.posts.put(path, record.clone()).await?;
                Ok(Outcome::Created(record))
            }
            Action::UpdatePost { record } => {
                let content = self.content.read_content(path).await?;
                self.gateway
                    .update_post(
                        &base_url,
                        &record.remote_id,
                        &record.access_token,
                        path.title(),
                        &content,
                    )
                    .await?;
                tracing::info!("Updated post {} for {}", record.remote_id, path);
                Ok(Outcome::Updated(record))
            }
            Action::DeletePost { record } => {
                self.gateway
                    .delete_post(&base_url, &record.remote_id, &record.access_token)
                    .await?;
                tracing::info!("Unpublished {} (post {})", path, record.remote_id);

                self.posts.delete(path).await?;
                Ok(Outcome::Deleted(record))
            }
        }
    }
}
