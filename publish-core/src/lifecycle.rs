//! Publish lifecycle of a single note.
//!
//! A note is either [`DocumentState::Unpublished`] or
//! [`DocumentState::Published`] with exactly one remote identity. There is
//! no stored state field: the state is observed from the published map.
//!
//! [`DocumentState::plan`] is a pure function - it checks the local
//! precondition of an [`Intent`] and returns the remote [`Action`] to perform.
//! The caller (publish-client) performs the I/O and commits the outcome.

use publish_types::{DocumentPath, FeedId, FeedScope, Lookup, PublishedRecord};
use thiserror::Error;

/// Local precondition violated. Raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// Create requested for a note that already has a remote post.
    #[error("note {path} is already published")]
    AlreadyPublished {
        /// The note.
        path: DocumentPath,
    },

    /// Update or delete requested for a note without a remote post.
    #[error("note {path} is not published")]
    NotPublished {
        /// The note.
        path: DocumentPath,
    },

    /// Feed deletion requested for a feed not in the local registry.
    #[error("feed {feed_id} does not exist")]
    FeedNotFound {
        /// The feed id.
        feed_id: FeedId,
    },
}

/// Observed lifecycle state of a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentState {
    /// No remote post.
    Unpublished,
    /// Exactly one remote post.
    Published(PublishedRecord),
}

/// What the caller wants to happen to a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Create a post. Only valid when unpublished.
    Create(FeedScope),
    /// Push current content to the existing post.
    Update,
    /// Delete the existing post.
    Delete,
    /// Update if published, create otherwise.
    Sync(FeedScope),
}

/// Remote call to perform for an accepted intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create a post, then record its identity.
    CreatePost {
        /// Target feed.
        scope: FeedScope,
    },
    /// Update the post; the record stays unchanged.
    UpdatePost {
        /// Identity of the existing post.
        record: PublishedRecord,
    },
    /// Delete the post, then forget its identity.
    DeletePost {
        /// Identity of the existing post.
        record: PublishedRecord,
    },
}

impl DocumentState {
    /// Check if the note has a remote post.
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }

    /// Decide the remote action for `intent`, or reject it.
    pub fn plan(self, path: &DocumentPath, intent: Intent) -> Result<Action, PreconditionError> {
        match (self, intent) {
            (Self::Unpublished, Intent::Create(scope) | Intent::Sync(scope)) => {
                Ok(Action::CreatePost { scope })
            }
            (Self::Published(_), Intent::Create(_)) => Err(PreconditionError::AlreadyPublished {
                path: path.clone(),
            }),

            (Self::Published(record), Intent::Update | Intent::Sync(_)) => {
                Ok(Action::UpdatePost { record })
            }
            (Self::Published(record), Intent::Delete) => Ok(Action::DeletePost { record }),

            (Self::Unpublished, Intent::Update | Intent::Delete) => {
                Err(PreconditionError::NotPublished { path: path.clone() })
            }
        }
    }
}

impl From<Lookup<PublishedRecord>> for DocumentState {
    fn from(lookup: Lookup<PublishedRecord>) -> Self {
        match lookup {
            Lookup::Found(record) => Self::Published(record),
            Lookup::NotFound => Self::Unpublished,
        }
    }
}
