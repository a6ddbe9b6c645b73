//! Records kept about remote resources.

use serde::{Deserialize, Serialize};

use crate::{AccessToken, FeedId, PostId, ValidationError};

/// Remote identity of a published note.
///
/// Presence of a record for a path means the note is published. A record is
/// never edited: it is written when the post is created and removed when the
/// post is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedRecord {
    /// Id assigned by the service on creation.
    #[serde(rename = "id")]
    pub remote_id: PostId,
    /// Token authorizing later updates and deletion.
    #[serde(rename = "token")]
    pub access_token: AccessToken,
}

impl PublishedRecord {
    /// Create a record from validated parts.
    pub fn new(remote_id: PostId, access_token: AccessToken) -> Self {
        Self {
            remote_id,
            access_token,
        }
    }

    /// Create a record from raw strings, validating both.
    pub fn from_parts(remote_id: &str, access_token: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(
            PostId::new(remote_id)?,
            AccessToken::new(access_token)?,
        ))
    }
}

/// A feed created on the publishing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRecord {
    /// Id assigned by the service.
    pub id: FeedId,
    /// Token authorizing deletion of the feed.
    pub token: AccessToken,
    /// Human-readable title.
    pub title: String,
}

impl FeedRecord {
    /// Create a feed record from raw strings, validating id and token.
    pub fn from_parts(id: &str, token: &str, title: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: FeedId::new(id)?,
            token: AccessToken::new(token)?,
            title: title.to_string(),
        })
    }
}

/// Where a new post is published.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedScope {
    /// Not part of any feed.
    #[default]
    Global,
    /// Part of the given feed.
    Feed(FeedId),
}

impl FeedScope {
    /// The feed id, if scoped to a feed.
    pub fn feed_id(&self) -> Option<&FeedId> {
        match self {
            Self::Global => None,
            Self::Feed(id) => Some(id),
        }
    }
}

impl From<Option<FeedId>> for FeedScope {
    fn from(feed: Option<FeedId>) -> Self {
        feed.map_or(Self::Global, Self::Feed)
    }
}

/// Result of a local lookup. Absence is an expected answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// An entry exists.
    Found(T),
    /// No entry exists.
    NotFound,
}

impl<T> Lookup<T> {
    /// Check if an entry was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Borrow the found entry.
    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    /// Convert into an `Option`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_record_uses_short_keys() {
        let record = PublishedRecord::from_parts("p1", "t1").unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"p1","token":"t1"}"#);

        let parsed: PublishedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn published_record_rejects_blank_parts() {
        assert!(PublishedRecord::from_parts("", "t1").is_err());
        assert!(PublishedRecord::from_parts("p1", "").is_err());
        assert!(serde_json::from_str::<PublishedRecord>(r#"{"id":"","token":"t"}"#).is_err());
    }

    #[test]
    fn feed_record_parses_stored_shape() {
        let feed: FeedRecord =
            serde_json::from_str(r#"{"id":"f1","token":"ft1","title":"Weekly"}"#).unwrap();
        assert_eq!(feed, FeedRecord::from_parts("f1", "ft1", "Weekly").unwrap());
    }

    #[test]
    fn feed_scope_from_option() {
        assert_eq!(FeedScope::from(None), FeedScope::Global);
        let id = FeedId::new("f1").unwrap();
        let scope = FeedScope::from(Some(id.clone()));
        assert_eq!(scope.feed_id(), Some(&id));
    }

    #[test]
    fn lookup_accessors() {
        let found = Lookup::from(Some(7));
        assert!(found.is_found());
        assert_eq!(found.found(), Some(&7));
        assert_eq!(found.into_option(), Some(7));

        let missing: Lookup<i32> = Lookup::from(None);
        assert!(!missing.is_found());
        assert_eq!(missing.into_option(), None);
    }
}
