//! JSON bodies and endpoints of the publishing service.
//!
//! ```text
//! POST   {base}/api/posts        {title, content, feedId?}  -> {post: {id, token}}
//! PUT    {base}/api/posts/{id}   {title, content, token}    -> 2xx
//! DELETE {base}/api/posts/{id}   {token}                    -> 2xx
//! POST   {base}/api/feeds        {title}                    -> {feed: {id, token, title}}
//! DELETE {base}/api/feeds/{id}   {token}                    -> 2xx
//! ```
//!
//! A published note is readable at `{base}/p/{id}`.

use serde::{Deserialize, Serialize};

use crate::{AccessToken, FeedId, FeedRecord, PostId, PublishedRecord, ValidationError};

/// A path on the publishing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Post collection, target of post creation.
    Posts,
    /// A single post.
    Post(&'a PostId),
    /// Feed collection, target of feed creation.
    Feeds,
    /// A single feed.
    Feed(&'a FeedId),
}

impl Endpoint<'_> {
    /// Full URL of this endpoint under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        let base = trim_base(base_url);
        match self {
            Self::Posts => format!("{}/api/posts", base),
            Self::Post(id) => format!("{}/api/posts/{}", base, id),
            Self::Feeds => format!("{}/api/feeds", base),
            Self::Feed(id) => format!("{}/api/feeds/{}", base, id),
        }
    }
}

/// Public URL of a published note.
pub fn published_url(base_url: &str, remote_id: &PostId) -> String {
    format!("{}/p/{}", trim_base(base_url), remote_id)
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Body of `POST /api/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePost {
    /// Post title (note file name without extension).
    pub title: String,
    /// Raw note text.
    pub content: String,
    /// Feed the post belongs to; omitted for global posts.
    #[serde(rename = "feedId", default, skip_serializing_if = "Option::is_none")]
    pub feed_id: Option<FeedId>,
}

/// Body of `PUT /api/posts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePost {
    /// Post title.
    pub title: String,
    /// Raw note text.
    pub content: String,
    /// Token issued when the post was created.
    pub token: AccessToken,
}

/// Body of the delete calls: just the authorizing token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBody {
    /// Token issued when the resource was created.
    pub token: AccessToken,
}

/// Body of `POST /api/feeds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFeed {
    /// Feed title.
    pub title: String,
}

/// Response to post creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCreated {
    /// The created post.
    pub post: RemotePost,
}

/// Post identity as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePost {
    /// Assigned id.
    pub id: String,
    /// Issued token.
    pub token: String,
}

impl PostCreated {
    /// Validate the returned identity into a record.
    pub fn into_record(self) -> Result<PublishedRecord, ValidationError> {
        PublishedRecord::from_parts(&self.post.id, &self.post.token)
    }
}

/// Response to feed creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCreated {
    /// The created feed.
    pub feed: RemoteFeed,
}

/// Feed identity as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFeed {
    /// Assigned id.
    pub id: String,
    /// Issued token.
    pub token: String,
    /// Title, echoed back by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl FeedCreated {
    /// Validate the returned identity into a record.
    ///
    /// Falls back to `requested_title` when the service does not echo one.
    pub fn into_record(self, requested_title: &str) -> Result<FeedRecord, ValidationError> {
        let title = self.feed.title.as_deref().unwrap_or(requested_title);
        FeedRecord::from_parts(&self.feed.id, &self.feed.token, title)
    }
}

/// Error body some deployments send alongside a failing status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Error description.
    #[serde(default)]
    pub error: Option<String>,
    /// Alternative description field.
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The first non-empty description, if any.
    pub fn reason(&self) -> Option<&str> {
        self.error
            .as_deref()
            .into_iter()
            .chain(self.message.as_deref())
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post_id(id: &str) -> PostId {
        PostId::new(id).unwrap()
    }

    #[test]
    fn endpoint_urls() {
        let base = "https://orion.example";
        let id = post_id("p1");
        let feed = FeedId::new("f1").unwrap();
        assert_eq!(Endpoint::Posts.url(base), "https://orion.example/api/posts");
        assert_eq!(
            Endpoint::Post(&id).url(base),
            "https://orion.example/api/posts/p1"
        );
        assert_eq!(Endpoint::Feeds.url(base), "https://orion.example/api/feeds");
        assert_eq!(
            Endpoint::Feed(&feed).url(base),
            "https://orion.example/api/feeds/f1"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let id = post_id("p1");
        assert_eq!(
            Endpoint::Post(&id).url("https://orion.example/"),
            "https://orion.example/api/posts/p1"
        );
        assert_eq!(
            published_url("https://orion.example//", &id),
            "https://orion.example/p/p1"
        );
    }

    #[test]
    fn create_post_omits_feed_when_global() {
        let body = CreatePost {
            title: "a".into(),
            content: "hello".into(),
            feed_id: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"title": "a", "content": "hello"})
        );
    }

    #[test]
    fn create_post_carries_feed_id() {
        let body = CreatePost {
            title: "a".into(),
            content: "hello".into(),
            feed_id: Some(FeedId::new("f1").unwrap()),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"title": "a", "content": "hello", "feedId": "f1"})
        );
    }

    #[test]
    fn update_and_delete_bodies_carry_token() {
        let token = AccessToken::new("t1").unwrap();
        let update = UpdatePost {
            title: "a".into(),
            content: "v2".into(),
            token: token.clone(),
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"title": "a", "content": "v2", "token": "t1"})
        );
        assert_eq!(
            serde_json::to_value(TokenBody { token }).unwrap(),
            json!({"token": "t1"})
        );
    }

    #[test]
    fn post_created_validates_identity() {
        let ok: PostCreated =
            serde_json::from_value(json!({"post": {"id": "p1", "token": "t1"}})).unwrap();
        assert_eq!(
            ok.into_record().unwrap(),
            PublishedRecord::from_parts("p1", "t1").unwrap()
        );

        let blank: PostCreated =
            serde_json::from_value(json!({"post": {"id": "", "token": "t1"}})).unwrap();
        assert!(blank.into_record().is_err());
    }

    #[test]
    fn feed_created_falls_back_to_requested_title() {
        let echoed: FeedCreated = serde_json::from_value(
            json!({"feed": {"id": "f1", "token": "ft1", "title": "Weekly"}}),
        )
        .unwrap();
        assert_eq!(echoed.into_record("ignored").unwrap().title, "Weekly");

        let bare: FeedCreated =
            serde_json::from_value(json!({"feed": {"id": "f1", "token": "ft1"}})).unwrap();
        assert_eq!(bare.into_record("Weekly").unwrap().title, "Weekly");
    }

    #[test]
    fn error_body_reason() {
        let body: ErrorBody = serde_json::from_value(json!({"error": "bad token"})).unwrap();
        assert_eq!(body.reason(), Some("bad token"));

        let body: ErrorBody =
            serde_json::from_value(json!({"error": " ", "message": "nope"})).unwrap();
        assert_eq!(body.reason(), Some("nope"));

        assert_eq!(ErrorBody::default().reason(), None);
    }
}
