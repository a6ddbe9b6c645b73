//! Remote Service Gateway.
//!
//! Turns publishing intents into requests against the service and decodes
//! the responses. Stateless: it never reads or writes local state, so the
//! caller decides what to commit after a call succeeds.

use publish_types::wire::{
    CreateFeed, CreatePost, ErrorBody, FeedCreated, PostCreated, TokenBody, UpdatePost,
};
use publish_types::{AccessToken, Endpoint, FeedId, FeedRecord, FeedScope, PostId, PublishedRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::transport::{HttpRequest, Method, Transport, TransportError};

/// A remote call failed.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The service answered with a failing status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code (>= 400).
        status: u16,
        /// Reason given by the service, or the status' reason phrase.
        message: String,
    },

    /// No response was obtained.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A successful response did not have the expected shape.
    #[error("invalid response from service: {0}")]
    InvalidResponse(String),

    /// The request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

impl RemoteError {
    /// HTTP status, when the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Stateless translator between publishing intents and HTTP calls.
pub struct Gateway<T: Transport> {
    transport: T,
}

impl<T: Transport> Gateway<T> {
    /// Create a gateway over the given transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Create a post and return its remote identity.
    ///
    /// Feed-scoped posts go to the same endpoint with `feedId` set.
    pub async fn create_post(
        &self,
        base_url: &str,
        scope: &FeedScope,
        title: &str,
        content: &str,
    ) -> Result<PublishedRecord, RemoteError> {
        let body = CreatePost {
            title: title.to_string(),
            content: content.to_string(),
            feed_id: scope.feed_id().cloned(),
        };
        let created: PostCreated = self
            .call(Method::Post, Endpoint::Posts.url(base_url), &body)
            .await?
            .decode()?;
        created
            .into_record()
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }

    /// Replace the title and content of an existing post.
    pub async fn update_post(
        &self,
        base_url: &str,
        remote_id: &PostId,
        token: &AccessToken,
        title: &str,
        content: &str,
    ) -> Result<(), RemoteError> {
        let body = UpdatePost {
            title: title.to_string(),
            content: content.to_string(),
            token: token.clone(),
        };
        self.call(Method::Put, Endpoint::Post(remote_id).url(base_url), &body)
            .await
            .map(drop)
    }

    /// Delete a post.
    pub async fn delete_post(
        &self,
        base_url: &str,
        remote_id: &PostId,
        token: &AccessToken,
    ) -> Result<(), RemoteError> {
        let body = TokenBody {
            token: token.clone(),
        };
        self.call(Method::Delete, Endpoint::Post(remote_id).url(base_url), &body)
            .await
            .map(drop)
    }

    /// Create a feed and return its record.
    pub async fn create_feed(
        &self,
        base_url: &str,
        title: &str,
    ) -> Result<FeedRecord, RemoteError> {
        let body = CreateFeed {
            title: title.to_string(),
        };
        let created: FeedCreated = self
            .call(Method::Post, Endpoint::Feeds.url(base_url), &body)
            .await?
            .decode()?;
        created
            .into_record(title)
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }

    /// Delete a feed.
    pub async fn delete_feed(
        &self,
        base_url: &str,
        feed_id: &FeedId,
        token: &AccessToken,
    ) -> Result<(), RemoteError> {
        let body = TokenBody {
            token: token.clone(),
        };
        self.call(Method::Delete, Endpoint::Feed(feed_id).url(base_url), &body)
            .await
            .map(drop)
    }

    /// Get a reference to the underlying transport (for testing).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(
        &self,
        method: Method,
        url: String,
        body: &impl Serialize,
    ) -> Result<Body, RemoteError> {
        let body = serde_json::to_value(body).map_err(RemoteError::Encode)?;
        tracing::debug!("{} {}", method, url);

        let response = self
            .transport
            .request(HttpRequest::new(method, url, body))
            .await?;

        if !response.is_success() {
            let message = failure_message(response.status, response.body.as_ref());
            tracing::warn!("Service rejected request: HTTP {}: {}", response.status, message);
            return Err(RemoteError::Http {
                status: response.status,
                message,
            });
        }

        Ok(Body(response.body))
    }
}

/// Body of a successful response.
struct Body(Option<Value>);

impl Body {
    fn decode<R: DeserializeOwned>(self) -> Result<R, RemoteError> {
        let value = self
            .0
            .ok_or_else(|| RemoteError::InvalidResponse("missing response body".into()))?;
        serde_json::from_value(value).map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }
}

fn failure_message(status: u16, body: Option<&Value>) -> String {
    let from_body = body
        .and_then(|v| serde_json::from_value::<ErrorBody>(v.clone()).ok())
        .and_then(|b| b.reason().map(str::to_string));

    from_body.unwrap_or_else(|| {
        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::json;

    const BASE: &str = "https://orion.example";

    fn gateway() -> (Gateway<MockTransport>, MockTransport) {
        let transport = MockTransport::new();
        (Gateway::new(transport.clone()), transport)
    }

    fn post_id() -> PostId {
        PostId::new("p1").unwrap()
    }

    fn token(t: &str) -> AccessToken {
        AccessToken::new(t).unwrap()
    }

    // ===========================================
    // Post Tests
    // ===========================================

    #[tokio::test]
    async fn create_post_global() {
        let (gateway, transport) = gateway();
        transport.queue_json(200, json!({"post": {"id": "p1", "token": "t1"}}));

        let record = gateway
            .create_post(BASE, &FeedScope::Global, "a", "hello")
            .await
            .unwrap();

        assert_eq!(record, PublishedRecord::from_parts("p1", "t1").unwrap());
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "https://orion.example/api/posts");
        assert_eq!(sent.body, Some(json!({"title": "a", "content": "hello"})));
    }

    #[tokio::test]
    async fn create_post_in_feed() {
        let (gateway, transport) = gateway();
        transport.queue_json(201, json!({"post": {"id": "p2", "token": "t2"}}));

        let scope = FeedScope::Feed(FeedId::new("f1").unwrap());
        gateway.create_post(BASE, &scope, "a", "hello").await.unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "https://orion.example/api/posts");
        assert_eq!(
            sent.body,
            Some(json!({"title": "a", "content": "hello", "feedId": "f1"}))
        );
    }

    #[tokio::test]
    async fn create_post_rejects_malformed_response() {
        let (gateway, transport) = gateway();
        transport.queue_json(200, json!({"id": "p1"}));
        transport.queue_status(200);
        transport.queue_json(200, json!({"post": {"id": "", "token": "t1"}}));

        for _ in 0..3 {
            let err = gateway
                .create_post(BASE, &FeedScope::Global, "a", "x")
                .await
                .unwrap_err();
            assert!(matches!(err, RemoteError::InvalidResponse(_)), "got {:?}", err);
        }
    }

    #[tokio::test]
    async fn update_post_sends_token() {
        let (gateway, transport) = gateway();
        transport.queue_status(204);

        gateway
            .update_post(BASE, &post_id(), &token("t1"), "a", "v2")
            .await
            .unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.url, "https://orion.example/api/posts/p1");
        assert_eq!(
            sent.body,
            Some(json!({"title": "a", "content": "v2", "token": "t1"}))
        );
    }

    #[tokio::test]
    async fn delete_post_sends_token() {
        let (gateway, transport) = gateway();
        transport.queue_json(200, json!({"ok": true}));

        gateway
            .delete_post(BASE, &post_id(), &token("t1"))
            .await
            .unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.url, "https://orion.example/api/posts/p1");
        assert_eq!(sent.body, Some(json!({"token": "t1"})));
    }

    // ===========================================
    // Feed Tests
    // ===========================================

    #[tokio::test]
    async fn create_feed_returns_record() {
        let (gateway, transport) = gateway();
        transport.queue_json(
            200,
            json!({"feed": {"id": "f1", "token": "ft1", "title": "Weekly"}}),
        );

        let feed = gateway.create_feed(BASE, "Weekly").await.unwrap();

        assert_eq!(feed, FeedRecord::from_parts("f1", "ft1", "Weekly").unwrap());
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "https://orion.example/api/feeds");
        assert_eq!(sent.body, Some(json!({"title": "Weekly"})));
    }

    #[tokio::test]
    async fn delete_feed_sends_token() {
        let (gateway, transport) = gateway();
        transport.queue_status(200);

        gateway
            .delete_feed(BASE, &FeedId::new("f1").unwrap(), &token("ft1"))
            .await
            .unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.url, "https://orion.example/api/feeds/f1");
        assert_eq!(sent.body, Some(json!({"token": "ft1"})));
    }

    // ===========================================
    // Failure Tests
    // ===========================================

    #[tokio::test]
    async fn failing_status_uses_reason_phrase() {
        let (gateway, transport) = gateway();
        transport.queue_status(500);

        let err = gateway
            .create_post(BASE, &FeedScope::Global, "a", "x")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }

    #[tokio::test]
    async fn failing_status_prefers_service_message() {
        let (gateway, transport) = gateway();
        transport.queue_json(403, json!({"error": "invalid token"}));

        let err = gateway
            .update_post(BASE, &post_id(), &token("wrong"), "a", "x")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert_eq!(err.to_string(), "HTTP 403: invalid token");
    }

    #[tokio::test]
    async fn transport_failure_has_no_status() {
        let (gateway, transport) = gateway();
        transport.fail_next_request("network unreachable");

        let err = gateway
            .delete_post(BASE, &post_id(), &token("t1"))
            .await
            .unwrap_err();

        assert!(matches!(err, RemoteError::Transport(_)));
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "connection failed: network unreachable");
    }
}
