//! # publish-client
//!
//! Client library that publishes notes to an Orion Publish service.
//!
//! This is the library a host application (the CLI, an editor plugin) uses
//! to publish, update and unpublish notes and to manage feeds.
//!
//! ## Features
//!
//! - **Lifecycle Enforcement**: a note is unpublished or has exactly one post
//! - **Commit After Ack**: local state only changes after the service agreed
//! - **Per-Note Serialization**: operations on one note never interleave
//! - **Transport Abstraction**: Pluggable transport layer (reqwest, mock)
//! - **Pure Planner**: Uses publish-core for side-effect-free decisions
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use publish_client::{Gateway, HttpTransport, JsonFilePersistence, Publisher, StateHandle, VaultContent};
//!
//! let state = StateHandle::open(JsonFilePersistence::new("vault/.orion-publish/publish.json")).await?;
//! let publisher = Publisher::new(
//!     Arc::new(state),
//!     Gateway::new(HttpTransport::new()?),
//!     VaultContent::new("vault"),
//! );
//!
//! let note = DocumentPath::new("notes/a.md")?;
//! publisher.create_post(&note, FeedScope::Global).await?;
//! println!("{:?}", publisher.get_url(&note).await);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod content;
pub mod gateway;
pub mod persist;
pub mod publisher;
pub mod store;
pub mod transport;

pub use content::{ContentSource, MemoryContent, ReadError, VaultContent};
pub use gateway::{Gateway, RemoteError};
pub use persist::{JsonFilePersistence, MemoryPersistence, PersistError, Persistence};
pub use publisher::{Outcome, PublishError, Publisher};
pub use store::{FeedRegistry, PublishedStore, StateHandle};
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, MockTransport, Transport, TransportError,
};
