//! # publish-types
//!
//! Identity, record and wire types for Orion Publish.
//!
//! This crate provides the foundational types used across all Orion Publish crates:
//! - [`DocumentPath`], [`PostId`], [`FeedId`], [`AccessToken`] - Validated identities
//! - [`PublishedRecord`], [`FeedRecord`] - What is remembered about remote resources
//! - [`FeedScope`], [`Lookup`] - Publishing target and lookup results
//! - [`wire`] - JSON bodies and endpoints of the publishing service
//! - [`ValidationError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod ids;
mod records;
pub mod wire;

pub use error::ValidationError;
pub use ids::{AccessToken, DocumentPath, FeedId, PostId};
pub use records::{FeedRecord, FeedScope, Lookup, PublishedRecord};
pub use wire::{published_url, Endpoint};
