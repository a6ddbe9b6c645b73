//! # publish-core
//!
//! Pure logic for Orion Publish (no I/O, instant tests).
//!
//! This crate holds the in-memory shape of everything Orion Publish
//! remembers, plus the lifecycle rules deciding which remote call an
//! operation turns into, without any network or disk I/O.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. The actual I/O (HTTP calls, reading notes, writing
//! the data file) is performed by `publish-client`, which interprets the
//! [`Action`]s produced here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod feeds;
mod lenient;
pub mod lifecycle;
pub mod published;
pub mod state;

pub use feeds::FeedList;
pub use lifecycle::{Action, DocumentState, Intent, PreconditionError};
pub use published::PublishedFiles;
pub use state::{PublishState, Settings, DEFAULT_BASE_URL};
