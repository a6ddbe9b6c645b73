//! Everything Orion Publish persists between runs.
//!
//! The JSON shape matches the data file written by the Orion Publish plugin:
//!
//! ```json
//! {
//!   "settings": { "url": "...", "feedsEnabled": false, "feeds": [] },
//!   "publishedFiles": { "notes/a.md": { "id": "p1", "token": "t1" } }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{FeedList, PublishedFiles};

/// Publishing service used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://orion.seancollings.dev";

/// User-editable settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Base URL of the publishing service.
    pub url: String,
    /// Whether notes may be published into feeds.
    pub feeds_enabled: bool,
    /// Feeds created through this vault.
    pub feeds: FeedList,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            feeds_enabled: false,
            feeds: FeedList::new(),
        }
    }
}

/// Root of the persisted state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublishState {
    /// Settings, including the feed registry.
    pub settings: Settings,
    /// Published notes.
    pub published_files: PublishedFiles,
}

impl PublishState {
    /// Base URL with any trailing `/` removed.
    pub fn base_url(&self) -> &str {
        self.settings.url.trim_end_matches('/')
    }

    /// Drain the descriptions of entries dropped while loading.
    pub fn take_skipped(&mut self) -> Vec<String> {
        let mut skipped = self.published_files.take_skipped();
        skipped.extend(self.settings.feeds.take_skipped());
        skipped
    }
}
