//! Map from note path to the remote identity of its post.

use std::collections::BTreeMap;

use publish_types::{DocumentPath, Lookup, PublishedRecord};
use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient::Entry;
use crate::DocumentState;

/// Published notes, keyed by path.
///
/// At most one record per path; a path with no record is unpublished.
///
/// Deserializing keeps every valid entry. Entries with an invalid path or
/// record are dropped and reported by [`PublishedFiles::take_skipped`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PublishedFiles {
    records: BTreeMap<DocumentPath, PublishedRecord>,
    #[serde(skip)]
    skipped: Vec<String>,
}

impl<'de> Deserialize<'de> for PublishedFiles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Entry<PublishedRecord>>::deserialize(deserializer)?;
        let mut files = Self::new();
        for (key, entry) in raw {
            match (DocumentPath::new(key.as_str()), entry.into_option()) {
                (Ok(path), Some(record)) => {
                    files.records.insert(path, record);
                }
                _ => files.skipped.push(format!("publishedFiles[{:?}]", key)),
            }
        }
        Ok(files)
    }
}

impl PublishedFiles {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the record for `path`.
    pub fn get(&self, path: &DocumentPath) -> Lookup<PublishedRecord> {
        self.records.get(path).cloned().into()
    }

    /// Lifecycle state of `path`.
    pub fn state_of(&self, path: &DocumentPath) -> DocumentState {
        match self.records.get(path) {
            Some(record) => DocumentState::Published(record.clone()),
            None => DocumentState::Unpublished,
        }
    }

    /// Insert or overwrite the record for `path`.
    ///
    /// Returns the previous record, if any.
    pub fn insert(
        &mut self,
        path: DocumentPath,
        record: PublishedRecord,
    ) -> Option<PublishedRecord> {
        self.records.insert(path, record)
    }

    /// Remove the record for `path`. Removing an absent path is a no-op.
    pub fn remove(&mut self, path: &DocumentPath) -> Option<PublishedRecord> {
        self.records.remove(path)
    }

    /// All records, ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = (&DocumentPath, &PublishedRecord)> {
        self.records.iter()
    }

    /// Number of published notes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing is published.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drain the descriptions of entries dropped while loading.
    pub fn take_skipped(&mut self) -> Vec<String> {
        std::mem::take(&mut self.skipped)
    }
}
