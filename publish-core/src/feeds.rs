//! Feeds created on the publishing service.

use publish_types::{FeedId, FeedRecord, Lookup};
use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient::Entry;

/// Known feeds, in creation order. Feed ids are unique within the list.
///
/// Unreadable entries are dropped on load and reported by
/// [`FeedList::take_skipped`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<FeedRecord>")]
pub struct FeedList {
    feeds: Vec<FeedRecord>,
    skipped: Vec<String>,
}

impl<'de> Deserialize<'de> for FeedList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<Entry<FeedRecord>>::deserialize(deserializer)?;
        let mut list = Self::new();
        for (index, entry) in raw.into_iter().enumerate() {
            match entry.into_option() {
                Some(feed) => list.add(feed),
                None => list.skipped.push(format!("settings.feeds[{}]", index)),
            }
        }
        Ok(list)
    }
}

impl From<FeedList> for Vec<FeedRecord> {
    fn from(list: FeedList) -> Self {
        list.feeds
    }
}

impl FeedList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a feed by id.
    pub fn get(&self, id: &FeedId) -> Lookup<FeedRecord> {
        self.feeds.iter().find(|feed| &feed.id == id).cloned().into()
    }

    /// Append a feed. A feed with the same id is replaced in place.
    pub fn add(&mut self, record: FeedRecord) {
        match self.feeds.iter_mut().find(|feed| feed.id == record.id) {
            Some(existing) => *existing = record,
            None => self.feeds.push(record),
        }
    }

    /// Remove a feed by id. Returns the removed record, if any.
    pub fn remove(&mut self, id: &FeedId) -> Option<FeedRecord> {
        let index = self.feeds.iter().position(|feed| &feed.id == id)?;
        Some(self.feeds.remove(index))
    }

    /// All feeds in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &FeedRecord> {
        self.feeds.iter()
    }

    /// Number of feeds.
    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    /// Check if there are no feeds.
    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Drain the descriptions of entries dropped while loading.
    pub fn take_skipped(&mut self) -> Vec<String> {
        std::mem::take(&mut self.skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(id: &str, token: &str, title: &str) -> FeedRecord {
        FeedRecord::from_parts(id, token, title).unwrap()
    }

    fn id(s: &str) -> FeedId {
        FeedId::new(s).unwrap()
    }

    #[test]
    fn add_then_get() {
        let mut list = FeedList::new();
        list.add(feed("f1", "ft1", "Weekly"));

        assert_eq!(list.get(&id("f1")), Lookup::Found(feed("f1", "ft1", "Weekly")));
        assert_eq!(list.get(&id("f2")), Lookup::NotFound);
    }

    #[test]
    fn add_keeps_ids_unique() {
        let mut list = FeedList::new();
        list.add(feed("f1", "ft1", "Weekly"));
        list.add(feed("f2", "ft2", "Daily"));
        list.add(feed("f1", "ft1b", "Weekly (renamed)"));

        assert_eq!(list.len(), 2);
        let titles: Vec<&str> = list.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Weekly (renamed)", "Daily"]);
    }

    #[test]
    fn remove_by_id() {
        let mut list = FeedList::new();
        list.add(feed("f1", "ft1", "Weekly"));
        list.add(feed("f2", "ft2", "Daily"));

        assert_eq!(list.remove(&id("f1")).map(|f| f.title), Some("Weekly".into()));
        assert_eq!(list.remove(&id("f1")), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn serializes_as_array() {
        let mut list = FeedList::new();
        list.add(feed("f1", "ft1", "Weekly"));
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[{"id":"f1","token":"ft1","title":"Weekly"}]"#);
    }

    #[test]
    fn deserialize_collapses_duplicate_ids() {
        let list: FeedList = serde_json::from_str(
            r#"[{"id":"f1","token":"a","title":"One"},{"id":"f1","token":"b","title":"Two"}]"#,
        )
        .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(&id("f1")).into_option().map(|f| f.title), Some("Two".into()));
    }

    #[test]
    fn unreadable_feed_is_skipped() {
        let mut list: FeedList = serde_json::from_str(
            r#"[{"id":"","token":"a","title":"Blank"},{"id":"f2","token":"b","title":"Daily"}]"#,
        )
        .unwrap();

        assert_eq!(list.len(), 1);
        assert!(list.get(&id("f2")).is_found());
        assert_eq!(list.take_skipped(), vec!["settings.feeds[0]".to_string()]);
    }
}
