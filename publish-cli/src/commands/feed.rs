//! Create, delete and list feeds.

use anyhow::{Context, Result};
use publish_client::{ContentSource, Publisher, Transport};
use publish_types::FeedId;

/// Create a feed on the service and register it.
pub async fn create<T: Transport, C: ContentSource>(
    publisher: &Publisher<T, C>,
    title: &str,
) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        anyhow::bail!("feed title must not be empty");
    }

    let feed = publisher
        .create_feed(title)
        .await
        .with_context(|| format!("Failed to create feed {:?}", title))?;

    println!("Created feed {:?}", feed.title);
    println!("  ID: {}", feed.id);
    if !publisher.state().settings().await.feeds_enabled {
        println!();
        println!("Feeds are disabled. Run 'orion-publish settings feeds --enable' to publish into it.");
    }
    Ok(())
}

/// Delete a registered feed.
pub async fn delete<T: Transport, C: ContentSource>(
    publisher: &Publisher<T, C>,
    feed_id: &str,
) -> Result<()> {
    let id = FeedId::new(feed_id).context("Invalid feed id")?;

    let feed = publisher
        .delete_feed(&id)
        .await
        .with_context(|| format!("Failed to delete feed {}", id))?;

    println!("Deleted feed {:?} ({})", feed.title, feed.id);
    Ok(())
}

/// List registered feeds.
pub async fn list<T: Transport, C: ContentSource>(publisher: &Publisher<T, C>) -> Result<()> {
    let feeds = publisher.feeds().list().await;
    if feeds.is_empty() {
        println!("No feeds.");
        return Ok(());
    }

    for feed in feeds {
        println!("{}  {}", feed.id, feed.title);
    }
    Ok(())
}
