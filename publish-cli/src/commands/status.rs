//! Show publishing status.

use anyhow::Result;
use publish_client::{ContentSource, Publisher, Transport};
use publish_types::published_url;

/// Run the status command.
pub async fn run<T: Transport, C: ContentSource>(publisher: &Publisher<T, C>) -> Result<()> {
    let settings = publisher.state().settings().await;
    let base_url = publisher.state().base_url().await;
    let posts = publisher.posts().list().await;
    let feeds = publisher.feeds().list().await;

    println!("=== orion-publish status ===");
    println!();
    println!("Service: {}", base_url);
    println!(
        "Feeds:   {} ({} registered)",
        if settings.feeds_enabled {
            "enabled"
        } else {
            "disabled"
        },
        feeds.len()
    );
    println!();

    if posts.is_empty() {
        println!("Nothing published.");
        println!();
        println!("Run 'orion-publish publish <note>' to publish a note.");
        return Ok(());
    }

    println!("Published ({}):", posts.len());
    for (path, record) in &posts {
        println!("  {}  {}", path, published_url(&base_url, &record.remote_id));
    }

    Ok(())
}
