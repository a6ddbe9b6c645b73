//! Publish a note, or publish-or-update it (`sync`).

use anyhow::{Context, Result};
use publish_client::{ContentSource, Outcome, Publisher, Transport};
use publish_types::DocumentPath;

use super::feed_scope;

/// Run the publish command.
pub async fn run<T: Transport, C: ContentSource>(
    publisher: &Publisher<T, C>,
    note: &DocumentPath,
    feed: Option<&str>,
) -> Result<()> {
    let scope = feed_scope(publisher, feed).await?;

    publisher
        .create_post(note, scope)
        .await
        .with_context(|| format!("Failed to publish {}", note))?;

    println!("Published {}", note);
    print_url(publisher, note).await;
    Ok(())
}

/// Run the sync command: update if published, publish otherwise.
pub async fn sync<T: Transport, C: ContentSource>(
    publisher: &Publisher<T, C>,
    note: &DocumentPath,
    feed: Option<&str>,
) -> Result<()> {
    let scope = feed_scope(publisher, feed).await?;

    let outcome = publisher
        .sync(note, scope)
        .await
        .with_context(|| format!("Failed to sync {}", note))?;

    match outcome {
        Outcome::Created(_) => println!("Published {}", note),
        _ => println!("Updated {}", note),
    }
    print_url(publisher, note).await;
    Ok(())
}

async fn print_url<T: Transport, C: ContentSource>(
    publisher: &Publisher<T, C>,
    note: &DocumentPath,
) {
    if let Some(url) = publisher.get_url(note).await {
        println!("  URL: {}", url);
    }
}
