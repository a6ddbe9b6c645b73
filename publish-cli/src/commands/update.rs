//! Push a published note's current content.

use anyhow::{Context, Result};
use publish_client::{ContentSource, Publisher, Transport};
use publish_types::DocumentPath;

/// Run the update command.
pub async fn run<T: Transport, C: ContentSource>(
    publisher: &Publisher<T, C>,
    note: &DocumentPath,
) -> Result<()> {
    let record = publisher
        .update_post(note)
        .await
        .with_context(|| format!("Failed to update {}", note))?;

    println!("Updated {} (post {})", note, record.remote_id);
    Ok(())
}
