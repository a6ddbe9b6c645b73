//! Delete a note's post.

use anyhow::{Context, Result};
use publish_client::{ContentSource, Publisher, Transport};
use publish_types::DocumentPath;

/// Run the unpublish command.
pub async fn run<T: Transport, C: ContentSource>(
    publisher: &Publisher<T, C>,
    note: &DocumentPath,
) -> Result<()> {
    let record = publisher
        .delete_post(note)
        .await
        .with_context(|| format!("Failed to unpublish {}", note))?;

    println!("Unpublished {} (post {} deleted)", note, record.remote_id);
    Ok(())
}
