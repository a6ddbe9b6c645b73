//! Print the public URL of a published note.

use anyhow::Result;
use publish_client::{ContentSource, Publisher, Transport};
use publish_types::DocumentPath;

/// Run the url command.
pub async fn run<T: Transport, C: ContentSource>(
    publisher: &Publisher<T, C>,
    note: &DocumentPath,
) -> Result<()> {
    match publisher.get_url(note).await {
        Some(url) => {
            println!("{}", url);
            Ok(())
        }
        None => anyhow::bail!("note {} is not published", note),
    }
}
