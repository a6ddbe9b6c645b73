//! CLI command implementations.

pub mod feed;
pub mod publish;
pub mod settings;
pub mod status;
pub mod unpublish;
pub mod update;
pub mod url;

use anyhow::{Context, Result};
use publish_client::{
    ContentSource, Gateway, HttpTransport, JsonFilePersistence, Publisher, StateHandle, Transport,
    VaultContent,
};
use publish_types::{DocumentPath, FeedId, FeedScope};
use std::path::Path;
use std::sync::Arc;

use crate::config::Workspace;

/// Open the vault's state and build a publisher talking to the service.
pub async fn open_publisher(
    workspace: &Workspace,
) -> Result<Publisher<HttpTransport, VaultContent>> {
    let state_file = workspace.state_file();
    let state = StateHandle::open(JsonFilePersistence::new(&state_file))
        .await
        .with_context(|| format!("Failed to load {}", state_file.display()))?;
    let transport =
        HttpTransport::with_timeout(workspace.timeout).context("Failed to create HTTP client")?;

    Ok(Publisher::new(
        Arc::new(state),
        Gateway::new(transport),
        VaultContent::new(&workspace.vault),
    ))
}

/// Turn a note argument into a vault-relative path.
///
/// Absolute paths must point inside the vault.
pub fn note_path(vault: &Path, arg: &str) -> Result<DocumentPath> {
    let candidate = Path::new(arg);
    let relative = if candidate.is_absolute() {
        candidate
            .strip_prefix(vault)
            .with_context(|| format!("{} is not inside the vault {}", arg, vault.display()))?
            .to_string_lossy()
            .into_owned()
    } else {
        arg.to_string()
    };
    DocumentPath::new(relative).context("Invalid note path")
}

/// Resolve `--feed` into a scope, checking that the feed may be used.
pub async fn feed_scope<T: Transport, C: ContentSource>(
    publisher: &Publisher<T, C>,
    feed: Option<&str>,
) -> Result<FeedScope> {
    let Some(feed) = feed else {
        return Ok(FeedScope::Global);
    };

    if !publisher.state().settings().await.feeds_enabled {
        anyhow::bail!("feeds are disabled. Run 'orion-publish settings feeds --enable' first.");
    }
    let id = FeedId::new(feed).context("Invalid feed id")?;
    if !publisher.feeds().get(&id).await.is_found() {
        anyhow::bail!("feed {} does not exist. Run 'orion-publish feed list' to see feeds.", id);
    }
    Ok(FeedScope::Feed(id))
}
