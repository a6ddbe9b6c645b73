//! Show and change settings.

use anyhow::{Context, Result};
use publish_client::StateHandle;

/// Print the current settings.
pub async fn show(state: &StateHandle) -> Result<()> {
    let settings = state.settings().await;
    println!("url:           {}", settings.url);
    println!("feeds enabled: {}", settings.feeds_enabled);
    println!("feeds:         {}", settings.feeds.len());
    Ok(())
}

/// Change the service base URL.
pub async fn set_url(state: &StateHandle, url: &str) -> Result<()> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("url must start with http:// or https://, got {:?}", url);
    }

    state
        .set_base_url(url)
        .await
        .context("Failed to save settings")?;
    println!("Service URL set to {}", url);
    Ok(())
}

/// Enable or disable publishing into feeds.
pub async fn set_feeds(state: &StateHandle, enabled: bool) -> Result<()> {
    state
        .set_feeds_enabled(enabled)
        .await
        .context("Failed to save settings")?;
    println!("Feeds {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}
