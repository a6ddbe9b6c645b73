//! # orion-publish
//!
//! Publish notes from a vault directory to an Orion Publish service.
//!
//! ## Commands
//!
//! - `publish`: Publish a note (optionally into a feed)
//! - `sync`: Update a published note, or publish it
//! - `update`: Push a published note's current content
//! - `unpublish`: Delete a note's post
//! - `url`: Print a published note's URL
//! - `status`: Show what is published
//! - `feed`: Create, delete or list feeds
//! - `settings`: Show or change settings
//!
//! ## Example
//!
//! ```bash
//! # Point at a self-hosted service
//! orion-publish --vault ~/notes settings set-url https://orion.example
//!
//! # Publish a note and print its URL
//! orion-publish --vault ~/notes publish notes/hello.md
//!
//! # Push edits later
//! orion-publish --vault ~/notes update notes/hello.md
//!
//! # Publish into a feed
//! orion-publish --vault ~/notes settings feeds --enable
//! orion-publish --vault ~/notes feed create "Weekly"
//! orion-publish --vault ~/notes publish notes/issue-1.md --feed <feed-id>
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{feed, note_path, publish, settings, status, unpublish, update, url};
use config::{CliConfig, Workspace};

/// Publish notes to an Orion Publish service.
#[derive(Parser, Debug)]
#[command(name = "orion-publish")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Vault directory holding the notes (default: current directory)
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    /// Directory for publish state (default: <vault>/.orion-publish)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Options file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Publish a note
    Publish {
        /// Note path, relative to the vault
        note: String,

        /// Publish into this feed
        #[arg(long)]
        feed: Option<String>,
    },

    /// Update a published note, or publish it
    Sync {
        /// Note path, relative to the vault
        note: String,

        /// Feed to publish into if the note is not published yet
        #[arg(long)]
        feed: Option<String>,
    },

    /// Push a published note's current content
    Update {
        /// Note path, relative to the vault
        note: String,
    },

    /// Delete a note's post
    Unpublish {
        /// Note path, relative to the vault
        note: String,
    },

    /// Print a published note's URL
    Url {
        /// Note path, relative to the vault
        note: String,
    },

    /// Show what is published
    Status,

    /// Manage feeds
    #[command(subcommand)]
    Feed(FeedCommand),

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand, Debug)]
enum FeedCommand {
    /// Create a feed
    Create {
        /// Feed title
        title: String,
    },

    /// Delete a feed
    Delete {
        /// Feed id
        id: String,
    },

    /// List feeds
    List,
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print current settings
    Show,

    /// Set the service base URL
    SetUrl {
        /// Base URL, e.g. https://orion.seancollings.dev
        url: String,
    },

    /// Enable or disable feeds
    Feeds {
        /// Allow publishing into feeds
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Forbid publishing into feeds
        #[arg(long, conflicts_with = "enable")]
        disable: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Initialize logging (RUST_LOG wins over the config file)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let current_dir = std::env::current_dir().context("Could not determine current directory")?;
    let workspace = Workspace::resolve(&config, cli.vault, cli.data_dir, &current_dir);
    tracing::debug!(
        "Vault {}, state in {}",
        workspace.vault.display(),
        workspace.data_dir.display()
    );

    let publisher = commands::open_publisher(&workspace).await?;

    match cli.command {
        Commands::Publish { note, feed } => {
            let note = note_path(&workspace.vault, &note)?;
            publish::run(&publisher, &note, feed.as_deref()).await?;
        }
        Commands::Sync { note, feed } => {
            let note = note_path(&workspace.vault, &note)?;
            publish::sync(&publisher, &note, feed.as_deref()).await?;
        }
        Commands::Update { note } => {
            let note = note_path(&workspace.vault, &note)?;
            update::run(&publisher, &note).await?;
        }
        Commands::Unpublish { note } => {
            let note = note_path(&workspace.vault, &note)?;
            unpublish::run(&publisher, &note).await?;
        }
        Commands::Url { note } => {
            let note = note_path(&workspace.vault, &note)?;
            url::run(&publisher, &note).await?;
        }
        Commands::Status => {
            status::run(&publisher).await?;
        }
        Commands::Feed(FeedCommand::Create { title }) => {
            feed::create(&publisher, &title).await?;
        }
        Commands::Feed(FeedCommand::Delete { id }) => {
            feed::delete(&publisher, &id).await?;
        }
        Commands::Feed(FeedCommand::List) => {
            feed::list(&publisher).await?;
        }
        Commands::Settings(SettingsCommand::Show) => {
            settings::show(publisher.state()).await?;
        }
        Commands::Settings(SettingsCommand::SetUrl { url }) => {
            settings::set_url(publisher.state(), &url).await?;
        }
        Commands::Settings(SettingsCommand::Feeds { enable, disable }) => {
            if enable {
                settings::set_feeds(publisher.state(), true).await?;
            } else if disable {
                settings::set_feeds(publisher.state(), false).await?;
            } else {
                anyhow::bail!("Must specify either --enable or --disable");
            }
        }
    }

    Ok(())
}
