//! Persistence of [`PublishState`].
//!
//! The whole state is written on every change. Implementations must make
//! one save atomic: a reader sees either the old or the new state.

use async_trait::async_trait;
use publish_core::PublishState;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing the data file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path of the data file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The data file is not valid publish state.
    #[error("invalid publish state in {path}: {source}")]
    Corrupt {
        /// Path of the data file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The state could not be encoded.
    #[error("failed to encode publish state: {0}")]
    Encode(#[source] serde_json::Error),

    /// A save failed for another reason.
    #[error("save failed: {0}")]
    Other(String),
}

/// Backend that loads and saves the publish state.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Load the stored state, or the default state if nothing is stored yet.
    async fn load(&self) -> Result<PublishState, PersistError>;

    /// Replace the stored state.
    async fn save(&self, state: &PublishState) -> Result<(), PersistError>;
}

/// State kept in a JSON file (the plugin's `data.json` equivalent).
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Store state at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl Persistence for JsonFilePersistence {
    async fn load(&self) -> Result<PublishState, PersistError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No state at {}, starting fresh", self.path.display());
                return Ok(PublishState::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&contents).map_err(|source| PersistError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, state: &PublishState) -> Result<(), PersistError> {
        let contents = serde_json::to_string_pretty(state).map_err(PersistError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        // Write next to the target, then rename over it.
        let tmp = self.path.with_extension("json.tmp");
        write_private(&tmp, contents.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        tracing::debug!("Saved publish state to {}", self.path.display());
        Ok(())
    }
}

/// Write `contents` to a fresh file that is owner read/write only (0600)
/// from the moment it exists. A leftover file at `path` is replaced.
async fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    Ok(())
}

/// In-memory persistence for testing.
///
/// Clones share state, so a test can inspect what was saved.
#[derive(Debug, Default, Clone)]
pub struct MemoryPersistence {
    inner: Arc<Mutex<MemoryPersistenceInner>>,
}

#[derive(Debug, Default)]
struct MemoryPersistenceInner {
    stored: Option<PublishState>,
    saves: usize,
    fail_next_save: Option<String>,
}

impl MemoryPersistence {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `state`.
    pub fn with_state(state: PublishState) -> Self {
        let store = Self::new();
        store.inner.lock().unwrap().stored = Some(state);
        store
    }

    /// The last saved state.
    pub fn stored(&self) -> Option<PublishState> {
        self.inner.lock().unwrap().stored.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.inner.lock().unwrap().saves
    }

    /// Cause the next save to fail.
    pub fn fail_next_save(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_save = Some(error.to_string());
    }
}

#[async_trait]
impl Persistence for MemoryPersistence {
    async fn load(&self) -> Result<PublishState, PersistError> {
        Ok(self.inner.lock().unwrap().stored.clone().unwrap_or_default())
    }

    async fn save(&self, state: &PublishState) -> Result<(), PersistError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_save.take() {
            return Err(PersistError::Other(error));
        }
        inner.stored = Some(state.clone());
        inner.saves += 1;
        Ok(())
    }
}
