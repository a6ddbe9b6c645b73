//! Content Accessor: reads the current text of a note.

use async_trait::async_trait;
use publish_types::DocumentPath;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// A note could not be read.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The note does not exist (deleted or moved).
    #[error("note {path} not found")]
    NotFound {
        /// The note.
        path: DocumentPath,
    },

    /// The note exists but reading it failed.
    #[error("cannot read note {path}: {source}")]
    Io {
        /// The note.
        path: DocumentPath,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Source of note text.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Read the full text of the note at `path`.
    async fn read_content(&self, path: &DocumentPath) -> Result<String, ReadError>;
}

/// Notes stored as files under a vault directory.
#[derive(Debug, Clone)]
pub struct VaultContent {
    root: PathBuf,
}

impl VaultContent {
    /// Read notes relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The vault directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of a note.
    pub fn file_path(&self, path: &DocumentPath) -> PathBuf {
        path.as_str()
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

#[async_trait]
impl ContentSource for VaultContent {
    async fn read_content(&self, path: &DocumentPath) -> Result<String, ReadError> {
        let file = self.file_path(path);
        tokio::fs::read_to_string(&file)
            .await
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => ReadError::NotFound { path: path.clone() },
                _ => ReadError::Io {
                    path: path.clone(),
                    source,
                },
            })
    }
}

/// In-memory notes for testing.
#[derive(Debug, Default, Clone)]
pub struct MemoryContent {
    notes: Arc<Mutex<HashMap<DocumentPath, String>>>,
}

impl MemoryContent {
    /// Create an empty note set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a note.
    pub fn insert(&self, path: &DocumentPath, text: &str) {
        self.notes
            .lock()
            .unwrap()
            .insert(path.clone(), text.to_string());
    }

    /// Remove a note, simulating a concurrent delete.
    pub fn remove(&self, path: &DocumentPath) {
        self.notes.lock().unwrap().remove(path);
    }
}

#[async_trait]
impl ContentSource for MemoryContent {
    async fn read_content(&self, path: &DocumentPath) -> Result<String, ReadError> {
        self.notes
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ReadError::NotFound { path: path.clone() })
    }
}
