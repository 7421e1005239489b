// File: src/persistence.rs
use crate::error::StoreError;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Key-value blob storage the engine persists mutable state through.
pub trait StateStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;
    fn save(&self, blob: &[u8]) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    #[default]
    Json,
    Bincode,
}

impl SnapshotFormat {
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, StoreError> {
        Ok(match self {
            SnapshotFormat::Json => serde_json::to_vec_pretty(value)?,
            SnapshotFormat::Bincode => bincode::serialize(value)?,
        })
    }

    pub fn decode<T: DeserializeOwned>(&self, blob: &[u8]) -> Result<T, StoreError> {
        Ok(match self {
            SnapshotFormat::Json => serde_json::from_slice(blob)?,
            SnapshotFormat::Bincode => bincode::deserialize(blob)?,
        })
    }
}

/// A single file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStore {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, blob: &[u8]) -> Result<(), StoreError> {
        let parent_dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            writer.write_all(blob)?;
            writer.flush()?;
        }

        temp_file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-process storage for hosts without a disk, and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: Vec<u8>) -> Self {
        Self {
            blob: Mutex::new(Some(blob)),
        }
    }

    pub fn snapshot(&self) -> Option<Vec<u8>> {
        self.blob.lock().clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.blob.lock().clone())
    }

    fn save(&self, blob: &[u8]) -> Result<(), StoreError> {
        *self.blob.lock() = Some(blob.to_vec());
        Ok(())
    }
}
