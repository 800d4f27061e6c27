//! Single-file JSON document store.
//!
//! The file holds every collection as one JSON object:
//!
//! ```text
//! {
//!   "hostels":         { "<id>": { ...document... }, ... },
//!   "roomAllocations": { "<id>": { ...document... }, ... }
//! }
//! ```
//!
//! Every successful write rewrites the whole file through a temporary file in
//! the same directory followed by a rename, so readers never observe a
//! half-written snapshot and a failed batch leaves the file untouched.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::batch::WriteBatch;
use crate::error::{StoreError, StoreResult};
use crate::memory::{apply_batch, apply_update, Collections};
use crate::traits::{CommitSummary, DocumentStore};
use crate::Document;

/// Document store persisted to a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    collections: RwLock<Collections>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let collections = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader).map_err(|e| StoreError::Corrupt {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        } else {
            Collections::new()
        };
        info!(
            path = %path.display(),
            collections = collections.len(),
            "opened JSON store"
        );
        Ok(Self {
            path,
            collections: RwLock::new(collections),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, collections: &Collections) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, collections)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        debug!(path = %self.path.display(), "store file rewritten");
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn load_all(&self, collection: &str) -> StoreResult<Vec<(String, Document)>> {
        let collections = self.collections.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn update_one(&self, collection: &str, id: &str, fields: Document) -> StoreResult<()> {
        let mut collections = self.collections.write().map_err(|_| StoreError::LockPoisoned)?;
        let mut next = collections.clone();
        apply_update(&mut next, collection, id, fields)?;
        self.persist(&next)?;
        *collections = next;
        Ok(())
    }

    fn commit(&self, batch: WriteBatch) -> StoreResult<CommitSummary> {
        let mut collections = self.collections.write().map_err(|_| StoreError::LockPoisoned)?;
        let (next, summary) = apply_batch(&collections, batch)?;
        self.persist(&next)?;
        *collections = next;
        info!(updated = summary.updated, deleted = summary.deleted, "batch committed to file");
        Ok(summary)
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .finish()
    }
}
