use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::storage::{OrderedWrites, Storage, StorageKey, StorageValue};

/// On-disk representation: hex encoded keys and values, sorted by key.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    entries: BTreeMap<String, String>,
}

/// A [`Storage`] that keeps the whole state in memory.
///
/// When created with [`SnapshotStorage::with_path`], every commit is followed by a
/// write of the full state to a JSON snapshot, so a later process can pick up
/// where this one stopped.
#[derive(Clone, Debug, Default)]
pub struct SnapshotStorage {
    state: Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>,
    path: Option<PathBuf>,
}

impl SnapshotStorage {
    /// Creates a storage that is never persisted.
    pub fn temporary() -> Self {
        Self::default()
    }

    /// Creates a storage backed by the snapshot at `path`, loading it if the file exists.
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref().to_path_buf();
        let mut state = BTreeMap::new();

        if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
            let snapshot: Snapshot = serde_json::from_str(&raw)
                .with_context(|| format!("Malformed snapshot {}", path.display()))?;

            for (key, value) in snapshot.entries {
                state.insert(hex::decode(key)?, hex::decode(value)?);
            }
            info!(path = %path.display(), entries = state.len(), "Loaded state snapshot");
        } else {
            debug!(path = %path.display(), "No snapshot found, starting from empty state");
        }

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            path: Some(path),
        })
    }

    /// Returns the snapshot location, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Writes the full state to the snapshot file. No-op for temporary storage.
    pub fn flush(&self) -> Result<(), anyhow::Error> {
        self.persist(&self.read())
    }

    /// Writes `state` next to the snapshot and renames it into place, so the
    /// snapshot on disk is either the previous one or `state`, never a mix.
    fn persist(&self, state: &BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), anyhow::Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let snapshot = Snapshot {
            entries: state
                .iter()
                .map(|(k, v)| (hex::encode(k), hex::encode(v)))
                .collect(),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let staging = staging_path(path);
        std::fs::write(&staging, serde_json::to_string_pretty(&snapshot)?)
            .with_context(|| format!("Failed to write snapshot {}", staging.display()))?;
        if let Err(e) = std::fs::rename(&staging, path) {
            let _ = std::fs::remove_file(&staging);
            return Err(e)
                .with_context(|| format!("Failed to replace snapshot {}", path.display()));
        }
        debug!(path = %path.display(), entries = snapshot.entries.len(), "Flushed state snapshot");

        Ok(())
    }

    // A poisoned lock still holds a consistent map: commits swap in a whole new map.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<Vec<u8>, Vec<u8>>> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<Vec<u8>, Vec<u8>>> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

impl Storage for SnapshotStorage {
    type RuntimeConfig = Config;

    fn with_config(config: Self::RuntimeConfig) -> Result<Self, anyhow::Error> {
        match config.path {
            Some(path) => Self::with_path(path),
            None => Ok(Self::temporary()),
        }
    }

    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        self.read()
            .get(key.as_ref())
            .map(|value| StorageValue::from(value.clone()))
    }

    fn commit(&self, writes: &OrderedWrites) -> Result<(), anyhow::Error> {
        let mut state = self.write();
        let mut next = state.clone();
        for (key, value) in &writes.ordered_writes {
            match value {
                Some(value) => {
                    next.insert(key.as_ref().to_vec(), value.value().to_vec());
                }
                None => {
                    next.remove(key.as_ref());
                }
            }
        }

        // The new state becomes visible only once it is on disk.
        self.persist(&next)?;
        *state = next;
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
