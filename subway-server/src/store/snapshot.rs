//! On-disk JSON snapshot of the whole registry.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::StoreError;
use crate::domain::{LineId, Section, Station};

/// Everything needed to rebuild the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Next id to hand out to a new station.
    pub next_station_id: u64,
    /// Next id to hand out to a new line.
    pub next_line_id: u64,
    pub stations: Vec<Station>,
    pub lines: Vec<SnapshotLine>,
}

/// A stored line. Sections are kept unordered, exactly as the chain holds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLine {
    pub id: LineId,
    pub name: String,
    pub color: String,
    pub sections: Vec<Section>,
}

/// A snapshot file on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the snapshot.
    ///
    /// Returns `Ok(None)` if the file does not exist yet. A file that exists
    /// but cannot be read or parsed is an error, so a damaged snapshot is
    /// never silently replaced by an empty one.
    pub fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Snapshot {
                    message: format!("failed to read {}: {}", self.path.display(), e),
                });
            }
        };

        let snapshot = serde_json::from_str(&contents).map_err(|e| StoreError::Snapshot {
            message: format!("failed to parse {}: {}", self.path.display(), e),
        })?;

        Ok(Some(snapshot))
    }

    /// Save the snapshot.
    ///
    /// Creates parent directories if they don't exist. The file is written
    /// next to its final location and then renamed over it.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Snapshot {
                message: format!("failed to create snapshot directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(|e| StoreError::Snapshot {
            message: format!("failed to serialize snapshot: {}", e),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| StoreError::Snapshot {
            message: format!("failed to write snapshot file: {}", e),
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::Snapshot {
            message: format!("failed to replace snapshot file: {}", e),
        })?;

        Ok(())
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
