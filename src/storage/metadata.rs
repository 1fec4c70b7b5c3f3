//! Metadata written next to the generated buckets

use super::error::{StorageError, StorageResult};
use crate::index::SearchIndex;
use crate::utils::get_utc_timestamp;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const METADATA_FILE: &str = "index.meta";

/// Summary of the last build, stored as `index.meta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Version of the metadata format
    pub version: u32,

    /// Records in the `all` section
    pub record_count: usize,

    /// Targets in the `all` section
    pub target_count: usize,

    /// Number of indexed files
    pub file_count: usize,

    /// Bucket count per section name, in manifest order
    pub sections: IndexMap<String, usize>,

    /// Build timestamp (UTC seconds)
    pub last_modified: u64,
}

impl IndexMetadata {
    pub fn new(index: &SearchIndex, file_count: usize) -> Self {
        Self {
            version: 1,
            record_count: index.record_count(),
            target_count: index.target_count(),
            file_count,
            sections: index
                .sections
                .iter()
                .map(|s| (s.kind.name().to_string(), s.buckets.len()))
                .collect(),
            last_modified: get_utc_timestamp(),
        }
    }

    pub fn save(&self, dir: &Path) -> StorageResult<()> {
        let path = dir.join(METADATA_FILE);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| StorageError::Metadata(format!("Failed to serialize metadata: {e}")))?;
        fs::write(&path, json).map_err(|e| StorageError::io(path, e))
    }

    /// Load `index.meta`; `None` when the directory has none.
    pub fn load(dir: &Path) -> StorageResult<Option<Self>> {
        let path = dir.join(METADATA_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::Metadata(format!("Failed to parse {}: {e}", path.display())))
    }
}
