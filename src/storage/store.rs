//! Directory of generated search files: `<section>_<n>.js`, `searchdata.js`
//! and `index.meta`.

use super::error::{StorageError, StorageResult};
use super::metadata::IndexMetadata;
use crate::codec::{
    MANIFEST_FILE, SearchDataManifest, parse_bucket, parse_search_data, write_bucket,
    write_search_data,
};
use crate::index::bucket::parse_bucket_file_name;
use crate::index::{SearchBucket, SearchIndex, SearchSection, SectionKind};
use crate::log_event;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A file that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything read back from an index directory.
#[derive(Debug, Default)]
pub struct LoadedIndex {
    pub index: SearchIndex,
    pub manifest: Option<SearchDataManifest>,
    pub metadata: Option<IndexMetadata>,
    /// Files skipped because they were unreadable or malformed.
    pub failures: Vec<LoadFailure>,
}

#[derive(Debug, Clone)]
pub struct IndexStore {
    dir: PathBuf,
}

impl IndexStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// True when the directory holds a manifest or at least one bucket.
    pub fn exists(&self) -> bool {
        self.dir.join(MANIFEST_FILE).is_file() || !self.bucket_files().unwrap_or_default().is_empty()
    }

    /// Write every bucket, then the manifest, then `index.meta`.
    pub fn save(&self, index: &SearchIndex, file_count: usize) -> StorageResult<IndexMetadata> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let stale = self.bucket_files()?;
        for (path, _, _) in &stale {
            fs::remove_file(path).map_err(|e| StorageError::io(path, e))?;
        }

        let mut written = 0usize;
        for section in &index.sections {
            for bucket in &section.buckets {
                let path = self.dir.join(bucket.file_name(section.kind));
                fs::write(&path, write_bucket(&bucket.records)).map_err(|e| StorageError::io(&path, e))?;
                written += 1;
            }
        }

        let manifest = self.dir.join(MANIFEST_FILE);
        fs::write(&manifest, write_search_data(index)).map_err(|e| StorageError::io(&manifest, e))?;

        let metadata = IndexMetadata::new(index, file_count);
        metadata.save(&self.dir)?;

        log_event!(
            "store",
            "saved",
            "{written} buckets ({} stale removed) in {}",
            stale.len(),
            self.dir.display()
        );
        Ok(metadata)
    }

    /// Load the directory, skipping files that fail to read or decode.
    pub fn load(&self) -> StorageResult<LoadedIndex> {
        if !self.dir.is_dir() {
            return Err(StorageError::NotFound(self.dir.clone()));
        }

        let mut loaded = LoadedIndex::default();

        let manifest_path = self.dir.join(MANIFEST_FILE);
        if manifest_path.is_file() {
            match read(&manifest_path).and_then(|text| {
                parse_search_data(&text).map_err(|source| StorageError::Codec {
                    path: manifest_path.clone(),
                    source,
                })
            }) {
                Ok(manifest) => loaded.manifest = Some(manifest),
                Err(e) => loaded.fail(&manifest_path, e),
            }
        }

        match IndexMetadata::load(&self.dir) {
            Ok(metadata) => loaded.metadata = metadata,
            Err(e) => tracing::warn!("[store] ignoring metadata: {e}"),
        }

        let files = self.bucket_files()?;
        if files.is_empty() && loaded.manifest.is_none() {
            return Err(StorageError::NotFound(self.dir.clone()));
        }

        let mut sections: BTreeMap<SectionKind, Vec<SearchBucket>> = BTreeMap::new();
        for (path, kind, index) in files {
            let records = match load_bucket(&path) {
                Ok(records) => records,
                Err(e) => {
                    loaded.fail(&path, e);
                    continue;
                }
            };

            let mut bucket = SearchBucket::new(index, None, records);
            bucket.letter = loaded
                .manifest
                .as_ref()
                .and_then(|m| m.letter(kind.name(), index))
                .or_else(|| bucket.infer_letter());
            sections.entry(kind).or_default().push(bucket);
        }

        loaded.index = SearchIndex::new(
            sections
                .into_iter()
                .map(|(kind, mut buckets)| {
                    buckets.sort_by_key(|b| b.index);
                    SearchSection::new(kind, buckets)
                })
                .collect(),
        );

        log_event!(
            "store",
            "loaded",
            "{} records from {} ({} failures)",
            loaded.index.record_count(),
            self.dir.display(),
            loaded.failures.len()
        );
        Ok(loaded)
    }

    /// Bucket files in the directory, sorted by section and index.
    fn bucket_files(&self) -> StorageResult<Vec<(PathBuf, SectionKind, usize)>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(&self.dir, e)),
        };

        let mut files: Vec<(PathBuf, SectionKind, usize)> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                let (kind, index) = parse_bucket_file_name(name.to_str()?)?;
                Some((entry.path(), kind, index))
            })
            .collect();
        files.sort_by(|a, b| (a.1, a.2).cmp(&(b.1, b.2)));
        Ok(files)
    }
}

impl LoadedIndex {
    fn fail(&mut self, path: &Path, error: StorageError) {
        tracing::warn!("[store] skipping {}: {error}", path.display());
        self.failures.push(LoadFailure {
            path: path.to_path_buf(),
            reason: error.to_string(),
        });
    }
}

fn read(path: &Path) -> StorageResult<String> {
    fs::read_to_string(path).map_err(|e| StorageError::io(path, e))
}

/// Read and decode a single bucket file; errors are returned, not skipped.
pub fn load_bucket(path: &Path) -> StorageResult<Vec<crate::index::SearchRecord>> {
    let text = read(path)?;
    parse_bucket(&text).map_err(|source| StorageError::Codec {
        path: path.to_path_buf(),
        source,
    })
}
