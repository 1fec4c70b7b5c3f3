//! Indexed files and the pages they map to.

use crate::index::anchor::file_page;
use crate::parsing::Language;
use crate::types::FileId;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub id: FileId,
    pub path: PathBuf,
    /// Name shown in scope labels: the base name, or the relative path when
    /// another indexed file shares the base name.
    pub display_name: String,
    /// Documentation page of the file, `DenseMat_8cpp.html`.
    pub page: String,
    pub language: Language,
}

#[derive(Debug, Clone, Default)]
pub struct FileRegistry {
    entries: Vec<FileEntry>,
}

impl FileRegistry {
    /// Register files in the given order; ids start at 1.
    pub fn from_paths(paths: Vec<(PathBuf, Language)>) -> Self {
        Self::from_paths_under(paths, &[])
    }

    /// Like [`from_paths`](Self::from_paths), but colliding files are named by
    /// their path below the first of `bases` that contains them, so an
    /// absolute index root never leaks into labels or page names.
    pub fn from_paths_under(paths: Vec<(PathBuf, Language)>, bases: &[PathBuf]) -> Self {
        let mut base_counts: HashMap<String, usize> = HashMap::new();
        for (path, _) in &paths {
            *base_counts.entry(base_name(path)).or_default() += 1;
        }

        let entries = paths
            .into_iter()
            .enumerate()
            .filter_map(|(i, (path, language))| {
                let id = FileId::new(i as u32 + 1)?;
                let base = base_name(&path);
                let display_name = if base_counts.get(&base).copied().unwrap_or(0) > 1 {
                    let relative = bases
                        .iter()
                        .find_map(|b| path.strip_prefix(b).ok())
                        .unwrap_or(&path);
                    slash_path(relative)
                } else {
                    base
                };
                let page = file_page(&display_name);
                Some(FileEntry {
                    id,
                    path,
                    display_name,
                    page,
                    language,
                })
            })
            .collect();

        Self { entries }
    }

    pub fn get(&self, id: FileId) -> Option<&FileEntry> {
        self.entries.get(id.value() as usize - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| slash_path(path))
}

fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
