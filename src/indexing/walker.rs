//! File system walker for discovering files to index
//!
//! This module provides directory traversal with support for:
//! - .gitignore rules
//! - `.doxsearchignore` files
//! - Custom ignore patterns from configuration
//! - Language filtering by configured extensions

use crate::Settings;
use crate::config::IGNORE_FILE;
use crate::parsing::Language;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Walks directories to find files to index
#[derive(Debug, Clone)]
pub struct FileWalker {
    settings: Arc<Settings>,
}

impl FileWalker {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Walk a directory (or a single file) and yield indexable files with
    /// their language.
    pub fn walk(&self, root: &Path) -> impl Iterator<Item = (PathBuf, Language)> + use<> {
        let mut builder = WalkBuilder::new(root);

        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .require_git(false)
            .add_custom_ignore_filename(IGNORE_FILE);

        // Configured patterns become exclusions (`!` prefix) on top of the ignore files
        let mut override_builder = ignore::overrides::OverrideBuilder::new(root);
        for pattern in &self.settings.indexing.ignore_patterns {
            if let Err(e) = override_builder.add(&format!("!{pattern}")) {
                tracing::warn!("[walker] invalid ignore pattern '{pattern}': {e}");
            }
        }
        match override_builder.build() {
            Ok(overrides) => {
                builder.overrides(overrides);
            }
            Err(e) => tracing::warn!("[walker] ignore patterns not applied: {e}"),
        }

        let settings = self.settings.clone();
        builder
            .build()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .filter_map(move |entry| {
                let path = entry.path();
                let hidden = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with('.'));
                if hidden {
                    return None;
                }
                Language::from_path_with(path, &settings).map(|lang| (path.to_path_buf(), lang))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn walk_names(settings: Settings, root: &Path) -> Vec<String> {
        let walker = FileWalker::new(Arc::new(settings));
        let mut names: Vec<String> = walker
            .walk(root)
            .map(|(path, _)| {
                path.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_walk_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("include")).unwrap();
        fs::write(root.join("include/Bulk.hpp"), "class Bulk {};").unwrap();
        fs::write(root.join("main.cpp"), "int main() {}").unwrap();
        fs::write(root.join("fasp.c"), "int f(void);").unwrap();
        fs::write(root.join("README.md"), "# Test").unwrap();
        fs::write(root.join("build.py"), "pass").unwrap();

        let names = walk_names(Settings::default(), root);
        assert_eq!(names, vec!["README.md", "fasp.c", "include/Bulk.hpp", "main.cpp"]);
    }

    #[test]
    fn test_languages_detected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("fasp.c"), "").unwrap();

        let walker = FileWalker::new(Arc::new(Settings::default()));
        let found: Vec<_> = walker.walk(root).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1, Language::C);
    }

    #[test]
    fn test_ignore_hidden_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join(".hidden.cpp"), "").unwrap();
        fs::write(root.join("visible.cpp"), "").unwrap();

        assert_eq!(walk_names(Settings::default(), root), vec!["visible.cpp"]);
    }

    #[test]
    fn test_gitignore_and_custom_ignore_respected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join(".gitignore"), "ignored.cpp\n").unwrap();
        fs::write(root.join(IGNORE_FILE), "generated.hpp\n").unwrap();
        fs::write(root.join("ignored.cpp"), "").unwrap();
        fs::write(root.join("generated.hpp"), "").unwrap();
        fs::write(root.join("included.cpp"), "").unwrap();

        assert_eq!(walk_names(Settings::default(), root), vec!["included.cpp"]);
    }

    #[test]
    fn test_configured_patterns_and_disabled_languages() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("external")).unwrap();
        fs::write(root.join("external/lib.hpp"), "").unwrap();
        fs::write(root.join("Rock.hpp"), "").unwrap();
        fs::write(root.join("notes.md"), "").unwrap();

        let mut settings = Settings::default();
        settings.indexing.ignore_patterns = vec!["external/**".to_string()];
        settings.languages.get_mut("markdown").unwrap().enabled = false;

        assert_eq!(walk_names(settings, root), vec!["Rock.hpp"]);
    }
}
