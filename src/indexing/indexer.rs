//! Parallel indexing: discover, parse, number, build.
//!
//! Files are parsed on a rayon pool with one parser per worker thread.
//! Ids are assigned afterwards in path order so repeated runs over the
//! same tree produce identical output.

use crate::Settings;
use crate::error::{IndexError, IndexResult};
use crate::index::anchor::escape_page_name;
use crate::index::{BuildOptions, IndexBuilder, SearchIndex};
use crate::indexing::{FileRegistry, FileWalker};
use crate::parsing::{Language, LanguageParser, ParsedSource, ParserFactory};
use crate::symbol::{RawSymbol, Symbol};
use crate::types::{FileId, Range, SymbolId, SymbolKind};
use crate::{debug_event, log_event};
use rayon::prelude::*;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Per-thread parsers; tree-sitter parsers are not shared across threads.
struct ParserCache {
    parsers: HashMap<Language, Box<dyn LanguageParser>>,
    factory: ParserFactory,
}

impl ParserCache {
    fn new(factory: ParserFactory) -> Self {
        Self {
            parsers: HashMap::new(),
            factory,
        }
    }

    fn get_or_create(&mut self, language: Language) -> IndexResult<&mut dyn LanguageParser> {
        if !self.parsers.contains_key(&language) {
            let parser = self.factory.create_parser(language)?;
            self.parsers.insert(language, parser);
        }
        self.parsers
            .get_mut(&language)
            .map(|parser| parser.as_mut() as &mut dyn LanguageParser)
            .ok_or_else(|| IndexError::General(format!("no parser for {language}")))
    }
}

thread_local! {
    static PARSER_CACHE: RefCell<Option<ParserCache>> = const { RefCell::new(None) };
}

/// Result of one indexing run.
#[derive(Debug)]
pub struct IndexOutcome {
    pub index: SearchIndex,
    pub files: FileRegistry,
    pub symbols: Vec<Symbol>,
    /// Files that could not be read.
    pub skipped: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct DocIndexer {
    settings: Arc<Settings>,
    walker: FileWalker,
    factory: ParserFactory,
}

impl DocIndexer {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            walker: FileWalker::new(settings.clone()),
            factory: ParserFactory::new(settings.clone()),
            settings,
        }
    }

    /// Builder options derived from the `[output]` and `[indexing]` settings.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            link_prefix: self.settings.output.link_prefix.clone(),
            extract_all: self.settings.indexing.extract_all,
            sections: self.settings.output.sections,
        }
    }

    /// Every indexable file under `paths`, sorted and without duplicates.
    pub fn discover(&self, paths: &[PathBuf]) -> Vec<(PathBuf, Language)> {
        let mut seen = BTreeSet::new();
        let mut files = Vec::new();
        for root in paths {
            for (path, language) in self.walker.walk(root) {
                let path = tidy_path(&path);
                if seen.insert(path.clone()) {
                    files.push((path, language));
                }
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));
        files
    }

    /// Directories that colliding file names are made relative to: the
    /// workspace root, then every absolute root being indexed.
    fn naming_bases(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        self.settings
            .workspace_root
            .iter()
            .cloned()
            .chain(paths.iter().filter(|p| p.is_absolute()).cloned())
            .collect()
    }

    /// Parse a single file on the calling thread.
    pub fn parse_file(&self, path: &Path) -> IndexResult<ParsedSource> {
        let language = Language::from_path_with(path, &self.settings).ok_or_else(|| {
            IndexError::General(format!("{} is not a recognised source file", path.display()))
        })?;
        let code = std::fs::read_to_string(path).map_err(|source| IndexError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut parser = self.factory.create_parser(language)?;
        Ok(parser.parse(&code))
    }

    pub fn index_paths(&self, paths: &[PathBuf]) -> IndexResult<IndexOutcome> {
        let files = self.discover(paths);
        log_event!("indexer", "discovered", "{} files", files.len());

        let threads = self.settings.indexing.parallel_threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;

        let factory = self.factory.clone();
        let parsed: Vec<IndexResult<ParsedSource>> = pool.install(|| {
            files
                .par_iter()
                .map(|(path, language)| parse_with_cache(path, *language, &factory))
                .collect()
        });

        let mut kept = Vec::new();
        let mut sources = Vec::new();
        let mut skipped = Vec::new();
        for ((path, language), result) in files.into_iter().zip(parsed) {
            match result {
                Ok(source) => {
                    kept.push((path, language));
                    sources.push(source);
                }
                Err(IndexError::FileRead { path, source }) => {
                    tracing::warn!("[indexer] skipping {}: {source}", path.display());
                    skipped.push(path);
                }
                Err(e) => return Err(e),
            }
        }

        let registry = FileRegistry::from_paths_under(kept, &self.naming_bases(paths));
        let symbols = number_symbols(&registry, sources);
        log_event!(
            "indexer",
            "parsed",
            "{} symbols from {} files ({} skipped)",
            symbols.len(),
            registry.len(),
            skipped.len()
        );

        let index = IndexBuilder::new(&registry, self.build_options()).build(&symbols);
        log_event!("indexer", "built", "{} records", index.record_count());

        Ok(IndexOutcome {
            index,
            files: registry,
            symbols,
            skipped,
        })
    }
}

fn parse_with_cache(path: &Path, language: Language, factory: &ParserFactory) -> IndexResult<ParsedSource> {
    let code = std::fs::read_to_string(path).map_err(|source| IndexError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug_event!("indexer", "parse", "{}", path.display());

    PARSER_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        let cache = cache.get_or_insert_with(|| ParserCache::new(factory.clone()));
        let parser = cache.get_or_create(language)?;
        Ok(parser.parse(&code))
    })
}

/// Assign ids in file order and add the per-file symbols: a `File` entry for
/// sources, and the page title and id for documents.
fn number_symbols(registry: &FileRegistry, sources: Vec<ParsedSource>) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    let mut next_id = 1u32;
    let mut push = |file_id: FileId, raw: RawSymbol, symbols: &mut Vec<Symbol>| {
        if let Some(id) = SymbolId::new(next_id) {
            symbols.push(Symbol::from_raw(id, file_id, raw));
            next_id += 1;
        }
    };

    for (entry, source) in registry.iter().zip(sources) {
        if entry.language.is_source() {
            let file = RawSymbol::new(entry.display_name.clone(), SymbolKind::File, Range::new(0, 0, 0, 0))
                .with_doc(source.file_doc.clone())
                .definition(true);
            push(entry.id, file, &mut symbols);
        }

        for mut raw in source.symbols {
            if raw.kind == SymbolKind::Page {
                fill_page(&mut raw, &entry.display_name);
            }
            push(entry.id, raw, &mut symbols);
        }
    }
    symbols
}

/// Untitled pages are named after the file; pages without an explicit id
/// get `md_<display name>`.
fn fill_page(raw: &mut RawSymbol, display_name: &str) {
    let stem = display_name
        .rsplit_once('.')
        .map_or(display_name, |(stem, _)| stem);
    if raw.name.is_empty() {
        raw.name = stem.rsplit('/').next().unwrap_or(stem).to_string();
    }
    if raw.page_id.is_none() {
        raw.page_id = Some(format!("md_{}", escape_page_name(stem)));
    }
}

/// Drop a leading `./` so paths compare and display consistently.
fn tidy_path(path: &Path) -> PathBuf {
    path.strip_prefix(".").map(Path::to_path_buf).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SectionKind;
    use std::fs;
    use tempfile::TempDir;

    fn settings() -> Arc<Settings> {
        let mut settings = Settings::default();
        settings.indexing.parallel_threads = 2;
        settings.indexing.ignore_patterns.clear();
        Arc::new(settings)
    }

    fn write_tree(root: &Path) {
        fs::create_dir_all(root.join("include")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(
            root.join("include/DenseMat.hpp"),
            "/// Dense product.\nvoid DaABpbC(int m, int n);\n\n/// Matrix holder.\nclass Matrix {\npublic:\n    int rows;\n};\n",
        )
        .unwrap();
        fs::write(
            root.join("src/DenseMat.cpp"),
            "void DaABpbC(int m, int n)\n{\n}\n",
        )
        .unwrap();
        fs::write(root.join("guide.md"), "# User Guide\n").unwrap();
    }

    #[test]
    fn test_index_paths() {
        let temp_dir = TempDir::new().unwrap();
        write_tree(temp_dir.path());

        let indexer = DocIndexer::new(settings());
        let outcome = indexer.index_paths(&[temp_dir.path().to_path_buf()]).unwrap();
        assert_eq!(outcome.files.len(), 3);
        assert!(outcome.skipped.is_empty());

        let records = outcome.index.lookup("DaABpbC");
        assert_eq!(records.len(), 1);
        let record = records[0];
        assert_eq!(record.targets.len(), 2);
        assert_eq!(record.targets[0].anchor(), record.targets[1].anchor());

        let guide = outcome.index.lookup("User Guide");
        assert_eq!(guide.len(), 1);
        assert_eq!(guide[0].targets[0].url, "../md_guide.html");

        assert!(!outcome.index.lookup("rows").is_empty());
        assert!(outcome.index.section(SectionKind::Classes).is_some());
    }

    #[test]
    fn test_colliding_names_relative_to_absolute_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("abs/proj");
        fs::create_dir_all(root.join("include")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("include/util.h"), "/// Clamp.\nint Clamp(int v);\n").unwrap();
        fs::write(root.join("src/util.h"), "/// Scale.\nint Scale(int v);\n").unwrap();
        assert!(root.is_absolute());

        let indexer = DocIndexer::new(settings());
        let outcome = indexer.index_paths(&[root.clone()]).unwrap();
        let names: Vec<&str> = outcome.files.iter().map(|f| f.display_name.as_str()).collect();
        assert_eq!(names, vec!["include/util.h", "src/util.h"]);

        let clamp = outcome.index.lookup("Clamp");
        assert_eq!(clamp[0].targets[0].scope, "include/util.h");
        assert!(clamp[0].targets[0].url.starts_with("../include_2util_8h.html#a"));
    }

    #[test]
    fn test_ids_are_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        write_tree(temp_dir.path());

        let indexer = DocIndexer::new(settings());
        let first = indexer.index_paths(&[temp_dir.path().to_path_buf()]).unwrap();
        let second = indexer.index_paths(&[temp_dir.path().to_path_buf()]).unwrap();
        assert_eq!(first.symbols, second.symbols);
        assert_eq!(first.index, second.index);
    }

    #[test]
    fn test_file_symbols_carry_file_doc() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("Rock.hpp"),
            "/*! \\file Rock.hpp\n *  \\brief Rock class declaration\n */\n\nclass Rock {};\n",
        )
        .unwrap();

        let indexer = DocIndexer::new(settings());
        let outcome = indexer.index_paths(&[temp_dir.path().to_path_buf()]).unwrap();
        let file = outcome
            .symbols
            .iter()
            .find(|s| s.kind == SymbolKind::File)
            .unwrap();
        assert_eq!(&*file.name, "Rock.hpp");
        assert_eq!(file.doc_comment.as_deref(), Some("Rock class declaration"));
    }

    #[test]
    fn test_parse_file_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "text").unwrap();

        let indexer = DocIndexer::new(settings());
        assert!(indexer.parse_file(&path).is_err());
    }

    #[test]
    fn test_fill_page_defaults() {
        let mut raw = RawSymbol::new("", SymbolKind::Page, Range::new(0, 0, 0, 0));
        fill_page(&mut raw, "docs/intro.md");
        assert_eq!(raw.name, "intro");
        assert_eq!(raw.page_id.as_deref(), Some("md_docs_2intro"));
    }
}
