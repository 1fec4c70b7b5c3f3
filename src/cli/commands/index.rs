//! Index command - build and save the search index.

use crate::Settings;
use crate::cli::{emit, fail};
use crate::display::{heading, stats_table};
use crate::indexing::DocIndexer;
use crate::io::{EntityType, Envelope, ExitCode};
use crate::parsing::Language;
use crate::storage::IndexStore;
use crate::validate::validate;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the index command.
pub struct IndexArgs {
    pub paths: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub threads: Option<usize>,
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct PlannedFile {
    path: PathBuf,
    language: Language,
}

#[derive(Debug, Serialize)]
struct IndexSummary {
    output: PathBuf,
    files: usize,
    symbols: usize,
    records: usize,
    targets: usize,
    sections: IndexMap<String, usize>,
    skipped: Vec<PathBuf>,
}

pub fn run(args: IndexArgs, mut settings: Settings, json: bool) -> anyhow::Result<ExitCode> {
    let IndexArgs {
        paths,
        output,
        threads,
        dry_run,
    } = args;

    if let Some(threads) = threads {
        settings.indexing.parallel_threads = threads;
    }
    let output = output.unwrap_or_else(|| settings.output_dir());
    let indexer = DocIndexer::new(Arc::new(settings));

    if dry_run {
        let files: Vec<PlannedFile> = indexer
            .discover(&paths)
            .into_iter()
            .map(|(path, language)| PlannedFile { path, language })
            .collect();
        let exit = if files.is_empty() {
            ExitCode::NotFound
        } else {
            ExitCode::Success
        };

        if json {
            let count = files.len();
            let envelope = Envelope::success(files)
                .with_entity_type(EntityType::File)
                .with_count(count)
                .with_message("Dry run: nothing written")
                .with_exit(exit);
            return emit(envelope, exit);
        }
        for file in &files {
            println!("{}\t{}", file.language, file.path.display());
        }
        eprintln!("{} files would be indexed", files.len());
        return Ok(exit);
    }

    let start = Instant::now();
    let outcome = match indexer.index_paths(&paths) {
        Ok(outcome) => outcome,
        Err(e) => return fail(json, ExitCode::from(&e), e, None),
    };
    if outcome.files.is_empty() {
        return fail(
            json,
            ExitCode::NotFound,
            "No indexable files found",
            Some("Check the paths and the [languages] settings"),
        );
    }

    let store = IndexStore::new(&output);
    let metadata = match store.save(&outcome.index, outcome.files.len()) {
        Ok(metadata) => metadata,
        Err(e) => return fail(json, ExitCode::from(&e), e, None),
    };
    let elapsed = start.elapsed();

    if json {
        let summary = IndexSummary {
            output,
            files: outcome.files.len(),
            symbols: outcome.symbols.len(),
            records: metadata.record_count,
            targets: metadata.target_count,
            sections: metadata.sections,
            skipped: outcome.skipped,
        };
        let envelope = Envelope::success(summary)
            .with_entity_type(EntityType::IndexSummary)
            .with_duration_ms(elapsed.as_millis() as u64);
        return emit(envelope, ExitCode::Success);
    }

    println!("{}", heading("Index written"));
    println!("{}", stats_table(&validate(&outcome.index, None).stats));
    println!(
        "Indexed {} files ({} symbols) into {} in {:.2}s",
        outcome.files.len(),
        outcome.symbols.len(),
        output.display(),
        elapsed.as_secs_f64()
    );
    for path in &outcome.skipped {
        eprintln!("Skipped unreadable file: {}", path.display());
    }
    Ok(ExitCode::Success)
}
