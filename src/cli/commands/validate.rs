//! Validate command - structural check of an index directory.

use crate::Settings;
use crate::cli::{emit, fail};
use crate::display::{heading, issues_table, stats_table};
use crate::io::{EntityType, Envelope, ExitCode};
use crate::storage::{IndexStore, StorageError};
use crate::validate::validate;
use std::path::PathBuf;

pub fn run(dir: Option<PathBuf>, settings: &Settings, json: bool) -> anyhow::Result<ExitCode> {
    let dir = dir.unwrap_or_else(|| settings.output_dir());
    let loaded = match IndexStore::new(&dir).load() {
        Ok(loaded) => loaded,
        Err(e @ StorageError::NotFound(_)) => {
            return fail(json, ExitCode::NotFound, e, Some("Run 'doxsearch index' first"));
        }
        Err(e) => return fail(json, ExitCode::from(&e), e, None),
    };

    let mut report = validate(&loaded.index, loaded.manifest.as_ref());
    for failure in &loaded.failures {
        let file = failure
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| failure.path.display().to_string());
        report.add_unreadable(file, failure.reason.clone());
    }

    let exit = if report.is_clean() {
        ExitCode::Success
    } else {
        ExitCode::ValidationFailed
    };

    if json {
        let count = report.issues.len();
        let message = if report.is_clean() {
            "No issues found".to_string()
        } else {
            format!("{count} issues found")
        };
        let envelope = Envelope::success(report)
            .with_entity_type(EntityType::Issue)
            .with_count(count)
            .with_message(message)
            .with_exit(exit);
        return emit(envelope, exit);
    }

    println!("{}", heading(&format!("Index at {}", dir.display())));
    println!("{}", stats_table(&report.stats));
    if report.is_clean() {
        println!("No issues found");
    } else {
        println!("{}", issues_table(&report.issues));
        println!("{} issues found", report.issues.len());
    }
    Ok(exit)
}
