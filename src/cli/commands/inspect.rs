//! Inspect command - dump one bucket file.

use crate::cli::{emit, fail};
use crate::display::{issues_table, records_table};
use crate::index::SearchBucket;
use crate::index::bucket::parse_bucket_file_name;
use crate::io::{EntityType, Envelope, ExitCode};
use crate::storage::load_bucket;
use crate::validate::validate_bucket;
use serde_json::json;
use std::path::Path;

pub fn run(file: &Path, json: bool) -> anyhow::Result<ExitCode> {
    let records = match load_bucket(file) {
        Ok(records) => records,
        Err(e) => return fail(json, ExitCode::from(&e), e, None),
    };

    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parsed_name = parse_bucket_file_name(&file_name);

    let mut bucket = SearchBucket::new(parsed_name.map_or(0, |(_, index)| index), None, records);
    bucket.letter = bucket.infer_letter();
    let issues = validate_bucket(&file_name, &bucket);

    if json {
        let count = bucket.records.len();
        let data = json!({
            "file": file,
            "section": parsed_name.map(|(section, _)| section),
            "letter": bucket.letter,
            "records": bucket.records,
            "issues": issues,
        });
        let envelope = Envelope::success(data)
            .with_entity_type(EntityType::Record)
            .with_count(count);
        return emit(envelope, ExitCode::Success);
    }

    println!("{}", records_table(&bucket.records));
    println!("{} records in {}", bucket.records.len(), file.display());
    if !issues.is_empty() {
        eprintln!("{}", issues_table(&issues));
    }
    Ok(ExitCode::Success)
}
