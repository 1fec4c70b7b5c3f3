//! Parse command - print extracted symbols as JSONL.

use crate::Settings;
use crate::cli::{emit, fail};
use crate::indexing::DocIndexer;
use crate::io::{EntityType, Envelope, ExitCode};
use std::path::Path;
use std::sync::Arc;

pub fn run(file: &Path, settings: Settings, json: bool) -> anyhow::Result<ExitCode> {
    let indexer = DocIndexer::new(Arc::new(settings));
    let parsed = match indexer.parse_file(file) {
        Ok(parsed) => parsed,
        Err(e) => return fail(json, ExitCode::from(&e), e, None),
    };

    let exit = if parsed.symbols.is_empty() {
        ExitCode::NotFound
    } else {
        ExitCode::Success
    };

    if json {
        let count = parsed.symbols.len();
        let envelope = Envelope::success(parsed)
            .with_entity_type(EntityType::Symbol)
            .with_count(count)
            .with_exit(exit);
        return emit(envelope, exit);
    }

    for symbol in &parsed.symbols {
        println!("{}", serde_json::to_string(symbol)?);
    }
    if let Some(doc) = &parsed.file_doc {
        tracing::debug!("[parse] file doc: {doc}");
    }
    Ok(exit)
}
