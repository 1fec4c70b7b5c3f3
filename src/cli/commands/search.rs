//! Search command - query a saved index.

use crate::Settings;
use crate::cli::{emit, fail};
use crate::display::hits_table;
use crate::index::SectionKind;
use crate::io::{EntityType, Envelope, ExitCode};
use crate::query::SearchQuery;
use crate::storage::{IndexStore, StorageError};
use std::path::PathBuf;

pub struct SearchArgs {
    pub term: String,
    pub dir: Option<PathBuf>,
    pub section: SectionKind,
    pub limit: Option<usize>,
    pub scope: Option<String>,
}

pub fn run(args: SearchArgs, settings: &Settings, json: bool) -> anyhow::Result<ExitCode> {
    let dir = args.dir.unwrap_or_else(|| settings.output_dir());
    let loaded = match IndexStore::new(&dir).load() {
        Ok(loaded) => loaded,
        Err(e @ StorageError::NotFound(_)) => {
            return fail(json, ExitCode::NotFound, e, Some("Run 'doxsearch index' first"));
        }
        Err(e) => return fail(json, ExitCode::from(&e), e, None),
    };

    let mut query = SearchQuery::new(args.term.clone()).with_section(args.section);
    if let Some(scope) = args.scope {
        query = query.with_scope(scope);
    }
    let limit = args.limit.unwrap_or(settings.search.default_limit);

    let mut hits = loaded.index.search(&query);
    let total = hits.len();
    hits.truncate(limit);

    if hits.is_empty() {
        let message = format!("No {} entries match '{}'", args.section, args.term);
        if json {
            let envelope: Envelope<()> = Envelope::not_found(message).with_query(args.term);
            return emit(envelope, ExitCode::NotFound);
        }
        eprintln!("{message}");
        return Ok(ExitCode::NotFound);
    }

    if json {
        let count = hits.len();
        let envelope = Envelope::success(hits)
            .with_entity_type(EntityType::SearchHit)
            .with_count(count)
            .with_query(args.term)
            .with_truncated(total > count);
        return emit(envelope, ExitCode::Success);
    }

    println!("{}", hits_table(&hits));
    if total > hits.len() {
        eprintln!("Showing {} of {total} matches", hits.len());
    }
    Ok(ExitCode::Success)
}
