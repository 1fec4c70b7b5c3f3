//! Prefix search over a [`SearchIndex`], with the same rules as the
//! documentation search box: normalize the term, open the bucket of its
//! first character, keep records whose stem starts with the term.

use crate::index::{SearchIndex, SearchRecord, SectionKind, bucket_char, search_stem};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub section: SectionKind,
    pub limit: Option<usize>,
    /// Keep only targets whose scope label contains this text (case-insensitive).
    pub scope_filter: Option<String>,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            section: SectionKind::All,
            limit: None,
            scope_filter: None,
        }
    }

    pub fn with_section(mut self, section: SectionKind) -> Self {
        self.section = section;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope_filter = Some(scope.into()).filter(|s: &String| !s.is_empty());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub section: SectionKind,
    /// Bucket file the record lives in, `all_4.js`.
    pub bucket_file: String,
    pub record: SearchRecord,
    /// The stem equals the normalized term.
    pub exact: bool,
}

impl SearchIndex {
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchHit> {
        let stem = search_stem(query.term.trim());
        let Some(letter) = bucket_char(query.term.trim()) else {
            return Vec::new();
        };
        let Some(bucket) = self.bucket_for(query.section, letter) else {
            return Vec::new();
        };
        let bucket_file = bucket.file_name(query.section);
        let scope_filter = query.scope_filter.as_deref().map(str::to_lowercase);

        let mut hits: Vec<SearchHit> = bucket
            .records
            .iter()
            .filter(|record| record.stem().starts_with(&stem))
            .filter_map(|record| {
                let mut record = record.clone();
                if let Some(filter) = &scope_filter {
                    record
                        .targets
                        .retain(|t| t.scope.to_lowercase().contains(filter.as_str()));
                    if record.targets.is_empty() {
                        return None;
                    }
                }
                Some(SearchHit {
                    section: query.section,
                    bucket_file: bucket_file.clone(),
                    exact: record.stem() == stem,
                    record,
                })
            })
            .collect();

        // stable: bucket order is kept within each group
        hits.sort_by_key(|hit| !hit.exact);
        if let Some(limit) = query.limit {
            hits.truncate(limit);
        }
        hits
    }
}
