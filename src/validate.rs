//! Structural checks of a search index.
//!
//! Works on anything that produced a [`SearchIndex`]: a fresh build or a
//! directory loaded back from disk (optionally with its `searchdata.js`).

use crate::codec::SearchDataManifest;
use crate::index::{SearchBucket, SearchIndex, SectionKind, search_stem, split_key};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    EmptyLabel,
    NoTargets,
    BadUrl { url: String },
    MalformedKey,
    OrdinalOutOfSequence { expected: usize, found: usize },
    StemMismatch { expected: String },
    WrongBucket { letter: char },
    UnsortedStem { previous: String },
    LetterOrder { previous: char, letter: char },
    ManifestMismatch { expected: usize, found: usize },
    Unreadable { reason: String },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "record has an empty label"),
            Self::NoTargets => write!(f, "record has no targets"),
            Self::BadUrl { url } => write!(f, "target url '{url}' does not name an .html page"),
            Self::MalformedKey => write!(f, "key has no numeric ordinal suffix"),
            Self::OrdinalOutOfSequence { expected, found } => {
                write!(f, "ordinal {found} where {expected} was expected")
            }
            Self::StemMismatch { expected } => {
                write!(f, "stem does not match the label, expected '{expected}'")
            }
            Self::WrongBucket { letter } => write!(f, "stem does not start with bucket letter '{letter}'"),
            Self::UnsortedStem { previous } => write!(f, "stem sorts before previous stem '{previous}'"),
            Self::LetterOrder { previous, letter } => {
                write!(f, "bucket letter '{letter}' does not follow '{previous}'")
            }
            Self::ManifestMismatch { expected, found } => {
                write!(f, "manifest lists {found} letters for {expected} buckets")
            }
            Self::Unreadable { reason } => write!(f, "{reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Bucket file (or `searchdata.js`) the issue was found in.
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{} [{key}]: {}", self.file, self.kind),
            None => write!(f, "{}: {}", self.file, self.kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionStats {
    pub section: SectionKind,
    pub buckets: usize,
    pub records: usize,
    pub targets: usize,
    /// Records with more than one target.
    pub overloaded: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
    pub stats: Vec<SectionStats>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Record a file that could not be loaded at all.
    pub fn add_unreadable(&mut self, file: impl Into<String>, reason: impl Into<String>) {
        self.issues.push(Issue {
            file: file.into(),
            key: None,
            kind: IssueKind::Unreadable {
                reason: reason.into(),
            },
        });
    }
}

pub fn validate(index: &SearchIndex, manifest: Option<&SearchDataManifest>) -> ValidationReport {
    let mut report = ValidationReport::default();

    for section in &index.sections {
        let mut previous_letter: Option<char> = None;
        for bucket in &section.buckets {
            let file = bucket.file_name(section.kind);
            report.issues.extend(validate_bucket(&file, bucket));

            if let Some(letter) = bucket.letter {
                if let Some(previous) = previous_letter.filter(|&p| p >= letter) {
                    report.issues.push(Issue {
                        file: file.clone(),
                        key: None,
                        kind: IssueKind::LetterOrder { previous, letter },
                    });
                }
                previous_letter = Some(letter);
            }
        }

        if let Some(manifest) = manifest {
            let found = manifest
                .section(section.kind.name())
                .map_or(0, |s| s.letters.chars().count());
            if found != section.buckets.len() {
                report.issues.push(Issue {
                    file: crate::codec::MANIFEST_FILE.to_string(),
                    key: Some(section.kind.name().to_string()),
                    kind: IssueKind::ManifestMismatch {
                        expected: section.buckets.len(),
                        found,
                    },
                });
            }
        }

        let records: Vec<_> = section.records().collect();
        report.stats.push(SectionStats {
            section: section.kind,
            buckets: section.buckets.len(),
            records: records.len(),
            targets: records.iter().map(|r| r.targets.len()).sum(),
            overloaded: records.iter().filter(|r| r.is_overloaded()).count(),
        });
    }

    report
}

/// Checks that need nothing but the bucket itself.
pub fn validate_bucket(file: &str, bucket: &SearchBucket) -> Vec<Issue> {
    let mut issues = Vec::new();
    let wanted_prefix = bucket.letter_stem();
    let mut previous_stem: Option<&str> = None;

    for (position, record) in bucket.records.iter().enumerate() {
        let mut push = |kind| {
            issues.push(Issue {
                file: file.to_string(),
                key: Some(record.key.clone()),
                kind,
            })
        };

        if record.label.is_empty() {
            push(IssueKind::EmptyLabel);
        }
        if record.targets.is_empty() {
            push(IssueKind::NoTargets);
        }
        for target in &record.targets {
            if target.url.is_empty() || !target.page().ends_with(".html") {
                push(IssueKind::BadUrl {
                    url: target.url.clone(),
                });
            }
        }

        let Some((stem, ordinal)) = split_key(&record.key) else {
            push(IssueKind::MalformedKey);
            continue;
        };
        if ordinal != position {
            push(IssueKind::OrdinalOutOfSequence {
                expected: position,
                found: ordinal,
            });
        }

        let expected = search_stem(&record.label);
        if expected != stem {
            push(IssueKind::StemMismatch { expected });
        }

        if let (Some(prefix), Some(letter)) = (&wanted_prefix, bucket.letter)
            && !stem.starts_with(prefix.as_str())
        {
            push(IssueKind::WrongBucket { letter });
        }

        if let Some(previous) = previous_stem.filter(|&p| p > stem) {
            push(IssueKind::UnsortedStem {
                previous: previous.to_string(),
            });
        }
        previous_stem = Some(stem);
    }

    issues
}
