//! Sections and buckets of a search index.

use super::key::{letter_stem, search_stem};
use super::record::SearchRecord;
use crate::types::SymbolKind;
use serde::{Deserialize, Serialize};

/// A search category. Each section is written as its own set of buckets
/// (`all_0.js`, `classes_0.js`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    All,
    Classes,
    Namespaces,
    Files,
    Functions,
    Variables,
    Typedefs,
    Enums,
    EnumValues,
    Defines,
    Pages,
}

impl SectionKind {
    /// Sections in manifest order.
    pub const ALL: [SectionKind; 11] = [
        Self::All,
        Self::Classes,
        Self::Namespaces,
        Self::Files,
        Self::Functions,
        Self::Variables,
        Self::Typedefs,
        Self::Enums,
        Self::EnumValues,
        Self::Defines,
        Self::Pages,
    ];

    /// File prefix and manifest name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Classes => "classes",
            Self::Namespaces => "namespaces",
            Self::Files => "files",
            Self::Functions => "functions",
            Self::Variables => "variables",
            Self::Typedefs => "typedefs",
            Self::Enums => "enums",
            Self::EnumValues => "enumvalues",
            Self::Defines => "defines",
            Self::Pages => "pages",
        }
    }

    /// Human label for the search widget's section selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Classes => "Classes",
            Self::Namespaces => "Namespaces",
            Self::Files => "Files",
            Self::Functions => "Functions",
            Self::Variables => "Variables",
            Self::Typedefs => "Typedefs",
            Self::Enums => "Enumerations",
            Self::EnumValues => "Enumerator",
            Self::Defines => "Macros",
            Self::Pages => "Pages",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The dedicated section a symbol kind belongs to (besides `All`).
    pub fn for_symbol(kind: SymbolKind) -> SectionKind {
        match kind {
            SymbolKind::Class | SymbolKind::Struct | SymbolKind::Union => Self::Classes,
            SymbolKind::Namespace => Self::Namespaces,
            SymbolKind::File => Self::Files,
            SymbolKind::Function | SymbolKind::Method => Self::Functions,
            SymbolKind::Field | SymbolKind::Variable => Self::Variables,
            SymbolKind::Typedef => Self::Typedefs,
            SymbolKind::Enum => Self::Enums,
            SymbolKind::Enumerator => Self::EnumValues,
            SymbolKind::Define => Self::Defines,
            SymbolKind::Page => Self::Pages,
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(&s.to_lowercase()).ok_or_else(|| {
            let names: Vec<_> = Self::ALL.iter().map(|k| k.name()).collect();
            format!("unknown section '{s}', expected one of: {}", names.join(", "))
        })
    }
}

/// All records of a section starting with one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBucket {
    pub index: usize,
    /// First character shared by every record. Unknown for buckets loaded
    /// without a manifest and without records.
    pub letter: Option<char>,
    pub records: Vec<SearchRecord>,
}

impl SearchBucket {
    pub fn new(index: usize, letter: Option<char>, records: Vec<SearchRecord>) -> Self {
        Self {
            index,
            letter,
            records,
        }
    }

    pub fn file_name(&self, section: SectionKind) -> String {
        bucket_file_name(section, self.index)
    }

    /// Stem prefix shared by all records, if the letter is known.
    pub fn letter_stem(&self) -> Option<String> {
        self.letter.map(letter_stem)
    }

    /// Infer the letter from the first record's label.
    pub fn infer_letter(&self) -> Option<char> {
        self.records
            .first()
            .and_then(|r| r.label.chars().flat_map(char::to_lowercase).next())
    }
}

pub fn bucket_file_name(section: SectionKind, index: usize) -> String {
    format!("{}_{index}.js", section.name())
}

/// Parse `classes_12.js` into (Classes, 12).
pub fn parse_bucket_file_name(file_name: &str) -> Option<(SectionKind, usize)> {
    let stem = file_name.strip_suffix(".js")?;
    let (section, index) = stem.rsplit_once('_')?;
    let section = SectionKind::from_name(section)?;
    let index = index.parse().ok()?;
    Some((section, index))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSection {
    pub kind: SectionKind,
    pub buckets: Vec<SearchBucket>,
}

impl SearchSection {
    pub fn new(kind: SectionKind, buckets: Vec<SearchBucket>) -> Self {
        Self { kind, buckets }
    }

    /// Bucket letters in bucket order, as written to the manifest.
    pub fn letters(&self) -> String {
        self.buckets.iter().filter_map(|b| b.letter).collect()
    }

    pub fn record_count(&self) -> usize {
        self.buckets.iter().map(|b| b.records.len()).sum()
    }

    pub fn bucket_for(&self, letter: char) -> Option<&SearchBucket> {
        let wanted = letter_stem(letter);
        self.buckets.iter().find(|bucket| match bucket.letter {
            Some(l) => l == letter,
            None => bucket
                .records
                .first()
                .is_some_and(|r| r.stem().starts_with(&wanted)),
        })
    }

    pub fn records(&self) -> impl Iterator<Item = &SearchRecord> {
        self.buckets.iter().flat_map(|b| b.records.iter())
    }
}

/// A complete search index: every non-empty section in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    pub sections: Vec<SearchSection>,
}

impl SearchIndex {
    pub fn new(sections: Vec<SearchSection>) -> Self {
        Self { sections }
    }

    pub fn section(&self, kind: SectionKind) -> Option<&SearchSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn bucket_for(&self, kind: SectionKind, letter: char) -> Option<&SearchBucket> {
        self.section(kind)?.bucket_for(letter)
    }

    /// Records in the `All` section.
    pub fn record_count(&self) -> usize {
        self.section(SectionKind::All).map_or(0, |s| s.record_count())
    }

    pub fn target_count(&self) -> usize {
        self.section(SectionKind::All)
            .map_or(0, |s| s.records().map(|r| r.targets.len()).sum())
    }

    /// Exact label lookup in the `All` section.
    pub fn lookup(&self, label: &str) -> Vec<&SearchRecord> {
        let stem = search_stem(label);
        let Some(section) = self.section(SectionKind::All) else {
            return Vec::new();
        };
        section
            .records()
            .filter(|r| r.stem() == stem && r.label == label)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.record_count() == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::record::SearchTarget;

    fn record(key: &str, label: &str) -> SearchRecord {
        SearchRecord::new(key, label, vec![SearchTarget::new("../x.html", "")])
    }

    #[test]
    fn test_section_names_roundtrip() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!("Classes".parse::<SectionKind>(), Ok(SectionKind::Classes));
        assert!("widgets".parse::<SectionKind>().is_err());
    }

    #[test]
    fn test_bucket_file_names() {
        assert_eq!(bucket_file_name(SectionKind::All, 10), "all_10.js");
        assert_eq!(parse_bucket_file_name("all_10.js"), Some((SectionKind::All, 10)));
        assert_eq!(
            parse_bucket_file_name("enumvalues_3.js"),
            Some((SectionKind::EnumValues, 3))
        );
        assert_eq!(parse_bucket_file_name("searchdata.js"), None);
        assert_eq!(parse_bucket_file_name("all_x.js"), None);
    }

    #[test]
    fn test_section_lookup_by_letter() {
        let section = SearchSection::new(
            SectionKind::All,
            vec![
                SearchBucket::new(0, Some('_'), vec![record("_5fhidden_0", "_hidden")]),
                SearchBucket::new(1, None, vec![record("dx_0", "dx")]),
            ],
        );
        assert_eq!(section.bucket_for('_').map(|b| b.index), Some(0));
        assert_eq!(section.bucket_for('d').map(|b| b.index), Some(1));
        assert!(section.bucket_for('z').is_none());
        assert_eq!(section.letters(), "_");
    }

    #[test]
    fn test_symbol_sections() {
        assert_eq!(SectionKind::for_symbol(SymbolKind::Struct), SectionKind::Classes);
        assert_eq!(SectionKind::for_symbol(SymbolKind::Method), SectionKind::Functions);
        assert_eq!(SectionKind::for_symbol(SymbolKind::Field), SectionKind::Variables);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let index = SearchIndex::new(vec![SearchSection::new(
            SectionKind::All,
            vec![SearchBucket::new(
                0,
                Some('d'),
                vec![record("detailinfo_0", "DetailInfo"), record("detailinfo_1", "detailInfo")],
            )],
        )]);
        assert_eq!(index.lookup("detailInfo").len(), 1);
        assert_eq!(index.lookup("DetailInfo")[0].key, "detailinfo_0");
        assert_eq!(index.record_count(), 2);
        assert_eq!(index.target_count(), 2);
    }
}
