//! Turns indexed symbols into a bucketed [`SearchIndex`].
//!
//! The build runs in four passes:
//! 1. merge symbols that describe the same entity (declaration in a header,
//!    definition in a source file) into one definition with its pages;
//! 2. group definitions by exact label, per section;
//! 3. pick scope labels, which depend on how many targets a record has;
//! 4. partition records into buckets by first character and assign keys.

use super::anchor::{compound_page, document_page, link, member_anchor};
use super::bucket::{SearchBucket, SearchIndex, SearchSection, SectionKind};
use super::key::{bucket_char, record_key, search_stem};
use super::record::{SearchRecord, SearchTarget};
use crate::indexing::FileRegistry;
use crate::symbol::Symbol;
use crate::types::{FileId, SymbolKind};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap, HashSet};

const NBSP: char = '\u{a0}';

/// Builder options, usually derived from settings.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Prefix of every url, relative to the directory the buckets live in.
    pub link_prefix: String,
    /// Keep undocumented symbols.
    pub extract_all: bool,
    /// Emit per-kind sections besides `all`.
    pub sections: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            link_prefix: "../".to_string(),
            extract_all: true,
            sections: true,
        }
    }
}

/// Merge key for symbols describing the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MergeKey {
    Compound(SymbolKind, String),
    File(FileId),
    Page(String),
    Member(String, Option<String>),
    FileMember(String, Option<String>),
}

/// One documented entity and the pages it is shown on.
#[derive(Debug)]
struct Definition<'s> {
    /// Representative symbol; the definition wins over declarations.
    primary: &'s Symbol,
    /// First declaration seen, whose parameter text labels the targets.
    declaration: Option<&'s Symbol>,
    pages: Vec<(FileId, String)>,
    anchor: Option<String>,
    order: (FileId, u32, u32),
}

impl<'s> Definition<'s> {
    fn absorb(&mut self, symbol: &'s Symbol, page: Option<String>) {
        if symbol.is_definition && !self.primary.is_definition {
            self.primary = symbol;
        }
        if !symbol.is_definition && self.declaration.is_none() {
            self.declaration = Some(symbol);
        }
        if let Some(page) = page {
            if !self.pages.iter().any(|(_, p)| *p == page) {
                self.pages.push((symbol.file_id, page));
            }
        }
        let order = order_of(symbol);
        if order < self.order {
            self.order = order;
        }
    }
}

fn order_of(symbol: &Symbol) -> (FileId, u32, u32) {
    (symbol.file_id, symbol.range.start_line, symbol.id.value())
}

/// A definition's targets before the scope label is chosen.
struct PendingTarget {
    url: String,
    single_scope: String,
    multi_scope: String,
}

pub struct IndexBuilder<'a> {
    files: &'a FileRegistry,
    options: BuildOptions,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(files: &'a FileRegistry, options: BuildOptions) -> Self {
        Self { files, options }
    }

    pub fn build(&self, symbols: &[Symbol]) -> SearchIndex {
        let kept = self.select(symbols);
        let scope_kinds = scope_kinds(&kept);
        let definitions = self.merge(&kept, &scope_kinds);

        let mut sections: BTreeMap<SectionKind, IndexMap<String, Vec<&Definition<'_>>>> =
            BTreeMap::new();
        for definition in &definitions {
            let label = definition.primary.name.to_string();
            let kind = definition.primary.kind;
            let dedicated = self.options.sections.then(|| SectionKind::for_symbol(kind));
            for section in std::iter::once(SectionKind::All).chain(dedicated) {
                sections
                    .entry(section)
                    .or_default()
                    .entry(label.clone())
                    .or_default()
                    .push(definition);
            }
        }

        let sections = sections
            .into_iter()
            .map(|(kind, groups)| {
                let records = groups
                    .into_iter()
                    .map(|(label, definitions)| (label, self.targets(&definitions)))
                    .collect();
                SearchSection::new(kind, bucketize(records))
            })
            .collect();

        SearchIndex::new(sections)
    }

    /// Apply the documented-only filter.
    fn select<'s>(&self, symbols: &'s [Symbol]) -> Vec<&'s Symbol> {
        if self.options.extract_all {
            return symbols.iter().collect();
        }

        let documented: Vec<&Symbol> = symbols
            .iter()
            .filter(|s| s.is_documented() || s.kind == SymbolKind::Page)
            .collect();

        let mut needed_scopes = HashSet::new();
        let mut needed_files = HashSet::new();
        for symbol in &documented {
            needed_files.insert(symbol.file_id);
            if let Some(scope) = &symbol.scope {
                // every enclosing scope must have a page to link to
                let mut current = scope.as_ref();
                loop {
                    needed_scopes.insert(current.to_string());
                    match current.rsplit_once("::") {
                        Some((outer, _)) => current = outer,
                        None => break,
                    }
                }
            }
        }

        symbols
            .iter()
            .filter(|s| {
                s.is_documented()
                    || s.kind == SymbolKind::Page
                    || (s.kind.is_scope() && needed_scopes.contains(&s.qualified_name()))
                    || (s.kind == SymbolKind::File && needed_files.contains(&s.file_id))
            })
            .collect()
    }

    fn merge<'s>(
        &self,
        symbols: &[&'s Symbol],
        scope_kinds: &HashMap<String, SymbolKind>,
    ) -> Vec<Definition<'s>> {
        let mut merged: IndexMap<MergeKey, Definition<'s>> = IndexMap::new();

        for &symbol in symbols {
            let (key, page, anchor) = match symbol.kind {
                SymbolKind::File => {
                    let page = self.files.get(symbol.file_id).map(|f| f.page.clone());
                    (MergeKey::File(symbol.file_id), page, None)
                }
                SymbolKind::Page => {
                    let id = symbol
                        .page_id
                        .as_deref()
                        .unwrap_or(&*symbol.name)
                        .to_string();
                    (MergeKey::Page(id.clone()), Some(document_page(&id)), None)
                }
                kind if kind.is_scope() => {
                    let qualified = symbol.qualified_name();
                    let page = compound_page(kind, &qualified);
                    // class and struct of the same name are the same entity
                    let kind = if kind == SymbolKind::Namespace {
                        SymbolKind::Namespace
                    } else {
                        SymbolKind::Class
                    };
                    (MergeKey::Compound(kind, qualified), page, None)
                }
                _ => {
                    // parameter names and defaults differ between declaration and definition
                    let signature = symbol.overload_signature().map(str::to_string);
                    let anchor = member_anchor(&symbol.qualified_name(), signature.as_deref());
                    match symbol.scope.as_deref() {
                        Some(scope) => {
                            let owner = scope_kinds.get(scope).copied().unwrap_or(SymbolKind::Class);
                            let page = compound_page(owner, scope);
                            (
                                MergeKey::Member(symbol.qualified_name(), signature),
                                page,
                                Some(anchor),
                            )
                        }
                        None => {
                            let page = self.files.get(symbol.file_id).map(|f| f.page.clone());
                            (
                                MergeKey::FileMember(symbol.name.to_string(), signature),
                                page,
                                Some(anchor),
                            )
                        }
                    }
                }
            };

            match merged.get_mut(&key) {
                Some(definition) => definition.absorb(symbol, page),
                None => {
                    let pages = page.map(|p| vec![(symbol.file_id, p)]).unwrap_or_default();
                    merged.insert(
                        key,
                        Definition {
                            primary: symbol,
                            declaration: (!symbol.is_definition).then_some(symbol),
                            pages,
                            anchor,
                            order: order_of(symbol),
                        },
                    );
                }
            }
        }

        let mut definitions: Vec<Definition<'s>> = merged
            .into_values()
            .filter(|d| !d.pages.is_empty())
            .collect();
        for definition in &mut definitions {
            definition.pages.sort_by(|a, b| a.1.cmp(&b.1));
        }
        definitions.sort_by_key(|d| d.order);
        definitions
    }

    /// Targets of one record, with scope labels chosen by target count.
    fn targets(&self, definitions: &[&Definition<'_>]) -> Vec<SearchTarget> {
        let pending: Vec<PendingTarget> = definitions
            .iter()
            .flat_map(|d| self.pending_targets(d))
            .collect();
        let multiple = pending.len() > 1;

        pending
            .into_iter()
            .map(|p| SearchTarget::new(p.url, if multiple { p.multi_scope } else { p.single_scope }))
            .collect()
    }

    fn pending_targets(&self, definition: &Definition<'_>) -> Vec<PendingTarget> {
        let symbol = definition.primary;
        let (single_scope, multi_scope) = match symbol.kind {
            SymbolKind::File => (String::new(), symbol.name.to_string()),
            SymbolKind::Page => (String::new(), symbol.name.to_string()),
            kind if kind.is_compound() => (
                symbol.scope.as_deref().unwrap_or_default().to_string(),
                symbol.qualified_name(),
            ),
            kind => {
                let arguments = if kind.is_callable() {
                    definition
                        .declaration
                        .unwrap_or(symbol)
                        .signature
                        .as_deref()
                        .unwrap_or("()")
                } else {
                    ""
                };
                match symbol.scope.as_deref() {
                    Some(scope) => (
                        scope.to_string(),
                        format!("{}{arguments}", symbol.qualified_name()),
                    ),
                    None => {
                        let file = self
                            .files
                            .get(symbol.file_id)
                            .map(|f| f.display_name.clone())
                            .unwrap_or_default();
                        (
                            file.clone(),
                            format!("{}{arguments}:{NBSP}{file}", symbol.name),
                        )
                    }
                }
            }
        };

        definition
            .pages
            .iter()
            .map(|(_, page)| PendingTarget {
                url: link(&self.options.link_prefix, page, definition.anchor.as_deref()),
                single_scope: single_scope.clone(),
                multi_scope: multi_scope.clone(),
            })
            .collect()
    }
}

/// Qualified name -> kind for everything that can own members.
fn scope_kinds(symbols: &[&Symbol]) -> HashMap<String, SymbolKind> {
    symbols
        .iter()
        .filter(|s| s.kind.is_scope())
        .map(|s| (s.qualified_name(), s.kind))
        .collect()
}

/// Partition labelled records by first character and assign keys.
///
/// Buckets are numbered in character order; records inside a bucket are
/// ordered by stem, then bytewise by label (`Dimens` before `dimens`), and
/// keyed `stem_position`.
pub fn bucketize(records: Vec<(String, Vec<SearchTarget>)>) -> Vec<SearchBucket> {
    let mut by_letter: BTreeMap<char, Vec<(String, String, Vec<SearchTarget>)>> = BTreeMap::new();
    for (label, targets) in records {
        let Some(letter) = bucket_char(&label) else {
            continue;
        };
        let stem = search_stem(&label);
        by_letter.entry(letter).or_default().push((stem, label, targets));
    }

    by_letter
        .into_iter()
        .enumerate()
        .map(|(index, (letter, mut entries))| {
            entries.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
            let records = entries
                .into_iter()
                .enumerate()
                .map(|(ordinal, (stem, label, targets))| {
                    SearchRecord::new(record_key(&stem, ordinal), label, targets)
                })
                .collect();
            SearchBucket::new(index, Some(letter), records)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexing::FileRegistry;
    use crate::parsing::Language;
    use crate::symbol::RawSymbol;
    use crate::types::{Range, SymbolId};
    use std::path::PathBuf;

    struct Fixture {
        files: FileRegistry,
        symbols: Vec<Symbol>,
    }

    impl Fixture {
        fn new(paths: &[&str]) -> Self {
            let files = FileRegistry::from_paths(
                paths
                    .iter()
                    .map(|p| (PathBuf::from(p), Language::Cpp))
                    .collect(),
            );
            let mut fixture = Self {
                files,
                symbols: Vec::new(),
            };
            let ids: Vec<FileId> = fixture.files.iter().map(|f| f.id).collect();
            for id in ids {
                let name = fixture.files.get(id).unwrap().display_name.clone();
                fixture.add(id.value(), RawSymbol::new(name, SymbolKind::File, Range::new(0, 0, 0, 0)));
            }
            fixture
        }

        fn add(&mut self, file: u32, raw: RawSymbol) {
            let id = SymbolId::new(self.symbols.len() as u32 + 1).unwrap();
            self.symbols
                .push(Symbol::from_raw(id, FileId::new(file).unwrap(), raw));
        }

        fn line(&self) -> Range {
            let line = self.symbols.len() as u32;
            Range::new(line, 0, line, 10)
        }

        fn build(&self) -> SearchIndex {
            IndexBuilder::new(&self.files, BuildOptions::default()).build(&self.symbols)
        }
    }

    fn all_records(index: &SearchIndex) -> Vec<&SearchRecord> {
        index.section(SectionKind::All).unwrap().records().collect()
    }

    #[test]
    fn test_class_and_member_records() {
        let mut fx = Fixture::new(&["include/ParamRead.hpp"]);
        let class = RawSymbol::new("ParamRead", SymbolKind::Class, fx.line()).definition(true);
        fx.add(1, class);
        let field = RawSymbol::new("param_Well", SymbolKind::Field, fx.line())
            .with_scope(Some("ParamRead".into()));
        fx.add(1, field);

        let index = fx.build();
        let class_record = &index.lookup("ParamRead")[0];
        assert_eq!(class_record.targets[0].url, "../classParamRead.html");
        assert_eq!(class_record.targets[0].scope, "");

        let field_record = &index.lookup("param_Well")[0];
        assert!(field_record.targets[0].url.starts_with("../classParamRead.html#a"));
        assert_eq!(field_record.targets[0].scope, "ParamRead");
        assert_eq!(field_record.stem(), "param_5fwell");

        let file_record = &index.lookup("ParamRead.hpp")[0];
        assert_eq!(file_record.targets[0].url, "../ParamRead_8hpp.html");
    }

    #[test]
    fn test_overloads_use_qualified_scope_labels() {
        let mut fx = Fixture::new(&["Mixture.hpp"]);
        for class in ["MixtureComp", "Bulk"] {
            let r = fx.line();
            fx.add(1, RawSymbol::new(class, SymbolKind::Class, r).definition(true));
            let r = fx.line();
            fx.add(
                1,
                RawSymbol::new("Flash", SymbolKind::Method, r)
                    .with_scope(Some(class.into()))
                    .with_signature("()"),
            );
        }

        let index = fx.build();
        let flash = index.lookup("Flash");
        assert_eq!(flash.len(), 1);
        let scopes: Vec<_> = flash[0].targets.iter().map(|t| t.scope.as_str()).collect();
        assert_eq!(scopes, vec!["MixtureComp::Flash()", "Bulk::Flash()"]);
        assert!(flash[0].targets[1].url.starts_with("../classBulk.html#a"));
    }

    #[test]
    fn test_declaration_and_definition_merge_into_one_target() {
        let mut fx = Fixture::new(&["Rock.cpp", "Rock.hpp"]);
        let r = fx.line();
        fx.add(2, RawSymbol::new("Rock_Linear", SymbolKind::Class, r).definition(true));
        let r = fx.line();
        fx.add(
            2,
            RawSymbol::new("CalPoro", SymbolKind::Method, r)
                .with_scope(Some("Rock_Linear".into()))
                .with_signature("(const OCP_DBL &P)"),
        );
        let r = fx.line();
        fx.add(
            1,
            RawSymbol::new("CalPoro", SymbolKind::Method, r)
                .with_scope(Some("Rock_Linear".into()))
                .with_signature("(const OCP_DBL &P)")
                .definition(true),
        );

        let index = fx.build();
        let record = &index.lookup("CalPoro")[0];
        assert_eq!(record.targets.len(), 1);
        assert_eq!(record.targets[0].scope, "Rock_Linear");
        assert!(record.targets[0].url.starts_with("../classRock__Linear.html#a"));
    }

    #[test]
    fn test_free_function_in_header_and_source_shares_anchor() {
        let mut fx = Fixture::new(&["DenseMat.cpp", "DenseMat.hpp"]);
        let r = fx.line();
        fx.add(2, RawSymbol::new("Daxpy", SymbolKind::Function, r).with_signature("(const int &n)"));
        let r = fx.line();
        fx.add(
            1,
            RawSymbol::new("Daxpy", SymbolKind::Function, r)
                .with_signature("(const int &n)")
                .definition(true),
        );

        let index = fx.build();
        let record = &index.lookup("Daxpy")[0];
        assert_eq!(record.targets.len(), 2);
        assert!(record.targets[0].url.starts_with("../DenseMat_8cpp.html#a"));
        assert!(record.targets[1].url.starts_with("../DenseMat_8hpp.html#a"));
        assert_eq!(record.targets[0].anchor(), record.targets[1].anchor());
        assert_eq!(record.targets[0].scope, "Daxpy(const int &n):\u{a0}DenseMat.cpp");
        assert_eq!(record.targets[1].scope, record.targets[0].scope);
    }

    #[test]
    fn test_source_page_listed_before_header_page() {
        // header discovered first, as `include/` sorts before `src/`
        let mut fx = Fixture::new(&["include/UtilInput.hpp", "src/UtilInput.cpp"]);
        let r = fx.line();
        fx.add(
            1,
            RawSymbol::new("DealDefault", SymbolKind::Function, r)
                .with_signature("(vector< string > &result)")
                .with_type_signature("(vector< string > &)"),
        );
        let r = fx.line();
        fx.add(
            2,
            RawSymbol::new("DealDefault", SymbolKind::Function, r)
                .with_signature("(vector< string > &result)")
                .with_type_signature("(vector< string > &)")
                .definition(true),
        );

        let index = fx.build();
        let record = &index.lookup("DealDefault")[0];
        assert_eq!(record.targets.len(), 2);
        assert!(record.targets[0].url.starts_with("../UtilInput_8cpp.html#a"));
        assert!(record.targets[1].url.starts_with("../UtilInput_8hpp.html#a"));
        assert_eq!(
            record.targets[0].scope,
            "DealDefault(vector< string > &result):\u{a0}UtilInput.cpp"
        );
    }

    #[test]
    fn test_renamed_parameters_and_defaults_merge() {
        let mut fx = Fixture::new(&["include/Bulk.hpp", "src/Bulk.cpp"]);
        let r = fx.line();
        fx.add(1, RawSymbol::new("Bulk", SymbolKind::Class, r).definition(true));
        let declarations = [
            ("InitFlash", "(const OCP_BOOL &flag=OCP_FALSE)", "(const OCP_BOOL &)"),
            ("Rename", "(int n)", "(int)"),
            ("Rename", "(double x)", "(double)"),
        ];
        for (name, signature, types) in declarations {
            let r = fx.line();
            fx.add(
                1,
                RawSymbol::new(name, SymbolKind::Method, r)
                    .with_scope(Some("Bulk".into()))
                    .with_signature(signature)
                    .with_type_signature(types),
            );
        }
        let definitions = [
            ("InitFlash", "(const OCP_BOOL &flag)", "(const OCP_BOOL &)"),
            ("Rename", "(int num)", "(int)"),
            ("Rename", "(double y)", "(double)"),
        ];
        for (name, signature, types) in definitions {
            let r = fx.line();
            fx.add(
                2,
                RawSymbol::new(name, SymbolKind::Method, r)
                    .with_scope(Some("Bulk".into()))
                    .with_signature(signature)
                    .with_type_signature(types)
                    .definition(true),
            );
        }

        let index = fx.build();
        let init = &index.lookup("InitFlash")[0];
        assert_eq!(init.targets.len(), 1);
        assert_eq!(init.targets[0].scope, "Bulk");

        // one target per overload, labelled with the declaration's text
        let rename = &index.lookup("Rename")[0];
        assert_eq!(rename.targets.len(), 2);
        assert_ne!(rename.targets[0].anchor(), rename.targets[1].anchor());
        let scopes: Vec<_> = rename.targets.iter().map(|t| t.scope.as_str()).collect();
        assert_eq!(scopes, vec!["Bulk::Rename(int n)", "Bulk::Rename(double x)"]);
    }

    #[test]
    fn test_single_file_member_scope_is_file_name() {
        let mut fx = Fixture::new(&["OCPConst.hpp"]);
        let r = fx.line();
        fx.add(1, RawSymbol::new("FIM", SymbolKind::Variable, r));

        let index = fx.build();
        let record = &index.lookup("FIM")[0];
        assert_eq!(record.targets[0].scope, "OCPConst.hpp");
    }

    #[test]
    fn test_case_variants_share_stem_but_not_record() {
        let mut fx = Fixture::new(&["ParamOutput.hpp"]);
        let r = fx.line();
        fx.add(1, RawSymbol::new("DetailInfo", SymbolKind::Class, r).definition(true));
        let r = fx.line();
        fx.add(1, RawSymbol::new("ParamOutput", SymbolKind::Class, r).definition(true));
        let r = fx.line();
        fx.add(
            1,
            RawSymbol::new("detailInfo", SymbolKind::Field, r).with_scope(Some("ParamOutput".into())),
        );

        let index = fx.build();
        let bucket = index.bucket_for(SectionKind::All, 'd').unwrap();
        let keys: Vec<_> = bucket.records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["detailinfo_0", "detailinfo_1"]);
        assert_eq!(bucket.records[0].label, "DetailInfo");
    }

    #[test]
    fn test_case_tie_is_bytewise() {
        // The generator lists `dimens` before `Dimens` but `DetailInfo` before
        // `detailInfo`; both ties here are bytewise, uppercase first.
        let mut fx = Fixture::new(&["ParamReservoir.hpp"]);
        let r = fx.line();
        fx.add(1, RawSymbol::new("ParamReservoir", SymbolKind::Class, r).definition(true));
        let r = fx.line();
        fx.add(
            1,
            RawSymbol::new("dimens", SymbolKind::Field, r).with_scope(Some("ParamReservoir".into())),
        );
        let r = fx.line();
        fx.add(1, RawSymbol::new("Dimens", SymbolKind::Class, r).definition(true));

        let index = fx.build();
        let bucket = index.bucket_for(SectionKind::All, 'd').unwrap();
        let records: Vec<_> = bucket
            .records
            .iter()
            .map(|r| (r.key.as_str(), r.label.as_str()))
            .collect();
        assert_eq!(records, vec![("dimens_0", "Dimens"), ("dimens_1", "dimens")]);
        assert_eq!(bucket.records[1].targets[0].scope, "ParamReservoir");
    }

    #[test]
    fn test_buckets_are_numbered_by_letter() {
        let mut fx = Fixture::new(&["a.hpp"]);
        for name in ["Pref", "dx", "FindPtr", "_hidden", "poro"] {
            let r = fx.line();
            fx.add(1, RawSymbol::new(name, SymbolKind::Variable, r));
        }

        let index = fx.build();
        let all = index.section(SectionKind::All).unwrap();
        assert_eq!(all.letters(), "_adfp");

        let p = all.bucket_for('p').unwrap();
        assert_eq!(p.index, 4);
        assert_eq!(p.file_name(SectionKind::All), "all_4.js");
        let keys: Vec<_> = p.records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["poro_0", "pref_1"]);

        let variables = index.section(SectionKind::Variables).unwrap();
        assert_eq!(variables.letters(), "_dfp");
        assert!(index.section(SectionKind::Classes).is_none());
    }

    #[test]
    fn test_all_section_only() {
        let mut fx = Fixture::new(&["a.hpp"]);
        let r = fx.line();
        fx.add(1, RawSymbol::new("Bulk", SymbolKind::Class, r).definition(true));

        let options = BuildOptions {
            sections: false,
            ..BuildOptions::default()
        };
        let index = IndexBuilder::new(&fx.files, options).build(&fx.symbols);
        assert_eq!(index.sections.len(), 1);
        assert_eq!(index.sections[0].kind, SectionKind::All);
    }

    #[test]
    fn test_undocumented_symbols_dropped_without_extract_all() {
        let mut fx = Fixture::new(&["Well.hpp"]);
        let r = fx.line();
        fx.add(1, RawSymbol::new("Well", SymbolKind::Class, r).definition(true));
        let r = fx.line();
        fx.add(
            1,
            RawSymbol::new("InputPerfo", SymbolKind::Method, r)
                .with_scope(Some("Well".into()))
                .with_signature("()")
                .with_doc(Some("Input the param of perforations.".into())),
        );
        let r = fx.line();
        fx.add(1, RawSymbol::new("Undocumented", SymbolKind::Class, r).definition(true));

        let options = BuildOptions {
            extract_all: false,
            ..BuildOptions::default()
        };
        let index = IndexBuilder::new(&fx.files, options).build(&fx.symbols);
        let labels: Vec<_> = all_records(&index).iter().map(|r| r.label.clone()).collect();
        assert!(labels.contains(&"InputPerfo".to_string()));
        assert!(labels.contains(&"Well".to_string()));
        assert!(labels.contains(&"Well.hpp".to_string()));
        assert!(!labels.contains(&"Undocumented".to_string()));
    }
}
