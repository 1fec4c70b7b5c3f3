//! Decoding, re-encoding and querying real bucket files.

use doxsearch::codec::{parse_bucket, write_bucket};
use doxsearch::storage::IndexStore;
use doxsearch::{SearchQuery, SectionKind, validate};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/search")
        .join(name)
}

fn fixture_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for name in ["all_4.js", "all_6.js", "all_10.js"] {
        fs::copy(fixture(name), temp_dir.path().join(name)).unwrap();
    }
    temp_dir
}

#[test]
fn test_record_counts() {
    for (name, expected) in [("all_4.js", 52), ("all_6.js", 31), ("all_10.js", 43)] {
        let text = fs::read_to_string(fixture(name)).unwrap();
        let records = parse_bucket(&text).unwrap();
        assert_eq!(records.len(), expected, "{name}");
    }
}

#[test]
fn test_rewrite_is_byte_identical() {
    for name in ["all_4.js", "all_6.js", "all_10.js"] {
        let text = fs::read_to_string(fixture(name)).unwrap();
        let records = parse_bucket(&text).unwrap();
        let written = write_bucket(&records);
        assert_eq!(written.trim_end(), text.trim_end(), "{name}");
    }
}

#[test]
fn test_entities_are_decoded() {
    let text = fs::read_to_string(fixture("all_4.js")).unwrap();
    let records = parse_bucket(&text).unwrap();

    let product = records.iter().find(|r| r.label == "DaABpbC").unwrap();
    assert_eq!(product.targets.len(), 2);
    let scope = &product.targets[0].scope;
    assert!(scope.starts_with("DaABpbC(const int &m,"));
    assert!(scope.ends_with("double *C):\u{a0}DenseMat.cpp"));

    let dasum = records.iter().find(|r| r.label == "dasum_").unwrap();
    assert_eq!(dasum.key, "dasum_5f_2");
    assert_eq!(dasum.targets[0].scope, "DenseMat.hpp");
}

#[test]
fn test_fixture_directory_is_valid() {
    let temp_dir = fixture_dir();
    let loaded = IndexStore::new(temp_dir.path()).load().unwrap();
    assert!(loaded.failures.is_empty());
    assert!(loaded.manifest.is_none());

    let section = loaded.index.section(SectionKind::All).unwrap();
    assert_eq!(section.letters(), "dfp");
    assert_eq!(loaded.index.record_count(), 52 + 31 + 43);

    let report = validate(&loaded.index, None);
    assert!(report.is_clean(), "{:?}", report.issues);
    assert_eq!(report.stats[0].records, 126);
}

#[test]
fn test_search_fixture_index() {
    let temp_dir = fixture_dir();
    let index = IndexStore::new(temp_dir.path()).load().unwrap().index;

    let hits = index.search(&SearchQuery::new("data"));
    assert!(hits[0].exact);
    assert_eq!(hits[0].record.label, "data");
    assert_eq!(hits[0].record.targets.len(), 4);
    assert_eq!(hits[0].bucket_file, "all_4.js");

    let scoped = index.search(&SearchQuery::new("data").with_scope("TableSet"));
    assert_eq!(scoped[0].record.targets.len(), 1);
    assert_eq!(scoped[0].record.targets[0].scope, "TableSet::data()");

    let prefix = index.search(&SearchQuery::new("Da").with_limit(2));
    assert_eq!(prefix.len(), 2);
    assert_eq!(prefix[0].record.label, "DaABpbC");

    assert!(index.search(&SearchQuery::new("zzz")).is_empty());
}

#[test]
fn test_unreadable_bucket_is_reported() {
    let temp_dir = fixture_dir();
    fs::write(temp_dir.path().join("all_7.js"), "var searchData=\n[\n  ['g_0',\n").unwrap();

    let loaded = IndexStore::new(temp_dir.path()).load().unwrap();
    assert_eq!(loaded.failures.len(), 1);
    assert_eq!(loaded.index.record_count(), 126);
}
