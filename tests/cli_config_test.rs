use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn doxsearch(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_doxsearch"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run doxsearch")
}

fn write_sources(root: &Path) {
    std::fs::create_dir_all(root.join("include")).unwrap();
    std::fs::write(
        root.join("include/Bulk.hpp"),
        "/// Bulk properties.\nclass Bulk {\npublic:\n    /// Set up dimensions.\n    void dimens(int n);\n    int numPhase;\n};\n",
    )
    .unwrap();
    std::fs::write(root.join("intro.md"), "# Getting Started\n\nText.\n").unwrap();
}

#[test]
fn test_init_command() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();

    let output = doxsearch(temp_path, &["init"]);
    assert!(output.status.success());

    let config_path = temp_path.join(".doxsearch/settings.toml");
    assert!(config_path.exists());
    assert!(temp_path.join(".doxsearchignore").exists());

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("version = 1"));
    assert!(content.contains("[indexing]"));
    assert!(content.contains("[languages.cpp]"));

    // A second init without --force refuses to overwrite
    let output = doxsearch(temp_path, &["init"]);
    assert_eq!(output.status.code(), Some(2));

    let output = doxsearch(temp_path, &["init", "--force"]);
    assert!(output.status.success());
}

#[test]
fn test_config_command() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();

    let config_dir = temp_path.join(".doxsearch");
    std::fs::create_dir_all(&config_dir).unwrap();
    let config_content = r#"
version = 2
[indexing]
parallel_threads = 99
"#;
    std::fs::write(config_dir.join("settings.toml"), config_content).unwrap();

    let output = doxsearch(temp_path, &["config"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("version = 2"));
    assert!(stdout.contains("parallel_threads = 99"));
}

#[test]
fn test_broken_config_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join(".doxsearch");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("settings.toml"), "[indexing]\nparallel_threads = \"many\"\n").unwrap();

    let output = doxsearch(temp_dir.path(), &["config"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_index_search_validate() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    write_sources(temp_path);

    let output = doxsearch(temp_path, &["index", "--dry-run"]);
    assert!(output.status.success());
    assert!(!temp_path.join("docs/search").exists());

    let output = doxsearch(temp_path, &["index", "-t", "2"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(temp_path.join("docs/search/searchdata.js").exists());
    assert!(temp_path.join("docs/search/index.meta").exists());

    let output = doxsearch(temp_path, &["--json", "search", "dimens"]);
    assert!(output.status.success());
    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["data"][0]["record"]["label"], "dimens");
    assert_eq!(envelope["data"][0]["record"]["targets"][0]["scope"], "Bulk");

    let output = doxsearch(temp_path, &["--json", "search", "Getting"]);
    assert!(output.status.success());
    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        envelope["data"][0]["record"]["targets"][0]["url"],
        "../md_intro.html"
    );

    let output = doxsearch(temp_path, &["search", "zebra"]);
    assert_eq!(output.status.code(), Some(1));

    let output = doxsearch(temp_path, &["validate"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stdout));

    std::fs::write(
        temp_path.join("docs/search/all_0.js"),
        "var searchData=\n[\n  ['x_3',['Bulk',['../classBulk.html',1,'']]]\n];\n",
    )
    .unwrap();
    let output = doxsearch(temp_path, &["--json", "validate"]);
    assert_eq!(output.status.code(), Some(1));
    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(envelope["exit_code"], 1);
}

#[test]
fn test_search_without_index() {
    let temp_dir = TempDir::new().unwrap();
    let output = doxsearch(temp_dir.path(), &["--json", "search", "Bulk"]);
    assert_eq!(output.status.code(), Some(1));
    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(envelope["status"], "not_found");
    assert!(envelope["hint"].as_str().unwrap().contains("doxsearch index"));
}

#[test]
fn test_inspect_fixture() {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/search/all_6.js");
    let temp_dir = TempDir::new().unwrap();

    let output = doxsearch(temp_dir.path(), &["--json", "inspect", fixture.to_str().unwrap()]);
    assert!(output.status.success());
    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(envelope["meta"]["count"], 31);
    assert_eq!(envelope["data"]["letter"], "f");
    assert_eq!(envelope["data"]["section"], "all");
    assert!(envelope["data"]["issues"].as_array().unwrap().is_empty());

    let output = doxsearch(temp_dir.path(), &["inspect", "missing_1.js"]);
    assert_eq!(output.status.code(), Some(4));
}
