//! Configuration module for doxsearch.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `DOXSEARCH_` and use double
//! underscores to separate nested levels:
//! - `DOXSEARCH_INDEXING__PARALLEL_THREADS=8` sets `indexing.parallel_threads`
//! - `DOXSEARCH_OUTPUT__DIR=html/search` sets `output.dir`
//! - `DOXSEARCH_INDEXING__EXTRACT_PRIVATE=true` sets `indexing.extract_private`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directory holding `settings.toml`.
pub const CONFIG_DIR: &str = ".doxsearch";
/// Extra ignore file honoured by the walker (gitignore syntax).
pub const IGNORE_FILE: &str = ".doxsearchignore";
const ENV_PREFIX: &str = "DOXSEARCH_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Workspace root directory (where .doxsearch is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Indexing configuration
    #[serde(default)]
    pub indexing: IndexingConfig,

    /// Language-specific settings
    #[serde(default = "default_languages")]
    pub languages: IndexMap<String, LanguageConfig>,

    /// Where and how buckets are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Query defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Log levels
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IndexingConfig {
    /// Number of parallel threads for parsing
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,

    /// Patterns to ignore during indexing
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Index private class members
    #[serde(default = "default_false")]
    pub extract_private: bool,

    /// Index undocumented symbols too
    #[serde(default = "default_true")]
    pub extract_all: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LanguageConfig {
    /// Whether this language is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// File extensions for this language
    #[serde(default)]
    pub extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    /// Directory the bucket files are written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Prefix of every link, relative to the bucket directory
    #[serde(default = "default_link_prefix")]
    pub link_prefix: String,

    /// Write per-kind sections (classes, functions, ...) besides `all`
    #[serde(default = "default_true")]
    pub sections: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// Maximum number of hits shown when --limit is not given
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, `indexer = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("docs/search")
}
fn default_link_prefix() -> String {
    "../".to_string()
}
fn default_limit() -> usize {
    20
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            workspace_root: None,
            indexing: IndexingConfig::default(),
            languages: default_languages(),
            output: OutputConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            parallel_threads: default_parallel_threads(),
            ignore_patterns: vec![
                "build/**".to_string(),
                "html/**".to_string(),
                "*.generated.*".to_string(),
            ],
            extract_private: false,
            extract_all: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            link_prefix: default_link_prefix(),
            sections: true,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

fn default_languages() -> IndexMap<String, LanguageConfig> {
    let mut langs = IndexMap::new();

    langs.insert(
        "cpp".to_string(),
        LanguageConfig {
            enabled: true,
            extensions: ["h", "hh", "hpp", "hxx", "cpp", "cc", "cxx", "inl", "ipp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        },
    );

    langs.insert(
        "c".to_string(),
        LanguageConfig {
            enabled: true,
            extensions: vec!["c".to_string()],
        },
    );

    langs.insert(
        "markdown".to_string(),
        LanguageConfig {
            enabled: true,
            extensions: vec!["md".to_string(), "markdown".to_string(), "dox".to_string()],
        },
    );

    langs
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));

        Self::figment(&config_path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Load configuration from a specific file (still layered with env vars)
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref()).extract().map_err(Box::new)
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            // Double underscore separates nested levels, single underscores
            // stay inside field names
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .map(|key| key.as_str().to_lowercase().replace("__", ".").into()),
            )
    }

    /// Find the workspace config by looking for the .doxsearch directory
    /// from the current directory up to the root
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join("settings.toml"))
    }

    /// Get the workspace root directory (where .doxsearch is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .find(|ancestor| ancestor.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Check if configuration is properly initialized
    pub fn check_init() -> Result<(), String> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));

        if !config_path.exists() {
            return Err("No configuration file found".to_string());
        }

        match std::fs::read_to_string(&config_path) {
            Ok(content) => {
                if let Err(e) = toml::from_str::<Settings>(&content) {
                    return Err(format!(
                        "Configuration file is corrupted: {e}\nRun 'doxsearch init --force' to regenerate."
                    ));
                }
            }
            Err(e) => {
                return Err(format!("Cannot read configuration file: {e}"));
            }
        }

        Ok(())
    }

    /// Whether a language key (`cpp`, `c`, `markdown`) is enabled
    pub fn language_enabled(&self, key: &str) -> bool {
        self.languages.get(key).is_some_and(|config| config.enabled)
    }

    /// Output directory, resolved against the workspace root when relative
    pub fn output_dir(&self) -> PathBuf {
        match &self.workspace_root {
            Some(root) if self.output.dir.is_relative() => root.join(&self.output.dir),
            _ => self.output.dir.clone(),
        }
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file in `root`
    pub fn init_config_file(
        root: &Path,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = root.join(CONFIG_DIR).join("settings.toml");

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        let mut settings = Settings::default();
        settings.workspace_root = Some(root.to_path_buf());
        settings.save(&config_path)?;

        Self::create_default_ignore_file(root, force)?;

        Ok(config_path)
    }

    /// Create a default .doxsearchignore file with helpful patterns
    fn create_default_ignore_file(root: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
        let ignore_path = root.join(IGNORE_FILE);

        if !force && ignore_path.exists() {
            return Ok(());
        }

        let default_content = r#"# doxsearch ignore patterns (gitignore syntax)
#
# Files matching these patterns are not scanned for symbols.

# Build artifacts
build/
cmake-build-*/
*.o
*.obj
*.so
*.a

# Generated documentation
docs/html/
docs/search/

# Third-party code
external/
third_party/
vendor/

# Version control
.git/
.svn/
"#;

        std::fs::write(&ignore_path, default_content)?;
        Ok(())
    }
}
