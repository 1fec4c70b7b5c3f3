//! Supported input languages and extension mapping.

use crate::Settings;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Cpp,
    C,
    Markdown,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Cpp, Language::C, Language::Markdown];

    /// Key of the `[languages.<key>]` settings table.
    pub fn config_key(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Markdown => "markdown",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Cpp => "C++",
            Language::C => "C",
            Language::Markdown => "Markdown",
        }
    }

    pub fn default_extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Cpp => &["h", "hh", "hpp", "hxx", "cpp", "cc", "cxx", "inl", "ipp"],
            Language::C => &["c"],
            Language::Markdown => &["md", "markdown", "dox"],
        }
    }

    /// Source languages contribute a file entry of their own.
    pub fn is_source(&self) -> bool {
        matches!(self, Language::Cpp | Language::C)
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.default_extensions().contains(&extension.as_str()))
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Detect using the configured extensions; disabled languages yield `None`.
    pub fn from_path_with(path: &Path, settings: &Settings) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        Self::ALL.into_iter().find(|lang| {
            settings
                .languages
                .get(lang.config_key())
                .is_some_and(|config| {
                    config.enabled && config.extensions.iter().any(|e| e.eq_ignore_ascii_case(&extension))
                })
        })
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
