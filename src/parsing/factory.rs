//! Parser factory for creating language-specific parsers
//!
//! Parsers are created per language according to the `[languages]` and
//! `[indexing]` settings.

use super::{CppParser, Language, LanguageParser, MarkdownParser};
use crate::Settings;
use crate::error::{IndexError, IndexResult};
use std::sync::Arc;

/// Factory for creating language parsers based on configuration
#[derive(Debug, Clone)]
pub struct ParserFactory {
    settings: Arc<Settings>,
}

impl ParserFactory {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Create a parser for the specified language
    pub fn create_parser(&self, language: Language) -> IndexResult<Box<dyn LanguageParser>> {
        if !self.is_language_enabled(language) {
            return Err(IndexError::Parser {
                language: language.name().to_string(),
                reason: "language is disabled in configuration".to_string(),
            });
        }

        let extract_private = self.settings.indexing.extract_private;
        let parser_error = |reason: String| IndexError::Parser {
            language: language.name().to_string(),
            reason,
        };

        match language {
            Language::Cpp => Ok(Box::new(
                CppParser::new().map_err(parser_error)?.extract_private(extract_private),
            )),
            Language::C => Ok(Box::new(
                CppParser::new_c().map_err(parser_error)?.extract_private(extract_private),
            )),
            Language::Markdown => Ok(Box::new(MarkdownParser::new())),
        }
    }

    pub fn is_language_enabled(&self, language: Language) -> bool {
        self.settings
            .languages
            .get(language.config_key())
            .is_some_and(|config| config.enabled)
    }

    pub fn enabled_languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|&lang| self.is_language_enabled(lang))
            .collect()
    }
}
