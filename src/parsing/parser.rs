//! Language parser trait
//!
//! This module defines the common interface that all language parsers
//! must implement to work with the indexing system.

use super::Language;
use crate::symbol::RawSymbol;
use serde::Serialize;

/// Everything a parser pulls out of one file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedSource {
    pub symbols: Vec<RawSymbol>,
    /// File-level documentation (`\file` block), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_doc: Option<String>,
}

/// Common interface for all language parsers
pub trait LanguageParser: Send {
    /// Parse source code and extract symbols
    fn parse(&mut self, code: &str) -> ParsedSource;

    /// Get the language this parser handles
    fn language(&self) -> Language;
}
