//! Markdown and `.dox` pages.
//!
//! A page contributes a single [`SymbolKind::Page`] symbol. The title comes
//! from a `\page` command or the first `#` heading; the page id from an
//! explicit `{#id}` label or the `\page` name. Missing pieces are filled in
//! by the indexer from the file path.

use crate::parsing::{Language, LanguageParser, ParsedSource};
use crate::symbol::RawSymbol;
use crate::types::{Range, SymbolKind};
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Default)]
pub struct MarkdownParser;

impl MarkdownParser {
    pub fn new() -> Self {
        Self
    }
}

fn page_command() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[\\@](?:page|mainpage)\s+(\S+)(?:\s+(.+))?$").expect("valid page regex")
    })
}

fn heading_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\{#([A-Za-z0-9_\-]+)\}\s*$").expect("valid label regex"))
}

/// Split `Title {#id}` into its parts.
fn split_label(heading: &str) -> (String, Option<String>) {
    match heading_label().captures(heading) {
        Some(caps) => {
            let title = heading[..caps.get(0).map_or(heading.len(), |m| m.start())].trim();
            (title.to_string(), caps.get(1).map(|m| m.as_str().to_string()))
        }
        None => (heading.trim().to_string(), None),
    }
}

impl LanguageParser for MarkdownParser {
    fn parse(&mut self, code: &str) -> ParsedSource {
        let mut title = None;
        let mut page_id = None;
        let mut line_no = 0u32;
        let mut in_fence = false;

        for (row, raw_line) in code.lines().enumerate() {
            let line = raw_line.trim().trim_start_matches(['*', '/', '!']).trim();
            if line.starts_with("```") || line.starts_with("~~~") {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }

            if let Some(caps) = page_command().captures(line) {
                page_id = caps.get(1).map(|m| m.as_str().to_string());
                if let Some(text) = caps.get(2) {
                    title = Some(text.as_str().trim().to_string());
                }
                line_no = row as u32;
                break;
            }

            if let Some(heading) = line.strip_prefix("# ") {
                let (text, label) = split_label(heading);
                title = Some(text);
                page_id = label;
                line_no = row as u32;
                break;
            }
        }

        let mut symbol = RawSymbol::new(
            title.unwrap_or_default(),
            SymbolKind::Page,
            Range::new(line_no, 0, line_no, 0),
        )
        .definition(true);
        symbol.page_id = page_id;

        ParsedSource {
            symbols: vec![symbol],
            file_doc: None,
        }
    }

    fn language(&self) -> Language {
        Language::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(code: &str) -> RawSymbol {
        let mut parser = MarkdownParser::new();
        let mut parsed = parser.parse(code);
        assert_eq!(parsed.symbols.len(), 1);
        parsed.symbols.remove(0)
    }

    #[test]
    fn test_heading_with_label() {
        let symbol = page("Intro text\n\n# Getting Started {#start}\n\nBody");
        assert_eq!(symbol.kind, SymbolKind::Page);
        assert_eq!(symbol.name, "Getting Started");
        assert_eq!(symbol.page_id.as_deref(), Some("start"));
        assert_eq!(symbol.range.start_line, 2);
    }

    #[test]
    fn test_plain_heading() {
        let symbol = page("# Build Guide\n## Details");
        assert_eq!(symbol.name, "Build Guide");
        assert_eq!(symbol.page_id, None);
    }

    #[test]
    fn test_page_command() {
        let symbol = page("/*!\n \\page keywords Keyword Reference\n */");
        assert_eq!(symbol.name, "Keyword Reference");
        assert_eq!(symbol.page_id.as_deref(), Some("keywords"));
    }

    #[test]
    fn test_headings_in_code_fences_ignored() {
        let symbol = page("```sh\n# not a title\n```\n# Real Title");
        assert_eq!(symbol.name, "Real Title");
    }

    #[test]
    fn test_untitled_page() {
        let symbol = page("just text");
        assert!(symbol.name.is_empty());
        assert_eq!(symbol.page_id, None);
    }
}
