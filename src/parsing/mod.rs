//! Source parsing: C/C++ through tree-sitter, Markdown pages by line scan.

pub mod cpp;
pub mod factory;
pub mod language;
pub mod markdown;
pub mod parser;

pub use cpp::CppParser;
pub use factory::ParserFactory;
pub use language::Language;
pub use markdown::MarkdownParser;
pub use parser::{LanguageParser, ParsedSource};
