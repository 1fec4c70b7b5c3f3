pub mod cli;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod index;
pub mod indexing;
pub mod io;
pub mod logging;
pub mod parsing;
pub mod query;
pub mod storage;
pub mod symbol;
pub mod types;
pub mod utils;
pub mod validate;

pub use codec::{CodecError, SearchDataManifest};
pub use config::Settings;
pub use error::{IndexError, IndexResult};
pub use index::{SearchBucket, SearchIndex, SearchRecord, SearchSection, SearchTarget, SectionKind};
pub use indexing::{DocIndexer, IndexOutcome};
pub use parsing::{Language, LanguageParser, ParserFactory};
pub use query::{SearchHit, SearchQuery};
pub use storage::{IndexStore, StorageError};
pub use symbol::{RawSymbol, Symbol};
pub use types::*;
pub use validate::{ValidationReport, validate};
