//! File discovery and parallel indexing.

pub mod indexer;
pub mod registry;
pub mod walker;

pub use indexer::{DocIndexer, IndexOutcome};
pub use registry::{FileEntry, FileRegistry};
pub use walker::FileWalker;
