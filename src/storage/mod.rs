//! Persistence of a built index as a directory of generated files.

pub mod error;
pub mod metadata;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use metadata::{IndexMetadata, METADATA_FILE};
pub use store::{IndexStore, LoadFailure, LoadedIndex, load_bucket};
