//! In-memory model of a documentation search index.
//!
//! An index is a list of sections (`all`, `classes`, ...), each split into
//! buckets by the first character of the record labels. Every bucket is
//! written as one `searchData` file.

pub mod anchor;
pub mod bucket;
pub mod builder;
pub mod key;
pub mod record;

pub use bucket::{SearchBucket, SearchIndex, SearchSection, SectionKind, bucket_file_name};
pub use builder::{BuildOptions, IndexBuilder};
pub use key::{bucket_char, record_key, search_stem, split_key};
pub use record::{SearchRecord, SearchTarget};
