//! Reading and writing the generated JavaScript artifacts.
//!
//! Two file kinds exist:
//! - bucket files (`all_4.js`, ...) holding `var searchData=[...]`;
//! - `searchdata.js`, the manifest naming the sections and the first
//!   character of each bucket.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{CodecError, CodecResult};
pub use reader::{
    ManifestSection, SearchDataManifest, decode_entities, parse_bucket, parse_search_data,
};
pub use writer::{encode_string, write_bucket, write_record, write_search_data};

/// Name of the manifest file next to the buckets.
pub const MANIFEST_FILE: &str = "searchdata.js";
