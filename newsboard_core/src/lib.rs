pub mod dataset;
pub mod error;
pub mod source;
pub mod store;

pub use dataset::*;
pub use error::*;
pub use source::{DatasetSource, JsonFileSource};
pub use store::{CachedDataStore, DEFAULT_FRESHNESS, DEFAULT_TOP_WORDS_LIMIT};
