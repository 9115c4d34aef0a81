//! Construction parameters for the store and its components.
//!
//! `StoreConfig` bundles the parameters that govern memory-tier sizing,
//! segment layout, and bloom filter shape, with defaults matching the
//! reference store. It follows a consuming builder pattern: each setter
//! takes and returns `self` so calls can be chained.
//!
//! ## Example
//!
//! ```rust
//! use config::StoreConfig;
//!
//! let cfg = StoreConfig::new("my_store_db")
//!     .with_memory_threshold(10)
//!     .with_sparse_interval(5);
//! assert_eq!(cfg.memory_threshold, 10);
//! ```

use std::path::PathBuf;

/// Default number of items accepted into tier 1 / tier 2 before a flush.
pub const DEFAULT_MEMORY_THRESHOLD: usize = 5;
/// Default segment directory name.
pub const DEFAULT_DATABASE_PATH: &str = "data_store_db";
/// Default spacing, in records, between sparse index entries.
pub const DEFAULT_SPARSE_INTERVAL: usize = 3;
/// Default bloom filter bit-array size.
pub const DEFAULT_BLOOM_SIZE: u64 = 1000;
/// Default bloom filter hash count.
pub const DEFAULT_BLOOM_HASH_COUNT: u32 = 3;

/// Configuration for a [`store`](../store/index.html)-crate `Store`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory the segment manager reads and writes segment files in.
    pub database_path: PathBuf,

    /// Number of inserts tier 1 accepts before new inserts route to tier 2,
    /// and the staging-buffer size that triggers a flush to a new segment.
    pub memory_threshold: usize,

    /// Spacing, in records, between entries written to a segment's sparse
    /// index.
    pub sparse_interval: usize,

    /// Bit-array size for each segment's bloom filter.
    pub bloom_size: u64,

    /// Hash-function count for each segment's bloom filter.
    pub bloom_hash_count: u32,
}

impl StoreConfig {
    /// Creates a config rooted at `database_path`, with every other field at
    /// its default.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(database_path: P) -> Self {
        Self {
            database_path: database_path.into(),
            ..Self::default()
        }
    }

    /// Sets `memory_threshold`.
    #[must_use]
    pub fn with_memory_threshold(mut self, memory_threshold: usize) -> Self {
        self.memory_threshold = memory_threshold;
        self
    }

    /// Sets `sparse_interval`.
    #[must_use]
    pub fn with_sparse_interval(mut self, sparse_interval: usize) -> Self {
        self.sparse_interval = sparse_interval;
        self
    }

    /// Sets the bloom filter's bit-array size.
    #[must_use]
    pub fn with_bloom_size(mut self, bloom_size: u64) -> Self {
        self.bloom_size = bloom_size;
        self
    }

    /// Sets the bloom filter's hash-function count.
    #[must_use]
    pub fn with_bloom_hash_count(mut self, bloom_hash_count: u32) -> Self {
        self.bloom_hash_count = bloom_hash_count;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            memory_threshold: DEFAULT_MEMORY_THRESHOLD,
            sparse_interval: DEFAULT_SPARSE_INTERVAL,
            bloom_size: DEFAULT_BLOOM_SIZE,
            bloom_hash_count: DEFAULT_BLOOM_HASH_COUNT,
        }
    }
}
