//! # Store
//!
//! The facade (§4.6) and compactor (§4.6, step-by-step in [`compaction`])
//! that orchestrate [`memtable`]'s two write tiers and [`segment`]'s
//! on-disk segment manager into the embedded key/value store described by
//! the design.
//!
//! ## Architecture
//!
//! ```text
//! insert(key, value)
//!   |
//!   v
//! n < memory_threshold ?
//!   yes -> tier 1 (AvlMap)
//!   no  -> tier 2 (StagingBuffer) -> size >= memory_threshold ? -> flush -> new segment
//!
//! get(key)
//!   tier 1 (linear scan of in_order()) -> tier 2 -> segments, oldest to newest, bloom-screened
//!
//! compact()
//!   every segment, oldest to newest, folded into one map (newest overwrites) -> single new segment F0
//! ```
//!
//! ## Freshness caveat
//!
//! Because segment lookups scan oldest-to-newest and tier 1 only ever
//! receives the first `memory_threshold` inserts, a key that first landed in
//! tier 1 and was later reinserted through tier 2 (and flushed) will still
//! resolve to its tier-1 value: tier 1 is always consulted first, unconditionally.
//! This is a property of the design, not a bug — see `DESIGN.md`'s note on O1.
mod compaction;
mod read;
mod write;

use anyhow::Result;
use config::StoreConfig;
use memtable::{AvlMap, StagingBuffer};
use segment::SegmentManager;

/// The embedded key/value store facade.
pub struct Store {
    tier1: AvlMap,
    tier2: StagingBuffer,
    segments: SegmentManager,
    memory_threshold: usize,
    item_count: usize,
}

impl Store {
    /// Opens a store rooted at `config.database_path`, creating the segment
    /// directory if it does not already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment directory cannot be created
    /// (`DirectoryUnwritable`, §7).
    pub fn new(config: StoreConfig) -> Result<Self> {
        let segments = SegmentManager::new(
            config.database_path,
            config.sparse_interval,
            config.bloom_size,
            config.bloom_hash_count,
        )?;
        Ok(Self {
            tier1: AvlMap::new(),
            tier2: StagingBuffer::new(),
            segments,
            memory_threshold: config.memory_threshold,
            item_count: 0,
        })
    }

    /// The number of logical `insert` calls made so far (not distinct keys).
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }
}
