//! Write path: `insert()` and the internal `flush()` it may trigger.

use anyhow::Result;

use crate::Store;

impl Store {
    /// Inserts or updates `key` with `value`.
    ///
    /// The first `memory_threshold` inserts land in tier 1; every insert
    /// after that goes to tier 2, which is flushed to a new segment once it
    /// reaches `memory_threshold` entries. `item_count` increments on every
    /// call regardless of which tier received the write.
    ///
    /// # Errors
    ///
    /// Returns an error only if a triggered flush hits an unwritable segment
    /// directory (`DirectoryUnwritable`, §7).
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Result<()> {
        let key = key.into();
        let value = value.into();

        if self.item_count < self.memory_threshold {
            self.tier1.insert(key, value);
        } else {
            self.tier2.insert(key, value);
            if self.tier2.size() >= self.memory_threshold {
                self.flush()?;
            }
        }
        self.item_count += 1;
        Ok(())
    }

    /// Drains tier 2 in sorted order and hands it to the segment manager as
    /// a new segment, clearing tier 2 on return.
    pub(crate) fn flush(&mut self) -> Result<()> {
        let pairs = self.tier2.drain_sorted();
        self.segments.flush(pairs)
    }
}
