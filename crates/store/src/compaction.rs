//! Compaction: folds every segment into a single new one (§4.6 `compact`).

use anyhow::Result;
use log::{info, warn};
use std::collections::BTreeMap;

use crate::Store;

impl Store {
    /// Reads every segment, oldest to newest, folding them into one sorted
    /// map and overwriting on each visit so the newest segment's value for a
    /// duplicate key wins (O2). Source segments are deleted as they are
    /// consumed, `file_counter` and the bloom vector are reset to empty, and
    /// the merged contents are written back out as the new segment `F0`.
    ///
    /// Tiers 1 and 2 are untouched. A segment that fails to read is logged
    /// and skipped (§7); the final write is surfaced to the caller.
    pub fn compact(&mut self) -> Result<()> {
        let segment_count = self.segments.file_counter();
        info!("compaction starting over {segment_count} segment(s)");

        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = BTreeMap::new();
        for id in 0..segment_count {
            match self.segments.read_segment(id) {
                Ok(pairs) => {
                    for (key, value) in pairs {
                        merged.insert(key, value);
                    }
                }
                Err(e) => {
                    warn!("segment F{id}.sst unreadable during compaction, skipping: {e}");
                }
            }
        }

        for id in 0..segment_count {
            if let Err(e) = self.segments.delete_segment_file(id) {
                warn!("could not delete segment F{id}.sst after compaction: {e}");
            }
        }

        self.segments.reset();

        let sorted: Vec<(Vec<u8>, Vec<u8>)> = merged.into_iter().collect();
        let merged_count = sorted.len();
        self.segments.flush(sorted)?;

        info!("compaction finished: {merged_count} key(s) folded into F0.sst");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use config::StoreConfig;
    use tempfile::tempdir;

    use crate::Store;

    #[test]
    fn compacts_many_segments_into_one() {
        let dir = tempdir().unwrap();
        let cfg = StoreConfig::new(dir.path()).with_memory_threshold(5).with_sparse_interval(3);
        let mut store = Store::new(cfg).unwrap();

        for i in 0..20 {
            store.insert(format!("key{i}"), i.to_string()).unwrap();
        }
        assert_eq!(store.segments.file_counter(), 3);

        store.compact().unwrap();

        assert_eq!(store.segments.file_counter(), 1);
        assert!(store.segments.segment_path(0).exists());
        for i in 0..20 {
            assert_eq!(store.get(format!("key{i}").as_bytes()), Some(i.to_string().into_bytes()));
        }
    }

    #[test]
    fn idempotent_compaction() {
        let dir = tempdir().unwrap();
        let cfg = StoreConfig::new(dir.path()).with_memory_threshold(5).with_sparse_interval(3);
        let mut store = Store::new(cfg).unwrap();

        for i in 0..20 {
            store.insert(format!("key{i}"), i.to_string()).unwrap();
        }
        store.compact().unwrap();
        let first: Vec<_> = (0..20).map(|i| store.get(format!("key{i}").as_bytes())).collect();

        store.compact().unwrap();
        let second: Vec<_> = (0..20).map(|i| store.get(format!("key{i}").as_bytes())).collect();

        assert_eq!(first, second);
        assert_eq!(store.segments.file_counter(), 1);
    }

    #[test]
    fn post_compaction_inserts_are_retrievable() {
        let dir = tempdir().unwrap();
        let cfg = StoreConfig::new(dir.path()).with_memory_threshold(5).with_sparse_interval(3);
        let mut store = Store::new(cfg).unwrap();

        for i in 0..20 {
            store.insert(format!("key{i}"), i.to_string()).unwrap();
        }
        store.compact().unwrap();

        for i in 20..25 {
            store.insert(format!("key{i}"), (i * 2).to_string()).unwrap();
        }
        for i in 20..25 {
            assert_eq!(store.get(format!("key{i}").as_bytes()), Some((i * 2).to_string().into_bytes()));
        }
    }
}
