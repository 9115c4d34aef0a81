//! The segment manager (§4.5): owns the segment directory, the file-number
//! counter, and the parallel vector of per-segment bloom filters.

use anyhow::{Context, Result};
use bloom::BloomFilter;
use log::warn;
use std::path::{Path, PathBuf};

use crate::error::SegmentError;
use crate::{reader, writer};

/// Owns one store's segment directory.
///
/// `blooms[i]` is the bloom filter for segment id `i`; segment ids are dense
/// `0..file_counter` for as long as the manager is alive, since the only way
/// to remove a segment is a caller reading every segment out, deleting the
/// files, and calling [`reset`](SegmentManager::reset) — the facade's
/// compaction step does exactly this.
pub struct SegmentManager {
    dir: PathBuf,
    file_counter: u64,
    sparse_interval: usize,
    bloom_size: u64,
    bloom_hash_count: u32,
    blooms: Vec<BloomFilter>,
}

impl SegmentManager {
    /// Opens (creating if necessary) the segment directory `dir`.
    ///
    /// This does not scan `dir` for pre-existing segment files: the core
    /// spec defines no recovery protocol, and a store backed by a directory
    /// that already contains segments starts with an empty bloom vector and
    /// `file_counter = 0`, which would silently shadow those files. Callers
    /// that need to reuse a populated directory must point at an empty one.
    pub fn new(dir: impl Into<PathBuf>, sparse_interval: usize, bloom_size: u64, bloom_hash_count: u32) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("could not create segment directory {}", dir.display()))?;
        Ok(Self {
            dir,
            file_counter: 0,
            sparse_interval,
            bloom_size,
            bloom_hash_count,
            blooms: Vec::new(),
        })
    }

    /// Returns the number of segments currently on disk.
    #[must_use]
    pub fn file_counter(&self) -> u64 {
        self.file_counter
    }

    /// Returns the on-disk path for segment `id`.
    #[must_use]
    pub fn segment_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("F{id}.sst"))
    }

    /// Writes `sorted_pairs` as a new segment and appends its bloom filter.
    ///
    /// An empty input is a no-op: no file is written and `file_counter` does
    /// not advance, matching the writer protocol's first step.
    pub fn flush(&mut self, sorted_pairs: Vec<(Vec<u8>, Vec<u8>)>) -> Result<()> {
        let path = self.segment_path(self.file_counter);
        match writer::dump(&path, &sorted_pairs, self.sparse_interval, self.bloom_size, self.bloom_hash_count) {
            Ok(bloom) => {
                self.blooms.push(bloom);
                self.file_counter += 1;
                Ok(())
            }
            Err(SegmentError::EmptyInput) => {
                warn!("flush called with no pending records; nothing written");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Scans segments id `0` upward (oldest to newest, per the source's
    /// iteration order) with bloom-filter screening, returning the first
    /// hit. A segment that fails its bloom check is skipped without I/O; one
    /// that is unreadable or corrupt is logged and also skipped, never
    /// surfaced to the caller.
    pub fn lookup(&self, key: &[u8]) -> Option<Vec<u8>> {
        for id in 0..self.file_counter {
            let Some(bloom) = self.blooms.get(id as usize) else {
                continue;
            };
            if !bloom.contains(key) {
                continue;
            }
            let path = self.segment_path(id);
            match reader::lookup(&path, key) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => continue,
                Err(e) => {
                    warn!("segment F{id}.sst unreadable during lookup, skipping: {e}");
                    continue;
                }
            }
        }
        None
    }

    /// Reads every record in segment `id`, oldest-to-newest within the file
    /// (ascending key order). Used by compaction.
    pub fn read_segment(&self, id: u64) -> Result<Vec<(Vec<u8>, Vec<u8>)>, SegmentError> {
        reader::read_all(&self.segment_path(id))
    }

    /// Deletes segment `id`'s file from disk. Missing files are tolerated
    /// (`SegmentMissing` per §7) since compaction's caller is about to reset
    /// the whole directory's bookkeeping regardless.
    pub fn delete_segment_file(&self, id: u64) -> Result<()> {
        let path = self.segment_path(id);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("could not delete segment {}", path.display())),
        }
    }

    /// Resets bookkeeping to the empty state: `file_counter = 0` and the
    /// bloom vector cleared. Used by compaction once every source segment
    /// has been folded into the merged map and deleted.
    pub fn reset(&mut self) {
        self.file_counter = 0;
        self.blooms.clear();
    }

    /// The segment directory this manager owns.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
