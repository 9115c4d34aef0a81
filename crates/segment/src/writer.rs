//! The segment writer protocol (§4.4 `dump`).
//!
//! Takes a key-sorted slice of pairs, writes the record stream followed by a
//! sparse index and an 8-byte footer, gzip-compresses the whole thing, and
//! returns the bloom filter built from the keys it saw along the way.

use bloom::BloomFilter;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::SegmentError;
use crate::format;

/// Writes `pairs` (already sorted ascending by key) to a new segment file at
/// `path`, sampling a sparse index entry every `sparse_interval` records.
///
/// Returns the populated [`BloomFilter`] on success. An empty `pairs` is
/// rejected with [`SegmentError::EmptyInput`] and no file is created, per the
/// writer protocol's step 1.
pub fn dump(
    path: &Path,
    pairs: &[(Vec<u8>, Vec<u8>)],
    sparse_interval: usize,
    bloom_size: u64,
    bloom_hash_count: u32,
) -> Result<BloomFilter, SegmentError> {
    if pairs.is_empty() {
        return Err(SegmentError::EmptyInput);
    }

    let interval = sparse_interval.max(1);
    let mut raw = Vec::new();
    let mut bloom = BloomFilter::new(bloom_size, bloom_hash_count);
    let mut sparse_index: Vec<(Vec<u8>, u64)> = Vec::new();
    let mut offset = 0u64;

    for (i, (key, value)) in pairs.iter().enumerate() {
        if i % interval == 0 {
            sparse_index.push((key.clone(), offset));
        }
        offset += format::write_record(&mut raw, key, value)?;
        bloom.add(key);
    }

    let index_position = raw.len() as u64;
    for (key, off) in &sparse_index {
        format::write_index_entry(&mut raw, key, *off)?;
    }
    format::write_footer(&mut raw, index_position)?;

    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(&raw)?;
    encoder.finish()?;

    Ok(bloom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rejects_empty_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("F0.sst");
        let err = dump(&path, &[], 3, 1000, 3).unwrap_err();
        assert!(matches!(err, SegmentError::EmptyInput));
        assert!(!path.exists());
    }

    #[test]
    fn writes_a_compressed_file_and_bloom_sees_every_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("F0.sst");
        let pairs = vec![
            (b"key1".to_vec(), b"1".to_vec()),
            (b"key2".to_vec(), b"2".to_vec()),
            (b"key3".to_vec(), b"3".to_vec()),
        ];
        let bloom = dump(&path, &pairs, 3, 1000, 3).unwrap();
        assert!(path.exists());
        for (key, _) in &pairs {
            assert!(bloom.contains(key));
        }
    }
}
