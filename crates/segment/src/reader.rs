//! The segment reader protocol (§4.4 `lookup`) and the full-scan used by
//! compaction (§4.6 `compact`, step 1).

use flate2::read::GzDecoder;
use std::cmp::Ordering;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::error::SegmentError;
use crate::format;

fn load_decompressed(path: &Path) -> Result<Vec<u8>, SegmentError> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(file);
    let mut data = Vec::new();
    decoder
        .read_to_end(&mut data)
        .map_err(|e| SegmentError::Corrupt(e.to_string()))?;
    Ok(data)
}

/// Reads the footer and returns `index_position`, validating I6 (the index
/// position must strictly precede the footer's own start).
fn parse_footer(data: &[u8]) -> Result<u64, SegmentError> {
    if (data.len() as u64) < format::FOOTER_BYTES {
        return Err(SegmentError::Corrupt("file too small for footer".into()));
    }
    let footer_start = data.len() as u64 - format::FOOTER_BYTES;
    let mut cur = Cursor::new(&data[footer_start as usize..]);
    let index_position = format::read_footer(&mut cur)?;
    if index_position >= footer_start {
        return Err(SegmentError::Corrupt(
            "index position does not precede footer".into(),
        ));
    }
    Ok(index_position)
}

/// Deserializes the sparse-index sequence occupying `[index_position,
/// footer_start)`.
fn parse_sparse_index(data: &[u8], index_position: u64) -> Result<Vec<(Vec<u8>, u64)>, SegmentError> {
    let footer_start = data.len() as u64 - format::FOOTER_BYTES;
    let mut cur = Cursor::new(&data[index_position as usize..footer_start as usize]);
    let len = cur.get_ref().len() as u64;
    let mut entries = Vec::new();
    while cur.position() < len {
        entries.push(format::read_index_entry(&mut cur)?);
    }
    Ok(entries)
}

/// Reader protocol: seeks to the sparse-index-bounded region that may hold
/// `key` and scans it linearly, relying on ascending order to stop early.
///
/// Returns `Ok(None)` for a key absent from this segment, and an error for
/// an unreadable or corrupt file — the segment manager treats both the same
/// way: this segment does not contain the key.
pub fn lookup(path: &Path, key: &[u8]) -> Result<Option<Vec<u8>>, SegmentError> {
    let data = load_decompressed(path)?;
    let index_position = parse_footer(&data)?;
    let sparse_index = parse_sparse_index(&data, index_position)?;

    let start = if sparse_index.is_empty() {
        0
    } else {
        let pos = sparse_index.partition_point(|(k, _)| k.as_slice() < key);
        sparse_index[pos.saturating_sub(1)].1
    };

    let mut cur = Cursor::new(&data[start as usize..index_position as usize]);
    let region_len = index_position - start;
    while cur.position() < region_len {
        let (k, v) = format::read_record(&mut cur)?;
        match k.as_slice().cmp(key) {
            Ordering::Equal => return Ok(Some(v)),
            Ordering::Greater => return Ok(None),
            Ordering::Less => continue,
        }
    }
    Ok(None)
}

/// Reads every record in the segment, in on-disk (ascending-key) order.
///
/// Used by compaction, which needs the segment's full contents rather than a
/// single key.
pub fn read_all(path: &Path) -> Result<Vec<(Vec<u8>, Vec<u8>)>, SegmentError> {
    let data = load_decompressed(path)?;
    let index_position = parse_footer(&data)?;
    let mut cur = Cursor::new(&data[..index_position as usize]);
    let mut out = Vec::new();
    while cur.position() < index_position {
        out.push(format::read_record(&mut cur)?);
    }
    Ok(out)
}
