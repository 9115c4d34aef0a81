//! # Segment
//!
//! The on-disk segment file format, its sparse index, and the segment
//! manager that owns a store's segment directory.
//!
//! ## File layout
//!
//! ```text
//! [ record_0 ][ record_1 ] … [ record_{N-1} ][ sparse_index ][ index_position: u64 BE ]
//! ```
//!
//! `record_i` and the sparse index's `(key, offset)` entries are explicit
//! length-prefixed big-endian frames (see [`format`]); the whole stream is
//! then gzip-compressed on disk. `index_position` is the byte offset, within
//! the *uncompressed* stream, of the first byte of the sparse index.
//!
//! A segment's bloom filter is built while writing ([`writer::dump`]) and
//! kept in memory by the [`SegmentManager`] alongside the file — it is not
//! itself part of the on-disk layout, matching §6's note that no further
//! metadata file is required by the core's mandatory interface.

mod error;
mod format;
mod manager;
mod reader;
mod writer;

pub use error::SegmentError;
pub use manager::SegmentManager;
pub use reader::{lookup, read_all};
pub use writer::dump;
