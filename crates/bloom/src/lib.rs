//! # Bloom Filter
//!
//! A space-efficient probabilistic data structure for set membership testing.
//!
//! A bloom filter can tell you with certainty that a key is **not** in the set
//! (no false negatives), but may occasionally report that a key **is** in the
//! set when it isn't (false positives).
//!
//! ## Usage
//!
//! Each segment embeds a bloom filter built from its keys. During point lookups
//! the store checks the bloom filter first -- if it says "not present", the
//! segment is skipped entirely, avoiding an on-disk scan.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bloom::BloomFilter;
//!
//! let mut bf = BloomFilter::new(1000, 3);
//! bf.add(b"hello");
//! assert!(bf.contains(b"hello"));
//! ```
use std::io::{self, Read, Write};

/// Default bit-array size, matching the reference implementation.
pub const DEFAULT_SIZE: u64 = 1000;
/// Default number of hash functions, matching the reference implementation.
pub const DEFAULT_HASH_COUNT: u32 = 3;

/// A bloom filter backed by a fixed-size bit vector with `hash_count`
/// independent hash functions.
///
/// Each hash function is the same mixing hash (FNV-1a) salted by its index,
/// reduced modulo `size`. This mirrors the source's `_hashes` method, which
/// salts the key with the hash index before hashing rather than deriving all
/// `k` indices from two base hashes.
pub struct BloomFilter {
    bits: Vec<u8>,
    size: u64,
    hash_count: u32,
}

impl BloomFilter {
    /// Creates a new, empty bloom filter with `size` bits and `hash_count`
    /// hash functions.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0 or `hash_count` is 0.
    pub fn new(size: u64, hash_count: u32) -> Self {
        assert!(size > 0, "size must be > 0");
        assert!(hash_count > 0, "hash_count must be > 0");

        let byte_len = ((size + 7) / 8) as usize;
        Self {
            bits: vec![0u8; byte_len],
            size,
            hash_count,
        }
    }

    fn from_raw(bits: Vec<u8>, size: u64, hash_count: u32) -> Self {
        Self {
            bits,
            size,
            hash_count,
        }
    }

    /// Adds a key to the bloom filter.
    pub fn add(&mut self, key: &[u8]) {
        for i in 0..self.hash_count {
            let idx = self.index_for(key, i);
            self.set_bit(idx);
        }
    }

    /// Returns `true` if the key **might** be in the set, `false` if it is
    /// **definitely not** in the set.
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        (0..self.hash_count).all(|i| self.get_bit(self.index_for(key, i)))
    }

    /// Returns the bit-array size.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the number of hash functions.
    #[must_use]
    pub fn hash_count(&self) -> u32 {
        self.hash_count
    }

    /// Serializes the bloom filter to a writer.
    ///
    /// Wire format (all little-endian):
    /// ```text
    /// [size: u64][hash_count: u32][bits_len: u32][bits: bytes]
    /// ```
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.size.to_le_bytes())?;
        w.write_all(&self.hash_count.to_le_bytes())?;
        w.write_all(&(self.bits.len() as u32).to_le_bytes())?;
        w.write_all(&self.bits)?;
        Ok(())
    }

    /// Deserializes a bloom filter from a reader.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut buf8 = [0u8; 8];
        let mut buf4 = [0u8; 4];

        r.read_exact(&mut buf8)?;
        let size = u64::from_le_bytes(buf8);

        r.read_exact(&mut buf4)?;
        let hash_count = u32::from_le_bytes(buf4);

        r.read_exact(&mut buf4)?;
        let bits_len = u32::from_le_bytes(buf4) as usize;

        const MAX_BLOOM_BYTES: usize = 128 * 1024 * 1024;
        if bits_len > MAX_BLOOM_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("bloom filter too large: {} bytes", bits_len),
            ));
        }

        let mut bits = vec![0u8; bits_len];
        r.read_exact(&mut bits)?;

        Ok(Self::from_raw(bits, size, hash_count))
    }

    // ---- Internal helpers ----

    /// Salts `key` with hash index `i` and reduces modulo `size`, mirroring
    /// the source's per-index salted hash rather than double hashing from a
    /// fixed pair of base hashes.
    fn index_for(&self, key: &[u8], i: u32) -> u64 {
        let mut salted = Vec::with_capacity(key.len() + 4);
        salted.extend_from_slice(&i.to_le_bytes());
        salted.extend_from_slice(key);
        fnv1a_64(&salted) % self.size
    }

    fn set_bit(&mut self, idx: u64) {
        let byte_idx = (idx / 8) as usize;
        let bit_offset = (idx % 8) as u8;
        self.bits[byte_idx] |= 1 << bit_offset;
    }

    fn get_bit(&self, idx: u64) -> bool {
        let byte_idx = (idx / 8) as usize;
        let bit_offset = (idx % 8) as u8;
        (self.bits[byte_idx] >> bit_offset) & 1 == 1
    }
}

impl std::fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomFilter")
            .field("size", &self.size)
            .field("hash_count", &self.hash_count)
            .field("bytes", &self.bits.len())
            .finish()
    }
}

impl Default for BloomFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_HASH_COUNT)
    }
}

/// FNV-1a 64-bit hash.
fn fnv1a_64(data: &[u8]) -> u64 {
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
