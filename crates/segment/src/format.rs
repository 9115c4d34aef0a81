//! Binary framing for segment records, the sparse index, and the footer.
//!
//! Every frame is explicit length-prefixed big-endian, so a reader can tell
//! exactly where one frame ends and the next begins without relying on a
//! decoder's end-of-stream signal:
//!
//! ```text
//! record:      key_len(u32) | key | value_len(u32) | value
//! index entry: key_len(u32) | key | offset(u64)
//! footer:      index_position(u64)
//! ```

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Size in bytes of the trailing footer.
pub const FOOTER_BYTES: u64 = 8;

/// Writes one `(key, value)` record and returns the number of bytes written.
pub fn write_record<W: Write>(w: &mut W, key: &[u8], value: &[u8]) -> io::Result<u64> {
    w.write_u32::<BigEndian>(key.len() as u32)?;
    w.write_all(key)?;
    w.write_u32::<BigEndian>(value.len() as u32)?;
    w.write_all(value)?;
    Ok(8 + key.len() as u64 + value.len() as u64)
}

/// Reads one `(key, value)` record.
pub fn read_record<R: Read>(r: &mut R) -> io::Result<(Vec<u8>, Vec<u8>)> {
    let key_len = r.read_u32::<BigEndian>()? as usize;
    let mut key = vec![0u8; key_len];
    r.read_exact(&mut key)?;
    let value_len = r.read_u32::<BigEndian>()? as usize;
    let mut value = vec![0u8; value_len];
    r.read_exact(&mut value)?;
    Ok((key, value))
}

/// Writes one sparse-index entry, `(key, offset)`.
pub fn write_index_entry<W: Write>(w: &mut W, key: &[u8], offset: u64) -> io::Result<()> {
    w.write_u32::<BigEndian>(key.len() as u32)?;
    w.write_all(key)?;
    w.write_u64::<BigEndian>(offset)?;
    Ok(())
}

/// Reads one sparse-index entry.
pub fn read_index_entry<R: Read>(r: &mut R) -> io::Result<(Vec<u8>, u64)> {
    let key_len = r.read_u32::<BigEndian>()? as usize;
    let mut key = vec![0u8; key_len];
    r.read_exact(&mut key)?;
    let offset = r.read_u64::<BigEndian>()?;
    Ok((key, offset))
}

/// Writes the 8-byte big-endian footer holding `index_position`.
pub fn write_footer<W: Write>(w: &mut W, index_position: u64) -> io::Result<()> {
    w.write_u64::<BigEndian>(index_position)
}

/// Reads an 8-byte big-endian footer.
pub fn read_footer<R: Read>(r: &mut R) -> io::Result<u64> {
    r.read_u64::<BigEndian>()
}
