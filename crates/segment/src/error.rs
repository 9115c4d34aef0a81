//! Error type for segment writes and reads.
//!
//! [`SegmentError::Io`] and [`SegmentError::Corrupt`] are the two kinds a
//! segment manager treats as "this segment does not contain the key" and
//! swallows while moving on to the next segment. [`SegmentError::EmptyInput`]
//! is the writer's no-op signal for an empty flush.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt segment: {0}")]
    Corrupt(String),

    #[error("empty input")]
    EmptyInput,
}
