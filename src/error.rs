//! Error types for huffzip.
//!
//! The codec itself only ever fails with a [`CodecError`]. The file-level layer (reading inputs,
//! writing the payload and its metadata) wraps those together with I/O and JSON failures in
//! [`Error`].

use thiserror::Error;

/// Failures raised by the Huffman codec and the bitstream layers.
///
/// All of these are deterministic: the same inputs always produce the same error, so nothing
/// in the codec retries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// A zero-length buffer was given where content is required
    #[error("empty input: nothing to encode or decode")]
    EmptyInput,

    /// A byte to encode has no codebook entry, or the codebook is empty (`byte` is None)
    #[error("codebook is missing an entry (byte {byte:?})")]
    CodebookIncomplete { byte: Option<u8> },

    /// Decoding ended with bits that match no code
    #[error("corrupt bitstream: {leftover} trailing bit(s) match no code")]
    CorruptBitstream { leftover: usize },

    /// Two symbols share the same code. The tree builder never produces this.
    #[error("ambiguous codebook: code {code:?} is assigned more than once")]
    AmbiguousCodebook { code: String },

    /// A code is empty or holds something other than '0' and '1'
    #[error("invalid code {code:?} for byte {byte}")]
    InvalidCode { byte: u8, code: String },

    /// Padding is outside 0..=7 or longer than the payload itself
    #[error("invalid padding: {0}")]
    InvalidPadding(u8),
}

/// Top level error for file operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    /// The restored file does not have the size recorded at compression time
    #[error("restored {actual} bytes, metadata records {expected}")]
    SizeMismatch { expected: u64, actual: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
