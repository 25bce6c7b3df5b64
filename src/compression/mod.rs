//! The compression module manages both directions of the codec.
//!
//! Compression happens in the following steps:
//! - Frequency count: Tally how often each byte value occurs.
//! - Huffman tree: Merge the lightest nodes until a single root remains.
//! - Codebook: Walk the tree to give every byte value its bit-string code.
//! - Bit packing: Concatenate the codes of the input and pad to a whole byte.
//! - Downsample (optional): Keep every other packed byte. This step is lossy.
//!
//! Decompression follows the inverse of the compression process.
//! - Upsample (optional): Put a zero byte back after each kept byte.
//! - Huffman decoding: Read bits until they match a code, emit its byte and start over.
//!

pub mod compress;
pub mod decompress;
pub mod downsample;
