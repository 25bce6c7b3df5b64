//! Huffman file compression.
//!
//! Compresses a byte buffer with a classic Huffman code and packs the result into a byte-aligned
//! bitstream. The payload carries no header: the codebook and the padding count are returned
//! alongside it and must be supplied again to decompress.
//!
//! ```
//! use huffzip::compression::compress::compress_bytes;
//! use huffzip::compression::decompress::decompress_bytes;
//! use huffzip::tools::cli::PipelineOpts;
//!
//! let opts = PipelineOpts::default();
//! let c = compress_bytes(b"abracadabra", &opts).unwrap();
//! let back = decompress_bytes(&c.payload, &c.codebook, c.padding, &opts).unwrap();
//! assert_eq!(back, b"abracadabra");
//! ```
//!
//! Basic usage of the binary to compress a file is as follows:
//!
//! `$> huffzip -z test.txt`
//!
//! This writes test.txt.hz and test.txt.hz.json and deletes test.txt (use -k to keep it).
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;
