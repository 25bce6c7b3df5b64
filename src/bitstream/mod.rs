//! The bitstream module forms the bit-level I/O for huffzip.
//!
//! Codes are packed most significant bit first and the final byte is padded with zero bits. The
//! number of padding bits is not stored in the stream; it travels in the metadata instead.
//!
pub mod bitpacker;
pub mod bitreader;
