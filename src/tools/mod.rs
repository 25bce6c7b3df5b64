//! Helper modules around the codec.
//!
//! The tools are:
//! - archive: Payload and metadata files on disk.
//! - cli: Command line interface and options.
//! - freq_count: Frequency count of the input bytes.
//!
pub mod archive;
pub mod cli;
pub mod freq_count;
