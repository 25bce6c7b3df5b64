use std::fs;
use std::path::Path;

use log::{debug, info, trace};

use super::downsample::downsample;
use crate::bitstream::bitpacker::pack;
use crate::error::{CodecError, Result};
use crate::huffman_coding::codebook::{generate_codebook, Codebook};
use crate::huffman_coding::huffman::build_tree;
use crate::tools::archive::{payload_path, write_archive, Metadata};
use crate::tools::cli::{HzOpts, PipelineOpts};
use crate::tools::freq_count::freqs;

/// Everything needed to reverse a compress call. The payload has no header of its own, so the
/// codebook and padding must travel with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub payload: Vec<u8>,
    pub codebook: Codebook,
    pub padding: u8,
    /// Set when the lossy downsample stage ran after packing.
    pub downsampled: bool,
}

/// Compress a buffer: count frequencies, build the tree and codebook, pack the bits and
/// optionally downsample the packed bytes.
pub fn compress_bytes(
    data: &[u8],
    opts: &PipelineOpts,
) -> std::result::Result<Compressed, CodecError> {
    let table = freqs(data)?;

    let (packed, codebook, padding) = match table.iter().next() {
        // One distinct byte: every occurrence is written as a whole zero byte so the padding
        // stays 0 and the decoder can recover the exact count.
        Some((byte, _)) if table.distinct() == 1 => {
            debug!("Single symbol input ({} x {}).", data.len(), byte);
            (vec![0_u8; data.len()], Codebook::degenerate(byte), 0)
        }
        _ => {
            let tree = build_tree(&table)?;
            let codebook = generate_codebook(&tree);
            let (packed, padding) = pack(data, &codebook)?;
            (packed, codebook, padding)
        }
    };
    debug!(
        "{} symbols coded, {} bytes packed to {} with {} padding bits.",
        codebook.len(),
        data.len(),
        packed.len(),
        padding
    );

    let payload = if opts.downsample {
        let reduced = downsample(&packed);
        debug!("Downsampled {} bytes to {}.", packed.len(), reduced.len());
        reduced
    } else {
        packed
    };

    Ok(Compressed {
        payload,
        codebook,
        padding,
        downsampled: opts.downsample,
    })
}

/// Size figures reported after a file is compressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    pub original_size: u64,
    pub compressed_size: u64,
}

impl CompressionStats {
    /// original / compressed, rounded to 2 places. 0 when nothing was written.
    pub fn ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 0.0;
        }
        round2(self.original_size as f64 / self.compressed_size as f64)
    }

    /// Percent of the original size saved, rounded to 2 places. 0 for an empty original.
    pub fn space_saved(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        round2((1.0 - self.compressed_size as f64 / self.original_size as f64) * 100.0)
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Compress one file into its payload and metadata files.
pub fn compress_file(input: &Path, opts: &HzOpts) -> Result<CompressionStats> {
    let data = fs::read(input)?;
    let compressed = compress_bytes(&data, &opts.pipeline)?;

    let out = payload_path(input, opts.out_dir.as_deref());
    let meta = Metadata {
        codebook: compressed.codebook,
        padding: compressed.padding,
        downsampled: compressed.downsampled,
        original_name: input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()),
        original_size: Some(data.len() as u64),
    };
    let written = write_archive(&out, &compressed.payload, &meta, opts.force_overwrite)?;
    trace!("Wrote {} and its metadata.", out.display());

    Ok(CompressionStats {
        original_size: data.len() as u64,
        compressed_size: written,
    })
}

/// Compress every file named in opts.
pub fn compress(opts: &HzOpts) -> Result<()> {
    for name in &opts.files {
        let input = Path::new(name);
        info!("Compressing {}", input.display());
        let stats = compress_file(input, opts)?;
        info!("Original file size: {} bytes", stats.original_size);
        info!("Compressed file size: {} bytes", stats.compressed_size);
        info!("Compression ratio: {}", stats.ratio());
        info!("Space saved: {}%", stats.space_saved());
        if !opts.keep_input_files {
            fs::remove_file(input)?;
            debug!("Removed {}", input.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    const PLAIN: PipelineOpts = PipelineOpts { downsample: false };

    #[test]
    fn known_payload_test() {
        let c = compress_bytes(b"aacccccbcabb", &PLAIN).unwrap();
        assert_eq!(c.payload, vec![0b1010_0000, 0b0110_1011, 0b1100_0000]);
        assert_eq!(c.padding, 6);
        assert_eq!(c.codebook.code(b'c'), Some("0"));
        assert!(!c.downsampled);
    }

    #[test]
    fn degenerate_test() {
        for n in [1_usize, 3, 8, 13] {
            let c = compress_bytes(&vec![b'q'; n], &PLAIN).unwrap();
            assert_eq!(c.codebook, Codebook::degenerate(b'q'));
            assert_eq!(c.padding, 0);
            assert_eq!(c.payload.len(), n);
        }
    }

    #[test]
    fn empty_test() {
        assert_eq!(compress_bytes(&[], &PLAIN), Err(CodecError::EmptyInput));
    }

    #[test]
    fn deterministic_test() {
        let data: Vec<u8> = (0..5000_u32).map(|i| ((i * i) % 97) as u8).collect();
        let a = compress_bytes(&data, &PLAIN).unwrap();
        let b = compress_bytes(&data, &PLAIN).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn downsample_stage_test() {
        let data = b"aacccccbcabb";
        let c = compress_bytes(data, &PipelineOpts { downsample: true }).unwrap();
        assert!(c.downsampled);
        // packed is 3 bytes, bytes 0 and 2 are kept
        assert_eq!(c.payload, vec![0b1010_0000, 0b1100_0000]);
        assert_eq!(c.padding, 6);
    }

    #[test]
    fn stats_test() {
        let s = CompressionStats {
            original_size: 1000,
            compressed_size: 300,
        };
        assert_eq!(s.ratio(), 3.33);
        assert_eq!(s.space_saved(), 70.0);
        let empty = CompressionStats {
            original_size: 0,
            compressed_size: 0,
        };
        assert_eq!(empty.ratio(), 0.0);
        assert_eq!(empty.space_saved(), 0.0);
    }
}
