use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use log::{debug, error, info, trace, warn};

use super::downsample::upsample;
use crate::bitstream::bitreader::BitReader;
use crate::error::{CodecError, Error, Result};
use crate::huffman_coding::codebook::{Codebook, DEGENERATE_CODE};
use crate::tools::archive::{metadata_path, read_archive, restored_path};
use crate::tools::cli::{HzOpts, PipelineOpts};

/// Decode a packed bitstream. The last `padding` bits of `packed` are ignored.
pub fn unpack(
    packed: &[u8],
    codebook: &Codebook,
    padding: u8,
) -> std::result::Result<Vec<u8>, CodecError> {
    if packed.is_empty() {
        return Err(CodecError::EmptyInput);
    }
    if padding > 7 {
        return Err(CodecError::InvalidPadding(padding));
    }
    if codebook.is_empty() {
        return Err(CodecError::CodebookIncomplete { byte: None });
    }
    let lookup = codebook.invert()?;
    // No candidate longer than the longest code can ever match.
    let max_len = codebook.iter().map(|(_, c)| c.len()).max().unwrap_or(0);

    let mut br = BitReader::with_limit(packed, packed.len() * 8 - padding as usize);
    trace!("Unpacking {} bits.", br.remaining());
    let mut output = Vec::with_capacity(packed.len() * 2);
    let mut candidate = String::with_capacity(max_len);

    while let Some(bit) = br.bool_bit() {
        candidate.push(if bit { '1' } else { '0' });
        if let Some(&byte) = lookup.get(candidate.as_str()) {
            output.push(byte);
            candidate.clear();
        } else if candidate.len() >= max_len {
            error!("No code matches {} at {}.", candidate, br.loc());
            return Err(CodecError::CorruptBitstream {
                leftover: candidate.len() + br.remaining(),
            });
        }
    }

    if !candidate.is_empty() {
        return Err(CodecError::CorruptBitstream {
            leftover: candidate.len(),
        });
    }
    Ok(output)
}

/// Decode a single-symbol payload, where each zero byte stands for one occurrence.
fn unpack_degenerate(
    payload: &[u8],
    byte: u8,
    padding: u8,
) -> std::result::Result<Vec<u8>, CodecError> {
    if padding != 0 {
        return Err(CodecError::InvalidPadding(padding));
    }
    if let Some(pos) = payload.iter().position(|&b| b != 0) {
        return Err(CodecError::CorruptBitstream {
            leftover: (payload.len() - pos) * 8,
        });
    }
    Ok(vec![byte; payload.len()])
}

/// Reverse `compress_bytes`: undo the downsample stage if it ran, then decode the bitstream.
pub fn decompress_bytes(
    payload: &[u8],
    codebook: &Codebook,
    padding: u8,
    opts: &PipelineOpts,
) -> std::result::Result<Vec<u8>, CodecError> {
    if payload.is_empty() {
        return Err(CodecError::EmptyInput);
    }
    let restored;
    let packed = if opts.downsample {
        restored = upsample(payload);
        debug!("Upsampled {} bytes to {}.", payload.len(), restored.len());
        restored.as_slice()
    } else {
        payload
    };

    match codebook.sole_symbol() {
        Some(byte) => {
            codebook.validate()?;
            match codebook.code(byte) {
                Some(DEGENERATE_CODE) => unpack_degenerate(packed, byte, padding),
                code => Err(CodecError::InvalidCode {
                    byte,
                    code: code.unwrap_or_default().to_string(),
                }),
            }
        }
        None => unpack(packed, codebook, padding),
    }
}

/// Restore one payload file next to it (or into the output directory).
pub fn decompress_file(input: &Path, opts: &HzOpts) -> Result<u64> {
    let (payload, meta) = read_archive(input)?;
    let pipeline = PipelineOpts {
        downsample: meta.downsampled,
    };
    let data = decompress_bytes(&payload, &meta.codebook, meta.padding, &pipeline)?;
    if let Some(expected) = meta.original_size {
        let actual = data.len() as u64;
        if expected != actual {
            // The downsample stage is known to change the length; anything else is corruption.
            if meta.downsampled {
                warn!(
                    "{} restored to {} bytes, expected {}.",
                    input.display(),
                    actual,
                    expected
                );
            } else {
                error!(
                    "{} restored to {} bytes, expected {}.",
                    input.display(),
                    actual,
                    expected
                );
                return Err(Error::SizeMismatch { expected, actual });
            }
        }
    }

    let out = restored_path(input, &meta, opts.out_dir.as_deref());
    let mut f_out = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .create_new(!opts.force_overwrite)
        .open(&out)?;
    f_out.write_all(&data)?;
    info!("Restored {} ({} bytes).", out.display(), data.len());
    Ok(data.len() as u64)
}

/// Decompress every file named in opts.
pub fn decompress(opts: &HzOpts) -> Result<()> {
    for name in &opts.files {
        let input = Path::new(name);
        info!("Decompressing {}", input.display());
        decompress_file(input, opts)?;
        if !opts.keep_input_files {
            fs::remove_file(input)?;
            fs::remove_file(metadata_path(input))?;
            debug!("Removed {} and its metadata.", input.display());
        }
    }
    Ok(())
}

/// Compress and decompress every file named in opts in memory, checking the result matches.
pub fn test_integrity(opts: &HzOpts) -> Result<()> {
    for name in &opts.files {
        let data = fs::read(name)?;
        let c = super::compress::compress_bytes(&data, &opts.pipeline)?;
        let back = decompress_bytes(&c.payload, &c.codebook, c.padding, &opts.pipeline)?;
        if back != data {
            error!("{}: round trip mismatch.", name);
            return Err(io::Error::new(io::ErrorKind::InvalidData, "round trip mismatch").into());
        }
        info!("{}: ok", name);
    }
    Ok(())
}
