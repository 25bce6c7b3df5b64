//! On-disk layout of a compressed file.
//!
//! `name.ext` compresses to two siblings: `name.ext.hz` holds the raw payload and
//! `name.ext.hz.json` holds the metadata record needed to decode it. The payload has no header,
//! so losing the metadata file makes it undecodable.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::huffman_coding::codebook::Codebook;

/// Suffix added to compressed payload files.
pub const PAYLOAD_SUFFIX: &str = ".hz";
/// Suffix added to a payload path to name its metadata file.
pub const METADATA_SUFFIX: &str = ".json";

/// Metadata stored next to each payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub codebook: Codebook,
    pub padding: u8,
    #[serde(default)]
    pub downsampled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_size: Option<u64>,
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

/// Where the payload for `input` goes: `input.hz`, moved into `out_dir` when given.
pub fn payload_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let payload = with_suffix(input, PAYLOAD_SUFFIX);
    match (out_dir, payload.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => payload,
    }
}

/// The metadata file belonging to a payload file.
pub fn metadata_path(payload: &Path) -> PathBuf {
    with_suffix(payload, METADATA_SUFFIX)
}

/// Where a payload is restored to. The `.hz` suffix is stripped when present; otherwise the
/// recorded original name is used, and failing that `.out` is appended.
pub fn restored_path(payload: &Path, meta: &Metadata, out_dir: Option<&Path>) -> PathBuf {
    let name = payload
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let restored = match name.strip_suffix(PAYLOAD_SUFFIX) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => meta
            .original_name
            .clone()
            .unwrap_or_else(|| format!("{}.out", name)),
    };
    match out_dir {
        Some(dir) => dir.join(restored),
        None => payload.with_file_name(restored),
    }
}

fn create(path: &Path, force: bool) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .create_new(!force)
        .open(path)
}

/// Write the payload and its metadata. Existing files are only replaced when `force` is set.
/// Returns the combined size of both files.
pub fn write_archive(
    payload_path: &Path,
    payload: &[u8],
    meta: &Metadata,
    force: bool,
) -> Result<u64> {
    let json = serde_json::to_vec_pretty(meta)?;
    let meta_path = metadata_path(payload_path);

    // Both files are opened before either is written. A new payload must never sit beside
    // stale metadata.
    let mut payload_file = create(payload_path, force)?;
    let mut meta_file = match create(&meta_path, force) {
        Ok(f) => f,
        Err(e) => {
            drop(payload_file);
            if let Err(rm) = fs::remove_file(payload_path) {
                warn!("Could not remove {}: {}", payload_path.display(), rm);
            }
            return Err(e.into());
        }
    };
    payload_file.write_all(payload)?;
    meta_file.write_all(&json)?;
    debug!(
        "Wrote {} ({} bytes) and {} ({} bytes).",
        payload_path.display(),
        payload.len(),
        meta_path.display(),
        json.len()
    );
    Ok((payload.len() + json.len()) as u64)
}

/// Read a payload and the metadata stored beside it.
pub fn read_archive(payload_path: &Path) -> Result<(Vec<u8>, Metadata)> {
    let meta_file = File::open(metadata_path(payload_path))?;
    let meta: Metadata = serde_json::from_reader(BufReader::new(meta_file))?;
    let payload = fs::read(payload_path)?;
    Ok((payload, meta))
}
