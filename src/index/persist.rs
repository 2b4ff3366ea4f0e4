//! On-disk index format.
//!
//! ```text
//! [0..8)   magic "VAIDYAIX"
//! [8..12)  format version (u32 LE)
//! [12..16) dimension (u32 LE)
//! [16..24) row count (u64 LE)
//! [24..56) BLAKE3 of the payload
//! [56..64) zero padding
//! [64..)   rkyv archive of `StoredIndex` (ids, per-row fingerprints, vectors)
//! ```
//!
//! The header is 64 bytes so the archive starts 16-byte aligned inside the mmap.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use memmap2::Mmap;
use rkyv::rancor::Error as RkyvError;
use rkyv::{Archive, Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{RecommendError, RecommendResult};

use super::RowLabel;

pub const INDEX_MAGIC: &[u8; 8] = b"VAIDYAIX";
pub const INDEX_FORMAT_VERSION: u32 = 2;
pub const INDEX_HEADER_LEN: usize = 64;

const CHECKSUM_RANGE: std::ops::Range<usize> = 24..56;

#[derive(Archive, Serialize, Deserialize, Debug, PartialEq)]
struct StoredIndex {
    dim: u32,
    ids: Vec<String>,
    fingerprints: Vec<[u8; 32]>,
    vectors: Vec<f32>,
}

/// Decoded contents of an index file.
#[derive(Debug)]
pub(super) struct LoadedIndex {
    pub dim: usize,
    pub labels: Vec<RowLabel>,
    pub vectors: Vec<f32>,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> RecommendError + '_ {
    move |source| RecommendError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub(super) fn write_index(
    path: &Path,
    dim: usize,
    rows: usize,
    labels: &[RowLabel],
    vectors: &[f32],
) -> RecommendResult<()> {
    let dim_u32 = u32::try_from(dim)
        .map_err(|_| RecommendError::validation("dim", format!("dimension {} too large", dim)))?;

    let stored = StoredIndex {
        dim: dim_u32,
        ids: labels.iter().map(|l| l.id.clone()).collect(),
        fingerprints: labels.iter().map(|l| l.fingerprint).collect(),
        vectors: vectors.to_vec(),
    };
    let payload = rkyv::to_bytes::<RkyvError>(&stored).map_err(|e| {
        RecommendError::validation("index", format!("failed to serialize index: {}", e))
    })?;

    let mut header = [0u8; INDEX_HEADER_LEN];
    header[0..8].copy_from_slice(INDEX_MAGIC);
    header[8..12].copy_from_slice(&INDEX_FORMAT_VERSION.to_le_bytes());
    header[12..16].copy_from_slice(&dim_u32.to_le_bytes());
    header[16..24].copy_from_slice(&(rows as u64).to_le_bytes());
    header[CHECKSUM_RANGE].copy_from_slice(blake3::hash(&payload).as_bytes());

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_error(path))?;
    tmp.write_all(&header).map_err(io_error(path))?;
    tmp.write_all(&payload).map_err(io_error(path))?;
    tmp.as_file().sync_all().map_err(io_error(path))?;
    tmp.persist(path).map_err(|e| io_error(path)(e.error))?;

    info!(
        path = %path.display(),
        rows = rows,
        dim = dim,
        bytes = INDEX_HEADER_LEN + payload.len(),
        "Search index saved"
    );
    Ok(())
}

pub(super) fn read_index(path: &Path) -> RecommendResult<LoadedIndex> {
    let file = File::open(path).map_err(io_error(path))?;
    let file_len = file.metadata().map_err(io_error(path))?.len() as usize;

    if file_len < INDEX_HEADER_LEN {
        return Err(RecommendError::corrupt(
            path,
            format!("file is {} bytes, header needs {}", file_len, INDEX_HEADER_LEN),
        ));
    }

    // SAFETY: the mapping is read-only and dropped before this function returns;
    // the archive is fully copied out by deserialization.
    let mmap = unsafe { Mmap::map(&file) }.map_err(io_error(path))?;
    let (header, payload) = mmap.split_at(INDEX_HEADER_LEN);

    if &header[0..8] != INDEX_MAGIC {
        return Err(RecommendError::corrupt(path, "bad magic bytes"));
    }

    let version = u32::from_le_bytes(read_array(&header[8..12]));
    if version != INDEX_FORMAT_VERSION {
        return Err(RecommendError::corrupt(
            path,
            format!("unsupported format version {}", version),
        ));
    }

    let dim = u32::from_le_bytes(read_array(&header[12..16]));
    let rows = u64::from_le_bytes(read_array(&header[16..24]));

    if blake3::hash(payload).as_bytes() != &header[CHECKSUM_RANGE] {
        return Err(RecommendError::corrupt(path, "payload checksum mismatch"));
    }

    let stored = rkyv::from_bytes::<StoredIndex, RkyvError>(payload)
        .map_err(|e| RecommendError::corrupt(path, format!("archive validation failed: {}", e)))?;

    if stored.dim != dim || dim == 0 {
        return Err(RecommendError::corrupt(
            path,
            format!("header dimension {} disagrees with archive {}", dim, stored.dim),
        ));
    }
    if stored.ids.len() as u64 != rows
        || stored.fingerprints.len() as u64 != rows
        || stored.vectors.len() as u64 != rows.saturating_mul(u64::from(dim))
    {
        return Err(RecommendError::corrupt(
            path,
            format!(
                "expected {} rows of {} floats, found {} ids and {} floats",
                rows,
                dim,
                stored.ids.len(),
                stored.vectors.len()
            ),
        ));
    }

    debug!(path = %path.display(), rows = rows, dim = dim, "Search index loaded");

    let labels = stored
        .ids
        .into_iter()
        .zip(stored.fingerprints)
        .map(|(id, fingerprint)| RowLabel { id, fingerprint })
        .collect();

    Ok(LoadedIndex {
        dim: dim as usize,
        labels,
        vectors: stored.vectors,
    })
}

fn read_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}
