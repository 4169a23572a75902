//! Constant-time approximate identity for arbitrarily large files.
//!
//! Hashes a bounded sample instead of the full content: the whole file
//! when it fits in the window, otherwise exactly [`SAMPLE_WINDOW`] bytes
//! read from the middle. The file size is prepended as an 8-byte
//! big-endian integer before hashing, so two files whose sampled regions
//! are byte-identical but whose sizes differ always produce different
//! identifiers. Explicitly NOT collision-resistant over full content.

use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use mediahash_schema::{Algorithm, ContentId};

use crate::error::HashError;

/// Sample size: 1 MiB.
pub const SAMPLE_WINDOW: u64 = 1024 * 1024;

/// Offset of the sampled window for a file of `size` bytes.
///
/// Files at or under the window are sampled whole (offset 0); larger
/// files are sampled from the middle.
pub fn sample_offset(size: u64) -> u64 {
    if size <= SAMPLE_WINDOW {
        0
    } else {
        (size - SAMPLE_WINDOW) / 2
    }
}

fn wrap(size: u64, sample: &[u8]) -> ContentId {
    let mut hasher = Sha256::new();
    hasher.update(size.to_be_bytes());
    hasher.update(sample);
    ContentId::new(Algorithm::Sample.code(), hasher.finalize().to_vec())
}

/// Compute the sampling identifier for a file (async I/O).
///
/// # Errors
///
/// I/O failures opening, seeking, or reading the file.
pub async fn sample_file(path: &Path) -> Result<ContentId, HashError> {
    let mut file = tokio::fs::File::open(path).await?;
    let size = file.metadata().await?.len();

    if size <= SAMPLE_WINDOW {
        let mut sample = Vec::with_capacity(size as usize);
        file.read_to_end(&mut sample).await?;
        return Ok(wrap(size, &sample));
    }

    file.seek(SeekFrom::Start(sample_offset(size))).await?;
    let mut sample = vec![0u8; SAMPLE_WINDOW as usize];
    file.read_exact(&mut sample).await?;
    Ok(wrap(size, &sample))
}

/// Compute the sampling identifier with blocking I/O.
///
/// Byte-identical to [`sample_file`] for the same input file; intended
/// for use inside pool workers.
///
/// # Errors
///
/// I/O failures opening, seeking, or reading the file.
pub fn sample_file_sync(path: &Path) -> Result<ContentId, HashError> {
    let mut file = std::fs::File::open(path)?;
    let size = file.metadata()?.len();

    if size <= SAMPLE_WINDOW {
        let mut sample = Vec::with_capacity(size as usize);
        file.read_to_end(&mut sample)?;
        return Ok(wrap(size, &sample));
    }

    file.seek(SeekFrom::Start(sample_offset(size)))?;
    let mut sample = vec![0u8; SAMPLE_WINDOW as usize];
    file.read_exact(&mut sample)?;
    Ok(wrap(size, &sample))
}
