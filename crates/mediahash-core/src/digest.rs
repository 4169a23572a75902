//! Single-pass, multi-algorithm streaming digests.
//!
//! One read of the input feeds every requested hasher: each chunk is
//! applied to all active hashers before the next read, so every algorithm
//! observes byte-identical input in the same order. I/O cost is O(size),
//! CPU cost O(size x algorithm count).
//!
//! Unknown algorithm names are silently excluded: the result corresponds
//! 1:1, in original relative order, to the supported subset of the
//! request. This is a filtering policy, not an error.

use std::io::Read;
use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt};

use mediahash_schema::{Algorithm, ContentId};

use crate::error::HashError;
use crate::hasher::{ContentHasher, new_hasher};

/// Read granularity for the streaming pass.
const CHUNK_SIZE: usize = 64 * 1024;

/// Resolve requested names against the registry, dropping unknown ones.
fn filter_supported<S: AsRef<str>>(names: &[S]) -> Vec<Algorithm> {
    names
        .iter()
        .filter_map(|name| Algorithm::from_name(name.as_ref()))
        .collect()
}

/// Instantiate one hasher per kept algorithm, all-or-nothing.
fn build_hashers(kept: &[Algorithm]) -> Result<Vec<Box<dyn ContentHasher>>, HashError> {
    kept.iter()
        .map(|algo| new_hasher(*algo).ok_or_else(|| HashError::Unsupported(algo.name().to_string())))
        .collect()
}

fn finish(kept: Vec<Algorithm>, hashers: Vec<Box<dyn ContentHasher>>) -> Vec<ContentId> {
    kept.into_iter()
        .zip(hashers)
        .map(|(algo, hasher)| ContentId::new(algo.code(), hasher.finalize()))
        .collect()
}

/// Digest a byte stream with every supported algorithm in `names`.
///
/// The stream is read sequentially exactly once. Returns one identifier
/// per supported name, in the request's relative order.
///
/// # Errors
///
/// I/O failures, or [`HashError::Unsupported`] when a kept algorithm has
/// no streaming hasher (the whole task fails; no partial result).
pub async fn digest_stream<R, S>(reader: &mut R, names: &[S]) -> Result<Vec<ContentId>, HashError>
where
    R: AsyncRead + Unpin + ?Sized,
    S: AsRef<str>,
{
    let kept = filter_supported(names);
    let mut hashers = build_hashers(&kept)?;
    if hashers.is_empty() {
        return Ok(Vec::new());
    }

    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let count = reader.read(&mut buffer).await?;
        if count == 0 {
            break;
        }
        for hasher in &mut hashers {
            hasher.update(&buffer[..count]);
        }
    }

    Ok(finish(kept, hashers))
}

/// Digest a file on disk (async I/O).
///
/// # Errors
///
/// Same contract as [`digest_stream`], plus open failures.
pub async fn digest_file<S: AsRef<str>>(
    path: &Path,
    names: &[S],
) -> Result<Vec<ContentId>, HashError> {
    let mut file = tokio::fs::File::open(path).await?;
    digest_stream(&mut file, names).await
}

/// Digest a file on disk with blocking I/O.
///
/// Byte-identical to [`digest_file`]; intended for use inside pool
/// workers where blocking is the point.
///
/// # Errors
///
/// Same contract as [`digest_stream`], plus open failures.
pub fn digest_file_sync<S: AsRef<str>>(
    path: &Path,
    names: &[S],
) -> Result<Vec<ContentId>, HashError> {
    let kept = filter_supported(names);
    let mut hashers = build_hashers(&kept)?;
    if hashers.is_empty() {
        return Ok(Vec::new());
    }

    let mut file = std::fs::File::open(path)?;
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let count = file.read(&mut buffer)?;
        if count == 0 {
            break;
        }
        for hasher in &mut hashers {
            hasher.update(&buffer[..count]);
        }
    }

    Ok(finish(kept, hashers))
}
