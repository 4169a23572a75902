//! Hasher instances behind a common capability trait.
//!
//! All concrete algorithms are reached through [`ContentHasher`] trait
//! objects selected by [`new_hasher`], so the streaming digest code never
//! names a specific algorithm. The `digest`-family crates (sha1/sha2/sha3/
//! md-5) share one generic wrapper; CRC32 and BLAKE3 have their own.

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use sha3::Sha3_256;

use mediahash_schema::Algorithm;

/// The capability every hasher exposes: feed bytes, then take the digest.
pub trait ContentHasher: Send {
    /// Absorb the next chunk of input.
    fn update(&mut self, data: &[u8]);

    /// Consume the hasher and return the raw digest bytes.
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

struct DigestHasher<D: Digest>(D);

impl<D: Digest + Send> ContentHasher for DigestHasher<D> {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().to_vec()
    }
}

struct Crc32Hasher(crc32fast::Hasher);

impl ContentHasher for Crc32Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().to_be_bytes().to_vec()
    }
}

struct Blake3Hasher(blake3::Hasher);

impl ContentHasher for Blake3Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().as_bytes().to_vec()
    }
}

/// Build a streaming hasher for a registered algorithm.
///
/// Returns `None` for [`Algorithm::Sample`]: the sampling hash is computed
/// by the sampler over a fixed input layout, not by streaming arbitrary
/// bytes through the registry.
pub fn new_hasher(algorithm: Algorithm) -> Option<Box<dyn ContentHasher>> {
    match algorithm {
        Algorithm::Sha1 => Some(Box::new(DigestHasher(Sha1::new()))),
        Algorithm::Sha256 => Some(Box::new(DigestHasher(Sha256::new()))),
        Algorithm::Sha512 => Some(Box::new(DigestHasher(Sha512::new()))),
        Algorithm::Sha3_256 => Some(Box::new(DigestHasher(Sha3_256::new()))),
        Algorithm::Md5 => Some(Box::new(DigestHasher(Md5::new()))),
        Algorithm::Crc32 => Some(Box::new(Crc32Hasher(crc32fast::Hasher::new()))),
        Algorithm::Blake3 => Some(Box::new(Blake3Hasher(blake3::Hasher::new()))),
        Algorithm::Sample => None,
    }
}
