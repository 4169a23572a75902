//! Process-wide algorithm registry.
//!
//! A fixed, immutable table mapping hash algorithm names to registry codes
//! and digest lengths. Lookups are pure functions; nothing here mutates at
//! runtime. Unresolvable names yield `None` so callers can exclude them
//! from a requested set without ever producing a partial resolution.

use serde::{Deserialize, Serialize};

/// A registered hash algorithm.
///
/// Codes for the cryptographic algorithms follow the multihash registry;
/// `Sample` uses an application-reserved code since the sampling hash is
/// an identity scheme of this system, not a general-purpose digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// SHA-1 (20-byte digest).
    Sha1,
    /// SHA-256 (32-byte digest).
    Sha256,
    /// SHA-512 (64-byte digest).
    Sha512,
    /// SHA3-256 (32-byte digest).
    Sha3_256,
    /// MD5 (16-byte digest). Legacy, kept for media catalog compatibility.
    Md5,
    /// BLAKE3 (32-byte digest).
    Blake3,
    /// CRC32 (4-byte checksum).
    Crc32,
    /// The 1 MiB sampling hash (SHA-256 over size prefix + sampled window).
    Sample,
}

/// Every registered algorithm, in registry order.
pub const ALGORITHMS: [Algorithm; 8] = [
    Algorithm::Sha1,
    Algorithm::Sha256,
    Algorithm::Sha512,
    Algorithm::Sha3_256,
    Algorithm::Md5,
    Algorithm::Blake3,
    Algorithm::Crc32,
    Algorithm::Sample,
];

impl Algorithm {
    /// Registry code identifying this algorithm in encoded identifiers.
    pub const fn code(self) -> u16 {
        match self {
            Self::Sha1 => 0x11,
            Self::Sha256 => 0x12,
            Self::Sha512 => 0x13,
            Self::Sha3_256 => 0x16,
            Self::Md5 => 0xd5,
            Self::Blake3 => 0x1e,
            Self::Crc32 => 0x0132,
            Self::Sample => 0xf101,
        }
    }

    /// Digest length in bytes.
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 | Self::Sha3_256 | Self::Blake3 | Self::Sample => 32,
            Self::Sha512 => 64,
            Self::Md5 => 16,
            Self::Crc32 => 4,
        }
    }

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Sha3_256 => "sha3-256",
            Self::Md5 => "md5",
            Self::Blake3 => "blake3",
            Self::Crc32 => "crc32",
            Self::Sample => "sample",
        }
    }

    /// Resolve a name to its registry entry.
    ///
    /// Returns `None` for unknown names; callers treat that as "silently
    /// excluded", never as an error.
    pub fn from_name(name: &str) -> Option<Self> {
        ALGORITHMS.into_iter().find(|a| a.name() == name)
    }

    /// Resolve a registry code to its entry.
    pub fn from_code(code: u16) -> Option<Self> {
        ALGORITHMS.into_iter().find(|a| a.code() == code)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
