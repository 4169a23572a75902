//! Self-describing content identifier codec.
//!
//! A [`ContentId`] wraps a raw digest together with the registry code of
//! the algorithm that produced it. The canonical text form is versioned so
//! that future algorithm additions never change the encoding of existing
//! identifiers:
//!
//! ```text
//! mh1:<code: 4 hex><digest length: 2 hex><digest: hex>
//! ```
//!
//! Example: a SHA-256 digest encodes as `mh1:001220<64 hex chars>`.
//! Decoding a valid identifier always recovers the exact algorithm code
//! and digest bytes that produced it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version tag prefixing every encoded identifier.
pub const CID_VERSION_TAG: &str = "mh1:";

/// Hex characters in the header that follows the version tag
/// (4 for the algorithm code, 2 for the digest length).
const HEADER_HEX_LEN: usize = 6;

/// Decoding failures for malformed identifier strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidError {
    /// The string does not start with a known version tag.
    #[error("unknown identifier version tag")]
    UnknownVersion,

    /// The string ends before the code and length fields are complete.
    #[error("identifier header is truncated")]
    TruncatedHeader,

    /// The header or digest contains non-hex characters.
    #[error("identifier contains invalid hex")]
    InvalidHex,

    /// The declared digest length does not match the digest bytes present.
    #[error("digest length mismatch: declared {declared}, got {actual}")]
    LengthMismatch {
        /// Length announced by the header.
        declared: usize,
        /// Length of the digest bytes actually present.
        actual: usize,
    },
}

/// A digest tagged with the registry code of the algorithm that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId {
    algorithm: u16,
    digest: Vec<u8>,
}

impl ContentId {
    /// Wrap a raw digest with its algorithm code.
    pub fn new(algorithm: u16, digest: Vec<u8>) -> Self {
        Self { algorithm, digest }
    }

    /// Registry code of the producing algorithm.
    pub fn algorithm(&self) -> u16 {
        self.algorithm
    }

    /// Raw digest bytes.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Encode to the canonical text form.
    pub fn encode(&self) -> String {
        format!(
            "{CID_VERSION_TAG}{:04x}{:02x}{}",
            self.algorithm,
            self.digest.len(),
            hex::encode(&self.digest)
        )
    }

    /// Decode a canonical identifier string.
    ///
    /// # Errors
    ///
    /// Returns a [`CidError`] naming the validation that failed: wrong
    /// version tag, truncated header, invalid hex, or a digest length
    /// field that disagrees with the bytes present.
    pub fn decode(s: &str) -> Result<Self, CidError> {
        let body = s
            .strip_prefix(CID_VERSION_TAG)
            .ok_or(CidError::UnknownVersion)?;

        if !body.is_ascii() {
            return Err(CidError::InvalidHex);
        }
        if body.len() < HEADER_HEX_LEN {
            return Err(CidError::TruncatedHeader);
        }

        let algorithm =
            u16::from_str_radix(&body[..4], 16).map_err(|_| CidError::InvalidHex)?;
        let declared =
            usize::from_str_radix(&body[4..6], 16).map_err(|_| CidError::InvalidHex)?;
        let digest = hex::decode(&body[HEADER_HEX_LEN..]).map_err(|_| CidError::InvalidHex)?;

        if digest.len() != declared {
            return Err(CidError::LengthMismatch {
                declared,
                actual: digest.len(),
            });
        }

        Ok(Self { algorithm, digest })
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl std::str::FromStr for ContentId {
    type Err = CidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{ALGORITHMS, Algorithm};

    #[test]
    fn round_trip_every_registered_algorithm() {
        for algo in ALGORITHMS {
            let digest: Vec<u8> = (0..algo.digest_len()).map(|i| i as u8).collect();
            let cid = ContentId::new(algo.code(), digest.clone());
            let decoded = ContentId::decode(&cid.encode()).unwrap();
            assert_eq!(decoded.algorithm(), algo.code());
            assert_eq!(decoded.digest(), digest.as_slice());
        }
    }

    #[test]
    fn encoded_form_is_stable() {
        let cid = ContentId::new(Algorithm::Sha256.code(), vec![0xab; 32]);
        let text = cid.encode();
        assert!(text.starts_with("mh1:001220"));
        assert_eq!(text.len(), CID_VERSION_TAG.len() + 6 + 64);
    }

    #[test]
    fn wrong_version_tag_fails() {
        assert_eq!(
            ContentId::decode("mh2:001220ab"),
            Err(CidError::UnknownVersion)
        );
        assert_eq!(ContentId::decode(""), Err(CidError::UnknownVersion));
    }

    #[test]
    fn truncated_header_fails() {
        assert_eq!(ContentId::decode("mh1:0012"), Err(CidError::TruncatedHeader));
    }

    #[test]
    fn length_mismatch_fails() {
        // Header declares 32 bytes, only 4 present.
        let err = ContentId::decode("mh1:001220deadbeef").unwrap_err();
        assert_eq!(
            err,
            CidError::LengthMismatch {
                declared: 32,
                actual: 4
            }
        );
    }

    #[test]
    fn invalid_hex_fails() {
        assert_eq!(
            ContentId::decode("mh1:zz1220deadbeef"),
            Err(CidError::InvalidHex)
        );
        assert_eq!(
            ContentId::decode("mh1:000102zz"),
            Err(CidError::InvalidHex)
        );
    }

    #[test]
    fn empty_digest_round_trips() {
        let cid = ContentId::new(0x12, Vec::new());
        let decoded = ContentId::decode(&cid.encode()).unwrap();
        assert!(decoded.digest().is_empty());
    }
}
