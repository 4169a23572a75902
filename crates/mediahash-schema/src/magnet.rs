//! BitTorrent-v2 magnet URI codec.
//!
//! Encodes a previously computed v2 info-hash (a 32-byte SHA-256 digest)
//! into the canonical magnet form and parses such URIs back. The `1220`
//! after `urn:btmh:` is a fixed multihash header (`0x12` = SHA-256,
//! `0x20` = 32 bytes) and is emitted verbatim; it is a format constant,
//! never computed.

use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use thiserror::Error;

use crate::algorithm::Algorithm;
use crate::cid::ContentId;

/// The v2 exact-topic marker, including the fixed multihash header.
pub const BTMH_MARKER: &str = "xt=urn:btmh:1220";

/// Hex characters in a v2 info-hash (32 bytes).
const INFO_HASH_HEX_LEN: usize = 64;

/// Validation failures for magnet strings and info-hashes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MagnetError {
    /// The string does not start with `magnet:?`.
    #[error("not a magnet URI")]
    NotMagnet,

    /// No `xt=urn:btmh:1220` topic is present.
    #[error("missing btmh v2 info-hash")]
    MissingInfoHash,

    /// The info-hash is not exactly 64 hex characters.
    #[error("info-hash must be exactly 64 hex characters")]
    InfoHashLength,

    /// The info-hash contains non-hex characters.
    #[error("info-hash contains invalid hex")]
    InvalidHex,
}

/// The data carried by a v2 magnet URI.
///
/// A descriptor is valid only with an info-hash of exactly 32 raw bytes
/// (64 hex characters); display name and size are optional extras.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagnetDescriptor {
    info_hash: String,
    display_name: Option<String>,
    size_bytes: Option<u64>,
}

impl MagnetDescriptor {
    /// Create a descriptor from a hex info-hash.
    ///
    /// Accepts either case; the stored form is lowercase.
    ///
    /// # Errors
    ///
    /// [`MagnetError::InfoHashLength`] unless exactly 64 characters,
    /// [`MagnetError::InvalidHex`] if any character is not hex.
    pub fn new(info_hash: &str) -> Result<Self, MagnetError> {
        if info_hash.len() != INFO_HASH_HEX_LEN {
            return Err(MagnetError::InfoHashLength);
        }
        if !info_hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MagnetError::InvalidHex);
        }
        Ok(Self {
            info_hash: info_hash.to_lowercase(),
            display_name: None,
            size_bytes: None,
        })
    }

    /// Attach a display name (`dn=`).
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Attach a file size in bytes (`xl=`).
    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    /// Build a descriptor from a computed identifier, if it is a v2 hash.
    ///
    /// Returns `None` unless the identifier is a 32-byte SHA-256 digest --
    /// a magnet is never invented from weaker hashes.
    pub fn from_v2_cid(cid: &ContentId, name: Option<&str>, size_bytes: Option<u64>) -> Option<Self> {
        if cid.algorithm() != Algorithm::Sha256.code() || cid.digest().len() != 32 {
            return None;
        }
        let mut desc = Self {
            info_hash: hex::encode(cid.digest()),
            display_name: None,
            size_bytes,
        };
        if let Some(name) = name {
            desc.display_name = Some(name.to_string());
        }
        Some(desc)
    }

    /// The lowercase hex info-hash (64 characters).
    pub fn info_hash(&self) -> &str {
        &self.info_hash
    }

    /// The display name, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// The file size in bytes, if any.
    pub fn size_bytes(&self) -> Option<u64> {
        self.size_bytes
    }

    /// Encode to the canonical magnet URI.
    pub fn encode(&self) -> String {
        let mut uri = format!("magnet:?{BTMH_MARKER}{}", self.info_hash);
        if let Some(name) = &self.display_name {
            let encoded = utf8_percent_encode(name, NON_ALPHANUMERIC);
            uri.push_str(&format!("&dn={encoded}"));
        }
        if let Some(size) = self.size_bytes {
            uri.push_str(&format!("&xl={size}"));
        }
        uri
    }

    /// Parse a magnet URI.
    ///
    /// Validates, in order: the `magnet:?` scheme, the presence of the
    /// `xt=urn:btmh:1220` topic, and that exactly 64 hex characters follow
    /// the multihash header. `dn=` and `xl=` are extracted opportunistically;
    /// their absence does not invalidate the parse.
    ///
    /// # Errors
    ///
    /// A [`MagnetError`] naming the first validation that failed. No
    /// partial result is ever produced.
    pub fn decode(s: &str) -> Result<Self, MagnetError> {
        let query = s.strip_prefix("magnet:?").ok_or(MagnetError::NotMagnet)?;

        let marker = query.find(BTMH_MARKER).ok_or(MagnetError::MissingInfoHash)?;
        let rest = &query[marker + BTMH_MARKER.len()..];

        let bytes = rest.as_bytes();
        if bytes.len() < INFO_HASH_HEX_LEN {
            return Err(MagnetError::InfoHashLength);
        }
        if !bytes[..INFO_HASH_HEX_LEN].iter().all(u8::is_ascii_hexdigit) {
            return Err(MagnetError::InvalidHex);
        }
        // Exactly 64: a 65th hex character means a malformed hash, not a
        // longer valid one.
        if bytes.len() > INFO_HASH_HEX_LEN && bytes[INFO_HASH_HEX_LEN].is_ascii_hexdigit() {
            return Err(MagnetError::InfoHashLength);
        }

        let info_hash = rest[..INFO_HASH_HEX_LEN].to_lowercase();

        let mut display_name = None;
        let mut size_bytes = None;
        for param in query.split('&') {
            if let Some(value) = param.strip_prefix("dn=") {
                display_name = percent_decode_str(value)
                    .decode_utf8()
                    .ok()
                    .map(|name| name.into_owned());
            } else if let Some(value) = param.strip_prefix("xl=") {
                size_bytes = value.parse::<u64>().ok();
            }
        }

        Ok(Self {
            info_hash,
            display_name,
            size_bytes,
        })
    }
}

impl std::fmt::Display for MagnetDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}
