//! mediahash-schema - identifier types and wire formats
//!
//! Pure types shared across the workspace: the algorithm registry, the
//! self-describing content identifier codec, and the BitTorrent-v2 magnet
//! codec. No I/O happens in this crate; everything here is a deterministic
//! transform over bytes and strings.

pub mod algorithm;
pub mod cid;
pub mod magnet;

// Re-exports
pub use algorithm::Algorithm;
pub use cid::{CidError, ContentId};
pub use magnet::{MagnetDescriptor, MagnetError};
