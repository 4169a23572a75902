//! mediahash-core - the hashing engine
//!
//! Computes stable, content-addressed identifiers for media files and
//! tracks the progress of that computation through a pipeline:
//!
//! - [`digest`] - single-pass, multi-algorithm streaming digests.
//! - [`sample`] - constant-time approximate identity for large files.
//! - [`pool`] - bounded worker pool keeping CPU-bound hashing off the
//!   control thread.
//! - [`tracker`] - finite-state progress tracking with bounded history.
//! - [`probe`] - file inspection with bounded retry for flaky mounts.
//!
//! The identifier and magnet wire formats live in `mediahash-schema`.

pub mod digest;
pub mod error;
pub mod hasher;
pub mod pool;
pub mod probe;
pub mod sample;
pub mod tracker;

pub use error::HashError;
pub use hasher::{ContentHasher, new_hasher};
pub use pool::{HashPool, PoolConfig};
pub use tracker::{HashTracker, PipelineTracker, ProcessTracker, TrackerConfig};
