//! mediahash - content-addressed identifiers for media files
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! Computes streaming multi-algorithm digests, constant-time sampling
//! identifiers, and BitTorrent-v2 magnet URIs for files on disk. Hashing
//! runs on a bounded worker pool so large batches never block each other.

pub mod cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mediahash")]
#[command(author, version, about = "Content-addressed identifiers for media files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute content identifiers for files
    Hash {
        /// Files to hash
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Comma-separated algorithm names; unknown names are skipped
        #[arg(long, default_value = "sha256")]
        algos: String,
        /// Worker pool size
        #[arg(long, default_value_t = mediahash_core::pool::DEFAULT_WORKERS)]
        workers: usize,
        /// Print a JSON tracker snapshot after hashing
        #[arg(long)]
        stats: bool,
    },
    /// Compute fast sampling identifiers (approximate identity)
    Sample {
        /// Files to sample
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Magnet URI commands
    Magnet {
        #[command(subcommand)]
        command: MagnetCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum MagnetCommands {
    /// Build a v2 magnet URI from an info-hash
    Encode {
        /// 64-hex-character v2 info-hash (SHA-256)
        #[arg(long)]
        info_hash: String,
        /// Display name for the content
        #[arg(long)]
        name: Option<String>,
        /// File size in bytes
        #[arg(long)]
        size: Option<u64>,
    },
    /// Parse a v2 magnet URI
    Decode {
        /// The magnet URI
        uri: String,
    },
}
