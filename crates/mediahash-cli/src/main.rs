//! mediahash - content-addressed identifiers for media files

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mediahash_cli::cmd;
use mediahash_cli::{Cli, Commands, MagnetCommands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hash {
            files,
            algos,
            workers,
            stats,
        } => cmd::hash::hash(&files, &algos, workers, stats).await,
        Commands::Sample { files } => cmd::sample::sample(&files).await,
        Commands::Magnet { command } => match command {
            MagnetCommands::Encode {
                info_hash,
                name,
                size,
            } => cmd::magnet::encode(&info_hash, name.as_deref(), size),
            MagnetCommands::Decode { uri } => cmd::magnet::decode(&uri),
        },
    }
}
