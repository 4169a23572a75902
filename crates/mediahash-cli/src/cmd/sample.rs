//! Sample command: constant-time approximate identifiers.

use std::path::PathBuf;

use anyhow::{Context, Result};

use mediahash_core::probe::probe_size;
use mediahash_core::sample::sample_file;

/// Compute and print the sampling identifier for each file.
///
/// Files that cannot be probed are skipped with a note instead of
/// aborting the rest of the batch.
pub async fn sample(files: &[PathBuf]) -> Result<()> {
    for file in files {
        if probe_size(file).await.is_none() {
            eprintln!("{}: skipped (not readable)", file.display());
            continue;
        }
        let cid = sample_file(file)
            .await
            .with_context(|| format!("failed to sample {}", file.display()))?;
        println!("{}: {cid}", file.display());
    }
    Ok(())
}
