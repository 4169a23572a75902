//! Hash command: streaming digests through the worker pool.
//!
//! The command doubles as the control thread of the pipeline: it owns the
//! hash tracker, submits tasks to the pool, and advances each file's
//! lifecycle as results come back.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use mediahash_core::tracker::{HashMeta, TaskOutcome};
use mediahash_core::{HashPool, HashTracker, PoolConfig};
use mediahash_schema::Algorithm;

/// Compute content identifiers for each file and print them.
pub async fn hash(files: &[PathBuf], algos: &str, workers: usize, stats: bool) -> Result<()> {
    let names: Vec<String> = algos
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect();

    // Labels for the output lines: the supported subset, in request order,
    // mirroring the filtering the digest pass applies.
    let labels: Vec<&'static str> = names
        .iter()
        .filter_map(|name| Algorithm::from_name(name))
        .map(Algorithm::name)
        .collect();

    let pool = HashPool::new(PoolConfig { workers })?;
    let mut tracker = HashTracker::default();

    for file in files {
        tracker.add_pending(file.display().to_string(), HashMeta::default());
    }

    // Submit everything up front; the pool bounds actual concurrency.
    let receivers: Vec<_> = files
        .iter()
        .map(|file| {
            tracker.start(&file.display().to_string());
            (file, Instant::now(), pool.submit(file, &names))
        })
        .collect();

    let mut failure = None;
    for (file, submitted, rx) in receivers {
        let path = file.display().to_string();
        let result = rx.await.context("hashing task dropped")?;
        let elapsed_ms = submitted.elapsed().as_millis() as u64;

        match result {
            Ok(cids) => {
                let meta = HashMeta {
                    cid: cids.first().map(ToString::to_string),
                };
                tracker.complete(&path, elapsed_ms, TaskOutcome::Success, Some(meta));

                println!("{path}:");
                for (label, cid) in labels.iter().zip(&cids) {
                    println!("  {label:<10} {cid}");
                }
                if cids.is_empty() {
                    println!("  (no supported algorithms requested)");
                }
            }
            Err(err) => {
                tracker.complete(&path, elapsed_ms, TaskOutcome::Error, None);
                failure.get_or_insert_with(|| {
                    anyhow::Error::from(err).context(format!("failed to hash {path}"))
                });
            }
        }
    }

    if stats {
        println!("{}", serde_json::to_string_pretty(&tracker.snapshot())?);
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
