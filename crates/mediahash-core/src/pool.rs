//! Bounded worker pool for CPU-bound hashing.
//!
//! The control thread submits plain task data (path + algorithm names)
//! and receives plain result data (identifiers) back; workers share no
//! mutable state with the caller. A fair semaphore bounds concurrency, so
//! dispatch starts in FIFO order; completion order is not guaranteed.
//! There is no cancellation primitive: once dispatched, a task runs to
//! completion or failure.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Semaphore, oneshot};
use tracing::{debug, warn};

use mediahash_schema::ContentId;

use crate::digest::digest_file_sync;
use crate::error::HashError;

/// Default number of concurrent workers.
pub const DEFAULT_WORKERS: usize = 4;

/// Pool construction parameters.
///
/// The worker count is explicit and validated at construction; there is
/// no hidden fallback.
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    /// Maximum number of hashing tasks running at once.
    pub workers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

impl PoolConfig {
    /// A pool sized to the machine, capped at [`DEFAULT_WORKERS`].
    pub fn auto() -> Self {
        Self {
            workers: num_cpus::get().min(DEFAULT_WORKERS).max(1),
        }
    }
}

/// Dispatches per-file hashing tasks to a bounded set of blocking workers.
#[derive(Debug, Clone)]
pub struct HashPool {
    semaphore: Arc<Semaphore>,
}

impl HashPool {
    /// Create a pool with an explicit, validated configuration.
    ///
    /// # Errors
    ///
    /// [`HashError::NoWorkers`] when `workers` is zero.
    pub fn new(config: PoolConfig) -> Result<Self, HashError> {
        if config.workers == 0 {
            return Err(HashError::NoWorkers);
        }
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(config.workers)),
        })
    }

    /// Submit a hashing task; the receiver resolves when the task does.
    ///
    /// Tasks beyond pool capacity queue on the semaphore in submission
    /// order. A failure (including a worker panic) resolves only this
    /// task's receiver; the pool and all other tasks are unaffected.
    pub fn submit<S: AsRef<str>>(
        &self,
        path: impl Into<PathBuf>,
        algorithms: &[S],
    ) -> oneshot::Receiver<Result<Vec<ContentId>, HashError>> {
        let path = path.into();
        let names: Vec<String> = algorithms
            .iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        let semaphore = Arc::clone(&self.semaphore);
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                let _ = tx.send(Err(HashError::Worker("pool shut down".to_string())));
                return;
            };

            debug!(path = %path.display(), algorithms = ?names, "hashing task started");

            let worker_path = path.clone();
            let result =
                match tokio::task::spawn_blocking(move || digest_file_sync(&worker_path, &names))
                    .await
                {
                    Ok(result) => result,
                    Err(join_err) => Err(HashError::Worker(join_err.to_string())),
                };

            if let Err(err) = &result {
                warn!(path = %path.display(), error = %err, "hashing task failed");
            }

            // Receiver may have been dropped; that only discards this result.
            let _ = tx.send(result);
        });

        rx
    }

    /// Submit and await in one step.
    ///
    /// # Errors
    ///
    /// The task's own failure, or [`HashError::Worker`] if the task was
    /// dropped before producing a result.
    pub async fn compute<S: AsRef<str>>(
        &self,
        path: impl Into<PathBuf>,
        algorithms: &[S],
    ) -> Result<Vec<ContentId>, HashError> {
        self.submit(path, algorithms)
            .await
            .map_err(|_| HashError::Worker("task dropped before completing".to_string()))?
    }
}

impl Default for HashPool {
    fn default() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(DEFAULT_WORKERS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediahash_schema::Algorithm;
    use std::io::Write;

    #[test]
    fn auto_config_always_has_workers() {
        let config = PoolConfig::auto();
        assert!(config.workers >= 1);
        assert!(config.workers <= DEFAULT_WORKERS);
        HashPool::new(config).unwrap();
    }

    #[test]
    fn zero_workers_is_a_construction_error() {
        let err = HashPool::new(PoolConfig { workers: 0 }).unwrap_err();
        assert!(matches!(err, HashError::NoWorkers));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn six_tasks_on_four_workers_all_resolve() {
        let pool = HashPool::new(PoolConfig::default()).unwrap();

        let mut files = Vec::new();
        for i in 0..6 {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(format!("file number {i}").as_bytes()).unwrap();
            file.flush().unwrap();
            files.push(file);
        }

        let receivers: Vec<_> = files
            .iter()
            .map(|file| pool.submit(file.path(), &["sha256", "crc32"]))
            .collect();

        for rx in receivers {
            let cids = rx.await.unwrap().unwrap();
            assert_eq!(cids.len(), 2);
            assert_eq!(cids[0].algorithm(), Algorithm::Sha256.code());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn failing_task_rejects_only_itself() {
        let pool = HashPool::default();

        let mut good = Vec::new();
        for i in 0..5 {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(format!("survivor {i}").as_bytes()).unwrap();
            file.flush().unwrap();
            good.push(file);
        }

        let mut receivers: Vec<_> = good
            .iter()
            .take(2)
            .map(|file| pool.submit(file.path(), &["sha256"]))
            .collect();
        // Deliberately failing 3rd task: the path does not exist.
        receivers.push(pool.submit("/nonexistent/no-such-file.mkv", &["sha256"]));
        receivers.extend(
            good.iter()
                .skip(2)
                .map(|file| pool.submit(file.path(), &["sha256"])),
        );

        let mut outcomes = Vec::new();
        for rx in receivers {
            outcomes.push(rx.await.unwrap());
        }

        assert_eq!(outcomes.len(), 6);
        assert!(outcomes[2].is_err());
        for (i, outcome) in outcomes.iter().enumerate() {
            if i != 2 {
                assert!(outcome.is_ok(), "task {i} should have survived");
            }
        }

        // Pool remains usable after a failure.
        let again = pool.compute(good[0].path(), &["md5"]).await.unwrap();
        assert_eq!(again.len(), 1);
    }

    #[tokio::test]
    async fn compute_convenience_matches_submit() {
        let pool = HashPool::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"compute me").unwrap();
        file.flush().unwrap();

        let direct = crate::digest::digest_file_sync(file.path(), &["blake3"]).unwrap();
        let pooled = pool.compute(file.path(), &["blake3"]).await.unwrap();
        assert_eq!(direct, pooled);
    }
}
