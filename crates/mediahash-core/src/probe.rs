//! File inspection with bounded retry.
//!
//! Network-mounted filesystems occasionally return an "invalid argument"
//! error from metadata calls that succeed moments later. Only that error
//! class is retried, with backoff; anything else aborts immediately.
//! Either way the caller gets an absent result and exactly one diagnostic
//! log line -- never an error that would abort a larger batch.

use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use tracing::warn;

/// Backoff schedule for the retried error class.
const BACKOFF_MS: [u64; 3] = [50, 100, 200];

/// Probe a file's size, tolerating transient mount glitches.
///
/// Returns `None` when the file cannot be inspected; the reason is logged
/// once at `warn` level.
pub async fn probe_size(path: &Path) -> Option<u64> {
    let mut attempt = 0;
    loop {
        match tokio::fs::metadata(path).await {
            Ok(meta) => return Some(meta.len()),
            Err(err) if err.kind() == ErrorKind::InvalidInput => {
                if attempt >= BACKOFF_MS.len() {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "file probe gave up after {} retries",
                        BACKOFF_MS.len()
                    );
                    return None;
                }
                tokio::time::sleep(Duration::from_millis(BACKOFF_MS[attempt])).await;
                attempt += 1;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "file probe failed");
                return None;
            }
        }
    }
}
