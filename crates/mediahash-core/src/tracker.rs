//! Finite-state progress tracking with bounded history.
//!
//! A [`PipelineTracker`] owns three buckets keyed by file path: pending,
//! active (in-flight), and a bounded most-recent-first history. Entries
//! move between buckets, never copy across trackers, and every operation
//! is permissive about missing keys so out-of-order or duplicate lifecycle
//! calls from the surrounding pipeline never fail.
//!
//! Two instantiations cover the pipeline:
//! - [`ProcessTracker`] - generic processing
//!   (`pending -> processing -> processed`, with a success/error flag).
//! - [`HashTracker`] - hash computation
//!   (`pending -> computing -> complete | error`).
//!
//! The tracker is owned and mutated by a single control thread; the
//! buckets need no locking by design, not because of external
//! synchronization.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// History entries retained per tracker.
pub const DEFAULT_RETAIN: usize = 100;

/// History entries returned by [`PipelineTracker::snapshot`].
pub const DEFAULT_PAGE: usize = 50;

/// Capacity settings: how much history is kept vs. how much a snapshot
/// returns. Collaborators rely on the 50-item snapshot page, so the two
/// numbers stay distinct by default.
#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    /// Maximum history entries retained (oldest evicted first).
    pub retain: usize,
    /// History entries included in a snapshot (most recent first).
    pub page: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            retain: DEFAULT_RETAIN,
            page: DEFAULT_PAGE,
        }
    }
}

/// Terminal outcome of a completed entry. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskOutcome {
    /// The work finished successfully.
    Success,
    /// The work finished with an error.
    Error,
}

/// An entry waiting to be picked up.
#[derive(Debug, Clone, Serialize)]
pub struct PendingEntry<T> {
    /// When the entry was queued.
    pub queued_at: DateTime<Utc>,
    /// Tracker-specific payload.
    pub meta: T,
}

/// An entry currently being worked on.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveEntry<T> {
    /// Carried over from the pending entry, if one existed.
    pub queued_at: Option<DateTime<Utc>>,
    /// When work started.
    pub started_at: DateTime<Utc>,
    /// Carried over from the pending entry, if one existed.
    pub meta: Option<T>,
}

/// A terminal record in the history list.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry<T> {
    /// The file path this record is about.
    pub path: String,
    /// Carried over from the lifecycle, if the entry went through it.
    pub queued_at: Option<DateTime<Utc>>,
    /// Carried over from the lifecycle, if the entry went through it.
    pub started_at: Option<DateTime<Utc>>,
    /// When the work completed.
    pub completed_at: DateTime<Utc>,
    /// Reported processing duration in milliseconds.
    pub processing_ms: u64,
    /// Terminal outcome.
    pub outcome: TaskOutcome,
    /// Tracker-specific payload (e.g. the computed identifier).
    pub meta: Option<T>,
}

/// The public read model returned by [`PipelineTracker::snapshot`].
///
/// `recent` is truncated to the configured page size while
/// `total_completed` reflects the full retained history.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerSnapshot<T> {
    /// Full pending bucket.
    pub pending: HashMap<String, PendingEntry<T>>,
    /// Full in-flight bucket.
    pub active: HashMap<String, ActiveEntry<T>>,
    /// Most recent history entries, newest first, at most one page.
    pub recent: Vec<HistoryEntry<T>>,
    /// Count of pending entries.
    pub total_pending: usize,
    /// Count of in-flight entries.
    pub total_active: usize,
    /// Count of retained history entries (may exceed `recent.len()`).
    pub total_completed: usize,
}

/// In-memory finite-state tracker for one pipeline.
#[derive(Debug, Clone)]
pub struct PipelineTracker<T> {
    config: TrackerConfig,
    pending: HashMap<String, PendingEntry<T>>,
    active: HashMap<String, ActiveEntry<T>>,
    history: VecDeque<HistoryEntry<T>>,
}

impl<T: Clone> PipelineTracker<T> {
    /// Create a tracker with explicit capacity settings.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            pending: HashMap::new(),
            active: HashMap::new(),
            history: VecDeque::new(),
        }
    }

    /// Insert (or overwrite) a pending entry, stamped with the current
    /// time. Overwriting is not an error.
    pub fn add_pending(&mut self, path: impl Into<String>, meta: T) {
        self.pending.insert(
            path.into(),
            PendingEntry {
                queued_at: Utc::now(),
                meta,
            },
        );
    }

    /// Move a pending entry into the in-flight bucket.
    ///
    /// If no pending entry exists the operation proceeds anyway with an
    /// entry carrying no queued stamp or payload -- permissive under
    /// out-of-order invocation.
    pub fn start(&mut self, path: &str) {
        let pending = self.pending.remove(path);
        self.active.insert(
            path.to_string(),
            ActiveEntry {
                queued_at: pending.as_ref().map(|entry| entry.queued_at),
                started_at: Utc::now(),
                meta: pending.map(|entry| entry.meta),
            },
        );
    }

    /// Move an in-flight entry into the history list (newest first).
    ///
    /// A missing in-flight entry produces a record with no carried-over
    /// stamps. `meta` overrides the carried payload when given. History
    /// beyond the retain cap is evicted oldest first.
    pub fn complete(
        &mut self,
        path: &str,
        processing_ms: u64,
        outcome: TaskOutcome,
        meta: Option<T>,
    ) {
        let active = self.active.remove(path);
        let entry = HistoryEntry {
            path: path.to_string(),
            queued_at: active.as_ref().and_then(|a| a.queued_at),
            started_at: active.as_ref().map(|a| a.started_at),
            completed_at: Utc::now(),
            processing_ms,
            outcome,
            meta: meta.or_else(|| active.and_then(|a| a.meta)),
        };

        self.history.push_front(entry);
        while self.history.len() > self.config.retain {
            self.history.pop_back();
        }
    }

    /// Delete a path from all three buckets. Never fails if absent --
    /// used when the underlying file disappears.
    pub fn remove(&mut self, path: &str) {
        self.pending.remove(path);
        self.active.remove(path);
        self.history.retain(|entry| entry.path != path);
    }

    /// Build the public read model.
    pub fn snapshot(&self) -> TrackerSnapshot<T> {
        TrackerSnapshot {
            pending: self.pending.clone(),
            active: self.active.clone(),
            recent: self.history.iter().take(self.config.page).cloned().collect(),
            total_pending: self.pending.len(),
            total_active: self.active.len(),
            total_completed: self.history.len(),
        }
    }

    /// Hard reset of all buckets. Not part of the per-file lifecycle.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.active.clear();
        self.history.clear();
    }
}

impl<T: Clone> Default for PipelineTracker<T> {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

/// Payload for the generic processing tracker.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessMeta {
    /// Virtual path assigned by the surrounding pipeline, if any.
    pub virtual_path: Option<String>,
}

/// Payload for the hash tracker.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HashMeta {
    /// The computed identifier, once known.
    pub cid: Option<String>,
}

/// Tracker for the generic processing pipeline
/// (`pending -> processing -> processed`).
pub type ProcessTracker = PipelineTracker<ProcessMeta>;

/// Tracker for the hash pipeline
/// (`pending -> computing -> complete | error`).
pub type HashTracker = PipelineTracker<HashMeta>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_lifecycle_lands_in_history() {
        let mut tracker = HashTracker::default();
        tracker.add_pending("a.mkv", HashMeta::default());
        tracker.start("a.mkv");
        tracker.complete(
            "a.mkv",
            120,
            TaskOutcome::Success,
            Some(HashMeta {
                cid: Some("mh1:00122000".to_string()),
            }),
        );

        let snap = tracker.snapshot();
        assert_eq!(snap.total_pending, 0);
        assert_eq!(snap.total_active, 0);
        assert_eq!(snap.total_completed, 1);

        let entry = &snap.recent[0];
        assert_eq!(entry.processing_ms, 120);
        assert_eq!(entry.outcome, TaskOutcome::Success);
        assert!(entry.queued_at.is_some());
        assert!(entry.started_at.is_some());
        assert!(entry.meta.as_ref().unwrap().cid.is_some());
    }

    #[test]
    fn complete_without_prior_lifecycle_succeeds() {
        let mut tracker = ProcessTracker::default();
        tracker.complete("missing.mkv", 50, TaskOutcome::Error, None);

        let snap = tracker.snapshot();
        assert_eq!(snap.total_completed, 1);
        let entry = &snap.recent[0];
        assert_eq!(entry.processing_ms, 50);
        assert!(entry.queued_at.is_none());
        assert!(entry.started_at.is_none());
    }

    #[test]
    fn start_without_pending_is_permissive() {
        let mut tracker = ProcessTracker::default();
        tracker.start("surprise.mkv");

        let snap = tracker.snapshot();
        assert_eq!(snap.total_active, 1);
        let entry = &snap.active["surprise.mkv"];
        assert!(entry.queued_at.is_none());
        assert!(entry.meta.is_none());
    }

    #[test]
    fn start_carries_pending_fields_over() {
        let mut tracker = ProcessTracker::default();
        tracker.add_pending(
            "carry.mkv",
            ProcessMeta {
                virtual_path: Some("/virtual/carry.mkv".to_string()),
            },
        );
        tracker.start("carry.mkv");

        let snap = tracker.snapshot();
        assert_eq!(snap.total_pending, 0);
        let entry = &snap.active["carry.mkv"];
        assert!(entry.queued_at.is_some());
        assert_eq!(
            entry.meta.as_ref().unwrap().virtual_path.as_deref(),
            Some("/virtual/carry.mkv")
        );
    }

    #[test]
    fn history_caps_at_retain_and_pages_at_page() {
        let mut tracker = HashTracker::default();
        for i in 0..101 {
            tracker.complete(&format!("file-{i}.mkv"), i, TaskOutcome::Success, None);
        }

        let snap = tracker.snapshot();
        assert_eq!(snap.total_completed, 100);
        assert_eq!(snap.recent.len(), 50);
        // Newest first: the last completion leads the page.
        assert_eq!(snap.recent[0].path, "file-100.mkv");
        // The oldest entry (file-0) was evicted.
        assert!(!tracker.history.iter().any(|e| e.path == "file-0.mkv"));
    }

    #[test]
    fn remove_clears_all_buckets_for_path() {
        let mut tracker = HashTracker::default();
        tracker.add_pending("gone.mkv", HashMeta::default());
        tracker.complete("gone.mkv", 1, TaskOutcome::Success, None);
        tracker.start("gone.mkv");
        tracker.remove("gone.mkv");

        let snap = tracker.snapshot();
        assert_eq!(snap.total_pending, 0);
        assert_eq!(snap.total_active, 0);
        assert_eq!(snap.total_completed, 0);

        // Removing again is fine.
        tracker.remove("gone.mkv");
    }

    #[test]
    fn add_pending_overwrites_without_error() {
        let mut tracker = ProcessTracker::default();
        tracker.add_pending("dup.mkv", ProcessMeta::default());
        tracker.add_pending(
            "dup.mkv",
            ProcessMeta {
                virtual_path: Some("/v/dup.mkv".to_string()),
            },
        );

        let snap = tracker.snapshot();
        assert_eq!(snap.total_pending, 1);
        assert_eq!(
            snap.pending["dup.mkv"].meta.virtual_path.as_deref(),
            Some("/v/dup.mkv")
        );
    }

    #[test]
    fn clear_is_a_hard_reset() {
        let mut tracker = HashTracker::default();
        tracker.add_pending("a", HashMeta::default());
        tracker.start("b");
        tracker.complete("c", 5, TaskOutcome::Error, None);
        tracker.clear();

        let snap = tracker.snapshot();
        assert_eq!(snap.total_pending, 0);
        assert_eq!(snap.total_active, 0);
        assert_eq!(snap.total_completed, 0);
    }

    #[test]
    fn snapshot_serializes_for_consumers() {
        let mut tracker = HashTracker::default();
        tracker.add_pending("s.mkv", HashMeta::default());
        let json = serde_json::to_value(tracker.snapshot()).unwrap();
        assert_eq!(json["total_pending"], 1);
        assert!(json["pending"]["s.mkv"]["queued_at"].is_string());
    }
}
