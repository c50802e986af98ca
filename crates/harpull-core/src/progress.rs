//! Progress aggregation for one HAR batch.
//!
//! Workers report results over the pool's channel; the single receiver
//! applies one logical update per result to `BatchStats`, so counters never
//! lose or double-count a completion. Rate and ETA are derived on every
//! snapshot, never stored.

use std::time::Instant;

use crate::downloader::DownloadResult;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Point-in-time view of a running batch, handed to observers.
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    /// Number of tasks submitted for this HAR file.
    pub total: usize,
    /// Tasks that downloaded and wrote successfully.
    pub completed: usize,
    /// Tasks that failed terminally.
    pub failed: usize,
    /// Successfully written payload, in MiB.
    pub total_mib: f64,
    /// Wall time since the batch started, in seconds.
    pub elapsed_secs: f64,
}

impl ProgressSnapshot {
    /// Tasks resolved so far (success or failure).
    pub fn finished(&self) -> usize {
        self.completed + self.failed
    }

    /// Download rate in MiB/s (0 if elapsed is 0).
    pub fn mib_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.total_mib / self.elapsed_secs
    }

    /// Estimated seconds until the batch drains (None before the first
    /// result arrives).
    pub fn eta_secs(&self) -> Option<f64> {
        let remaining = self.total.saturating_sub(self.finished());
        if remaining == 0 {
            return Some(0.0);
        }
        if self.finished() == 0 || self.elapsed_secs <= 0.0 {
            return None;
        }
        let per_task = self.elapsed_secs / self.finished() as f64;
        Some(remaining as f64 * per_task)
    }

    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.finished() as f64 / self.total as f64).min(1.0)
    }
}

/// Frozen end-of-batch stats, rendered as the summary row.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// HAR file base name (extension stripped).
    pub har_name: String,
    pub total: usize,
    pub downloaded: usize,
    pub failed: usize,
    pub total_mib: f64,
    pub elapsed_secs: f64,
}

impl BatchSummary {
    /// Overall rate in MiB/s (0 if elapsed is 0).
    pub fn mib_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.total_mib / self.elapsed_secs
    }
}

/// Accumulator for one HAR file's downloads. Owned by the orchestrator;
/// updated only through `record` on the result-channel consumer side.
#[derive(Debug)]
pub struct BatchStats {
    total_tasks: usize,
    completed: usize,
    failed: usize,
    total_mib: f64,
    started: Instant,
}

impl BatchStats {
    /// Starts the clock for a batch of `total_tasks` downloads.
    pub fn start(total_tasks: usize) -> Self {
        Self {
            total_tasks,
            completed: 0,
            failed: 0,
            total_mib: 0.0,
            started: Instant::now(),
        }
    }

    /// Applies one result. Counters only grow; `completed + failed` never
    /// exceeds the task total because the pool emits exactly one result
    /// per task.
    pub fn record(&mut self, result: &DownloadResult) {
        debug_assert!(self.completed + self.failed < self.total_tasks);
        if result.succeeded() {
            self.completed += 1;
            self.total_mib += result.bytes_written as f64 / BYTES_PER_MIB;
        } else {
            self.failed += 1;
        }
    }

    /// Current view with elapsed time recomputed now.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.total_tasks,
            completed: self.completed,
            failed: self.failed,
            total_mib: self.total_mib,
            elapsed_secs: self.started.elapsed().as_secs_f64(),
        }
    }

    /// Freezes the stats into the end-of-batch summary.
    pub fn finalize(&self, har_name: &str) -> BatchSummary {
        BatchSummary {
            har_name: har_name.to_string(),
            total: self.total_tasks,
            downloaded: self.completed,
            failed: self.failed,
            total_mib: self.total_mib,
            elapsed_secs: self.started.elapsed().as_secs_f64(),
        }
    }
}

/// Observer for live rendering; the engine emits an update after every
/// single task completion. All methods default to no-ops so consumers
/// implement only what they render.
pub trait ProgressReporter {
    /// A batch of `total` downloads for `har_name` is about to run.
    fn on_batch_start(&mut self, _har_name: &str, _total: usize) {}

    /// One task resolved; useful for per-URL failure lines.
    fn on_result(&mut self, _result: &DownloadResult) {}

    /// Aggregate state after a task resolved.
    fn on_progress(&mut self, _snapshot: &ProgressSnapshot) {}

    /// The batch drained; `summary` is final.
    fn on_batch_end(&mut self, _summary: &BatchSummary) {}
}

/// Reporter that renders nothing. For tests and headless callers.
#[derive(Debug, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {}
