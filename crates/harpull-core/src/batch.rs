//! Per-HAR batch orchestration: extract URLs, run the pool, summarize.

use anyhow::Result;
use std::path::Path;

use crate::config::HarpullConfig;
use crate::downloader::{self, DownloadTask, FetchOptions};
use crate::har;
use crate::progress::{BatchStats, BatchSummary, ProgressReporter};
use crate::storage;

/// Downloads all image URLs referenced by `har_path` into
/// `download_root/<har base name>/`, with up to `concurrency` fetches in
/// flight, and returns the frozen batch summary.
///
/// Individual download failures are tallied, not propagated; the batch
/// always drains every extracted URL. Only file-level problems (unreadable
/// HAR, bad JSON, uncreatable directory) are errors.
pub fn process_har_file(
    har_path: &Path,
    download_root: &Path,
    concurrency: usize,
    config: &HarpullConfig,
    reporter: &mut dyn ProgressReporter,
) -> Result<BatchSummary> {
    let har_name = har_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "capture".to_string());

    // Created once, before any worker runs.
    let target_dir = download_root.join(&har_name);
    storage::ensure_dir(&target_dir)?;

    let urls = har::extract_image_urls(har_path)?;
    reporter.on_batch_start(&har_name, urls.len());
    tracing::info!(har = %har_name, images = urls.len(), concurrency, "starting batch");

    let tasks: Vec<DownloadTask> = urls
        .into_iter()
        .map(|url| DownloadTask {
            url,
            dest_dir: target_dir.clone(),
        })
        .collect();

    let mut stats = BatchStats::start(tasks.len());
    let options = FetchOptions {
        timeout: config.request_timeout(),
    };
    let policy = config.retry_policy();
    downloader::run_all(tasks, concurrency, &options, &policy, |result| {
        stats.record(result);
        reporter.on_result(result);
        reporter.on_progress(&stats.snapshot());
    });

    let summary = stats.finalize(&har_name);
    reporter.on_batch_end(&summary);
    tracing::info!(
        har = %har_name,
        downloaded = summary.downloaded,
        failed = summary.failed,
        mib = summary.total_mib,
        "batch complete"
    );
    Ok(summary)
}
