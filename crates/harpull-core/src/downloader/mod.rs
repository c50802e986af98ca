//! Download worker pool.
//!
//! Runs many fetch tasks under a fixed concurrency cap: N OS threads drain
//! a shared task queue and report one `DownloadResult` per task over a
//! channel, in arrival order. Retry lives entirely inside the fetch client;
//! a task that fails here is terminal and never cancels its siblings.

mod fetch;

pub use fetch::{fetch_bytes, FetchOptions};

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};

use crate::retry::RetryPolicy;
use crate::storage;
use crate::url_model;

/// One URL to fetch and the directory its body lands in.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub url: String,
    pub dest_dir: PathBuf,
}

/// Outcome of one task. `bytes_written` is 0 on failure.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub url: String,
    pub bytes_written: u64,
    pub error: Option<String>,
}

impl DownloadResult {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Downloads all `tasks` with up to `concurrency` fetches in flight,
/// invoking `on_result` for each result as it arrives and returning the
/// full result set (arrival order, exactly one entry per task).
///
/// The destination directories must already exist; the orchestrator
/// creates them before any worker starts.
pub fn run_all(
    tasks: Vec<DownloadTask>,
    concurrency: usize,
    options: &FetchOptions,
    policy: &RetryPolicy,
    mut on_result: impl FnMut(&DownloadResult),
) -> Vec<DownloadResult> {
    let count = tasks.len();
    if count == 0 {
        return Vec::new();
    }

    let work: Arc<Mutex<VecDeque<DownloadTask>>> =
        Arc::new(Mutex::new(tasks.into_iter().collect()));
    let (tx, rx) = mpsc::channel();
    let num_workers = concurrency.max(1).min(count);
    let mut handles = Vec::with_capacity(num_workers);
    for _ in 0..num_workers {
        let work = Arc::clone(&work);
        let tx = tx.clone();
        let options = *options;
        let policy = *policy;
        handles.push(std::thread::spawn(move || loop {
            let task = match work.lock().unwrap().pop_front() {
                Some(t) => t,
                None => break,
            };
            let _ = tx.send(run_one(task, &options, &policy));
        }));
    }
    drop(tx);

    let mut results = Vec::with_capacity(count);
    for res in rx {
        on_result(&res);
        results.push(res);
    }
    for h in handles {
        h.join()
            .unwrap_or_else(|e| panic!("worker panicked: {:?}", e));
    }
    results
}

/// Fetches one task and writes the body to disk. Any failure (transport,
/// status, or storage) becomes data on the result.
fn run_one(task: DownloadTask, options: &FetchOptions, policy: &RetryPolicy) -> DownloadResult {
    let body = match fetch::fetch_bytes(&task.url, options, policy) {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(url = %task.url, error = %e, "download failed");
            return DownloadResult {
                url: task.url,
                bytes_written: 0,
                error: Some(e.to_string()),
            };
        }
    };

    let file_name = url_model::derive_filename(&task.url);
    let dest = task.dest_dir.join(&file_name);
    if dest.exists() {
        tracing::warn!(url = %task.url, file = %dest.display(), "overwriting file with colliding name");
    }
    match storage::write_atomic(&dest, &body) {
        Ok(n) => DownloadResult {
            url: task.url,
            bytes_written: n,
            error: None,
        },
        Err(e) => DownloadResult {
            url: task.url,
            bytes_written: 0,
            error: Some(format!("{:#}", e)),
        },
    }
}
