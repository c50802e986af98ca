//! Terminal progress rendering: live bar while a batch runs, summary table
//! when it drains.

use harpull_core::downloader::DownloadResult;
use harpull_core::progress::{BatchSummary, ProgressReporter, ProgressSnapshot};
use indicatif::{ProgressBar, ProgressStyle};

/// `ProgressReporter` backed by an indicatif bar. One bar per HAR batch;
/// per-URL failure lines are printed above the bar as they arrive.
pub struct ConsoleReporter {
    bar: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { bar: None }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(
                "  {spinner:.dim} {prefix:20!} [{elapsed_precise}] [{bar:20!.cyan/dim}] {pos:>4}/{len:4} ETA {eta} {msg}",
            )
            .expect("static template")
            .progress_chars("━━╾─")
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleReporter {
    fn on_batch_start(&mut self, har_name: &str, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(Self::bar_style());
        bar.set_prefix(har_name.to_string());
        self.bar = Some(bar);
    }

    fn on_result(&mut self, result: &DownloadResult) {
        if let Some(err) = &result.error {
            let line = format!("failed {}: {}", result.url, err);
            match &self.bar {
                Some(bar) => bar.println(line),
                None => eprintln!("{line}"),
            }
        }
    }

    fn on_progress(&mut self, snapshot: &ProgressSnapshot) {
        if let Some(bar) = &self.bar {
            bar.set_position(snapshot.finished() as u64);
            bar.set_message(format!("{:.2} MiB/s", snapshot.mib_per_sec()));
        }
    }

    fn on_batch_end(&mut self, summary: &BatchSummary) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        print_summary(summary);
    }
}

/// Aligned per-HAR summary table.
fn print_summary(s: &BatchSummary) {
    let name_w = s.har_name.len().max("HAR file".len());
    println!();
    println!(
        "  {:<name_w$}  {:>6}  {:>10}  {:>6}  {:>10}  {:>11}  {:>8}",
        "HAR file", "total", "downloaded", "failed", "size (MiB)", "elapsed (s)", "MiB/s",
    );
    println!(
        "  {:<name_w$}  {:>6}  {:>10}  {:>6}  {:>10.2}  {:>11.2}  {:>8.2}",
        s.har_name,
        s.total,
        s.downloaded,
        s.failed,
        s.total_mib,
        s.elapsed_secs,
        s.mib_per_sec(),
    );
    println!();
}
