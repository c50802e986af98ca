//! Operator selection state for a run.
//!
//! An explicit object the frontend mutates: selected HAR files,
//! destination folder, and the concurrency count. `start` validates the
//! selections, processes the files sequentially, and leaves the session
//! intact for another run. No process-wide state.

use anyhow::Result;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::batch;
use crate::config::HarpullConfig;
use crate::progress::{BatchSummary, ProgressReporter};

/// Parallel downloads used when the operator does not pick a count.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Why a run could not start. Reported to the operator; the selections are
/// left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no HAR files selected; select HAR files first")]
    NoFilesSelected,
    #[error("no download folder selected; select a download folder first")]
    NoFolderSelected,
}

/// Selections for one or more download runs.
#[derive(Debug)]
pub struct Session {
    har_files: Vec<PathBuf>,
    download_folder: Option<PathBuf>,
    concurrency: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            har_files: Vec::new(),
            download_folder: None,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Replaces the selected HAR files.
    pub fn select_files(&mut self, files: Vec<PathBuf>) {
        self.har_files = files;
    }

    /// Replaces the destination folder.
    pub fn select_folder(&mut self, folder: PathBuf) {
        self.download_folder = Some(folder);
    }

    pub fn har_files(&self) -> &[PathBuf] {
        &self.har_files
    }

    pub fn download_folder(&self) -> Option<&Path> {
        self.download_folder.as_deref()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Sets the concurrency cap. The pool needs at least one worker.
    pub fn set_concurrency(&mut self, concurrency: usize) {
        self.concurrency = concurrency.max(1);
    }

    /// Sets the concurrency from operator input; anything that is not a
    /// positive integer falls back to `default` (`DEFAULT_CONCURRENCY` for
    /// the stock config). Returns the value now in effect.
    pub fn set_concurrency_input(&mut self, input: &str, default: usize) -> usize {
        self.set_concurrency(parse_concurrency(input, default));
        self.concurrency
    }

    /// Checks the start preconditions without running anything.
    pub fn ready(&self) -> Result<(), SelectionError> {
        self.validated().map(|_| ())
    }

    /// Runs the selected HAR files sequentially, returning one summary per
    /// file. Rejected with a `SelectionError` (state unchanged) when files
    /// or folder are missing.
    pub fn start(
        &self,
        config: &HarpullConfig,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<Vec<BatchSummary>> {
        let (files, folder) = self.validated()?;
        let mut summaries = Vec::with_capacity(files.len());
        for har_path in files {
            summaries.push(batch::process_har_file(
                har_path,
                folder,
                self.concurrency,
                config,
                reporter,
            )?);
        }
        Ok(summaries)
    }

    fn validated(&self) -> Result<(&[PathBuf], &Path), SelectionError> {
        if self.har_files.is_empty() {
            return Err(SelectionError::NoFilesSelected);
        }
        let folder = self
            .download_folder
            .as_deref()
            .ok_or(SelectionError::NoFolderSelected)?;
        Ok((&self.har_files, folder))
    }
}

/// Positive integer from operator input, else `default`.
pub fn parse_concurrency(input: &str, default: usize) -> usize {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullReporter;

    #[test]
    fn parse_concurrency_accepts_positive_integers() {
        assert_eq!(parse_concurrency("7", 10), 7);
        assert_eq!(parse_concurrency(" 12 ", 10), 12);
    }

    #[test]
    fn parse_concurrency_falls_back() {
        assert_eq!(parse_concurrency("", 10), 10);
        assert_eq!(parse_concurrency("abc", 10), 10);
        assert_eq!(parse_concurrency("-3", 10), 10);
        assert_eq!(parse_concurrency("0", 10), 10);
    }

    #[test]
    fn start_without_files_is_rejected() {
        let session = Session::new();
        let err = session
            .start(&HarpullConfig::default(), &mut NullReporter)
            .unwrap_err();
        assert_eq!(
            err.downcast::<SelectionError>().unwrap(),
            SelectionError::NoFilesSelected
        );
    }

    #[test]
    fn start_without_folder_keeps_file_selection() {
        let mut session = Session::new();
        session.select_files(vec![PathBuf::from("/tmp/capture.har")]);

        let err = session
            .start(&HarpullConfig::default(), &mut NullReporter)
            .unwrap_err();
        assert_eq!(
            err.downcast::<SelectionError>().unwrap(),
            SelectionError::NoFolderSelected
        );
        assert_eq!(session.har_files().len(), 1);
        assert!(session.download_folder().is_none());
    }

    #[test]
    fn ready_once_both_selections_made() {
        let mut session = Session::new();
        session.select_files(vec![PathBuf::from("/tmp/capture.har")]);
        session.select_folder(PathBuf::from("/tmp/out"));
        assert!(session.ready().is_ok());
    }

    #[test]
    fn operator_input_updates_concurrency() {
        let mut session = Session::new();
        assert_eq!(session.concurrency(), DEFAULT_CONCURRENCY);
        assert_eq!(session.set_concurrency_input("4", DEFAULT_CONCURRENCY), 4);
        assert_eq!(session.concurrency(), 4);
        assert_eq!(
            session.set_concurrency_input("nope", DEFAULT_CONCURRENCY),
            DEFAULT_CONCURRENCY
        );
    }
}
