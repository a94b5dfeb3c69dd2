//! Bulk download: every URL into the working directory, then the lesson mirror.
//!
//! Default behaviour is strictly sequential and fail-fast: the first failing
//! URL aborts the run and the lesson step never starts. `FailurePolicy::Continue`
//! records each failure and keeps going; `max_concurrent > 1` spreads the URLs
//! over a bounded worker pool.

mod pool;

use crate::error::{DownloadError, RunError};
use crate::fetch::FileFetcher;
use crate::lesson::LessonMirror;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What a failed download does to the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort on the first failure; lesson mirroring is skipped.
    #[default]
    FailFast,
    /// Attempt every URL, record failures, still mirror lessons.
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub failure_policy: FailurePolicy,
    /// Downloads in flight at once; 1 = sequential.
    pub max_concurrent: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::FailFast,
            max_concurrent: 1,
        }
    }
}

/// One URL to fetch, identified by its position in the list.
#[derive(Debug, Clone, Copy)]
pub struct DownloadTask<'a> {
    pub index: usize,
    pub url: &'a str,
}

/// Result of one attempted download.
#[derive(Debug)]
pub struct DownloadOutcome {
    pub url: String,
    pub result: Result<PathBuf, DownloadError>,
}

/// Per-URL outcomes of a completed run, in list order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<DownloadOutcome>,
}

impl RunReport {
    pub fn downloaded(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(PathBuf::as_path))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &DownloadError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.url.as_str(), e)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Downloads every entry of `urls` into `working_dir`, then runs `mirror` once.
///
/// `working_dir` must already exist (see [`crate::workdir::ensure_working_dir`]).
pub fn run(
    working_dir: &Path,
    urls: &[String],
    fetcher: &dyn FileFetcher,
    mirror: &dyn LessonMirror,
    options: RunOptions,
) -> Result<RunReport, RunError> {
    let tasks: Vec<DownloadTask<'_>> = urls
        .iter()
        .enumerate()
        .map(|(index, url)| DownloadTask { index, url })
        .collect();
    let stop_on_error = options.failure_policy == FailurePolicy::FailFast;

    tracing::info!(
        count = tasks.len(),
        workers = options.max_concurrent,
        policy = ?options.failure_policy,
        dest = %working_dir.display(),
        "starting bulk download"
    );

    let results = if options.max_concurrent <= 1 {
        run_sequential(&tasks, working_dir, fetcher, stop_on_error)
    } else {
        pool::run_bounded(tasks, working_dir, fetcher, options.max_concurrent, stop_on_error)
    };

    let mut report = RunReport::default();
    for (index, result) in results {
        let url = urls[index].clone();
        let result = match result {
            Err(source) if stop_on_error => return Err(RunError::Download { url, source }),
            Err(e) => {
                tracing::warn!(url = %url, "download failed: {}", e);
                Err(e)
            }
            Ok(path) => Ok(path),
        };
        report.outcomes.push(DownloadOutcome { url, result });
    }

    match mirror.mirror(working_dir) {
        Ok(()) => Ok(report),
        Err(source) => Err(RunError::Lesson { source, report }),
    }
}

/// Fetches tasks one after another; with `stop_on_error` nothing after the first failure is attempted.
fn run_sequential(
    tasks: &[DownloadTask<'_>],
    dest_dir: &Path,
    fetcher: &dyn FileFetcher,
    stop_on_error: bool,
) -> Vec<pool::TaskResult> {
    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        let res = fetcher.fetch(task.url, dest_dir);
        let failed = res.is_err();
        results.push((task.index, res));
        if failed && stop_on_error {
            break;
        }
    }
    results
}
