//! Bounded worker pool for independent downloads.
//!
//! Workers pull tasks from a shared queue in list order. With `stop_on_error`,
//! no new task is claimed once any task has failed; tasks already in flight
//! finish.

use super::DownloadTask;
use crate::error::DownloadError;
use crate::fetch::FileFetcher;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Mutex};
use std::thread;

pub(super) type TaskResult = (usize, Result<PathBuf, DownloadError>);

/// Runs `tasks` on up to `workers` threads. Results are sorted by task index;
/// tasks never claimed are absent.
pub(super) fn run_bounded(
    tasks: Vec<DownloadTask<'_>>,
    dest_dir: &Path,
    fetcher: &dyn FileFetcher,
    workers: usize,
    stop_on_error: bool,
) -> Vec<TaskResult> {
    let num_workers = workers.max(1).min(tasks.len());
    let queue: Mutex<VecDeque<DownloadTask<'_>>> = Mutex::new(tasks.into_iter().collect());
    let abort = AtomicBool::new(false);
    let (tx, rx) = mpsc::channel::<TaskResult>();

    thread::scope(|s| {
        for _ in 0..num_workers {
            let tx = tx.clone();
            let queue = &queue;
            let abort = &abort;
            s.spawn(move || loop {
                if abort.load(Ordering::Acquire) {
                    break;
                }
                let next = queue.lock().unwrap_or_else(|e| e.into_inner()).pop_front();
                let Some(task) = next else {
                    break;
                };
                let res = fetcher.fetch(task.url, dest_dir);
                if res.is_err() && stop_on_error {
                    abort.store(true, Ordering::Release);
                }
                if tx.send((task.index, res)).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut results: Vec<TaskResult> = rx.into_iter().collect();
    results.sort_by_key(|(index, _)| *index);
    results
}
