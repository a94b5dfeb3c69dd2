//! Per-URL file download: one HTTP GET, body saved under the working directory.
//!
//! Each transfer streams into its own hidden temp file in the destination
//! directory, which is persisted under the final name only after a 2xx
//! response. Nothing is retried or verified.

use crate::config::HttpConfig;
use crate::error::DownloadError;
use crate::url_model;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

const MAX_REDIRECTS: u32 = 10;

/// Fetches one URL into a destination directory and returns the saved path.
pub trait FileFetcher: Send + Sync {
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, DownloadError>;
}

/// libcurl-backed fetcher (easy interface, blocking).
///
/// One fetcher serves one run: final paths it has handed out are remembered,
/// and a later URL with the same name gets `name (1).ext`, `name (2).ext`, ...
/// Files left by earlier runs are overwritten.
#[derive(Debug)]
pub struct CurlFetcher {
    connect_timeout: Duration,
    user_agent: String,
    claimed: Mutex<HashSet<PathBuf>>,
}

impl CurlFetcher {
    pub fn new(http: &HttpConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(http.connect_timeout_secs),
            user_agent: http.user_agent.clone(),
            claimed: Mutex::new(HashSet::new()),
        }
    }

    /// Reserves the first unclaimed `<dest_dir>/<name>` variant for this run.
    fn claim_path(&self, dest_dir: &Path, name: &str) -> PathBuf {
        let mut claimed = self.claimed.lock().unwrap_or_else(|e| e.into_inner());
        let mut n = 0;
        loop {
            let candidate = dest_dir.join(url_model::numbered_filename(name, n));
            if claimed.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Runs the GET, streaming the body into `file`. Returns the Content-Disposition value, if sent.
    fn transfer(
        &self,
        url: &str,
        file: &mut File,
        temp_path: &Path,
    ) -> Result<Option<String>, DownloadError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.useragent(&self.user_agent)?;

        let mut disposition: Option<String> = None;
        let mut write_err: Option<io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|line| {
                // A new status line starts a new header block (redirect hop).
                if line.starts_with(b"HTTP/") {
                    disposition = None;
                } else if let Some(v) = header_value(line, "content-disposition") {
                    disposition = Some(v);
                }
                true
            })?;
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    tracing::warn!("write to {} failed: {}", temp_path.display(), e);
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(source) = write_err {
            return Err(DownloadError::Write {
                path: temp_path.to_path_buf(),
                source,
            });
        }
        performed?;

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(DownloadError::HttpStatus {
                url: url.to_string(),
                code,
            });
        }
        file.flush().map_err(|source| DownloadError::Write {
            path: temp_path.to_path_buf(),
            source,
        })?;
        Ok(disposition)
    }
}

impl FileFetcher for CurlFetcher {
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, DownloadError> {
        url::Url::parse(url).map_err(|e| DownloadError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        // Dropping the temp file on any early return removes it.
        let mut temp = tempfile::Builder::new()
            .prefix(".carpenpi-")
            .suffix(".part")
            .tempfile_in(dest_dir)
            .map_err(|source| DownloadError::Write {
                path: dest_dir.to_path_buf(),
                source,
            })?;
        let temp_path = temp.path().to_path_buf();
        tracing::debug!(url, temp = %temp_path.display(), "GET");

        let disposition = self.transfer(url, temp.as_file_mut(), &temp_path)?;

        let name = url_model::derive_filename(url, disposition.as_deref());
        let final_path = self.claim_path(dest_dir, &name);
        temp.persist(&final_path)
            .map_err(|e| DownloadError::Write {
                path: final_path.clone(),
                source: e.error,
            })?;
        tracing::info!(url, path = %final_path.display(), "downloaded");
        Ok(final_path)
    }
}

/// Value of header `name` (case-insensitive) if `line` is that header.
fn header_value(line: &[u8], name: &str) -> Option<String> {
    let line = std::str::from_utf8(line).ok()?;
    let (key, value) = line.split_once(':')?;
    if key.trim().eq_ignore_ascii_case(name) {
        Some(value.trim().to_string())
    } else {
        None
    }
}
