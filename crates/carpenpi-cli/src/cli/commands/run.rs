//! `carpenpi run` – bootstrap, bulk download, lesson mirror.

use anyhow::{Context, Result};
use carpenpi_core::config::CarpenpiConfig;
use carpenpi_core::error::RunError;
use carpenpi_core::fetch::CurlFetcher;
use carpenpi_core::lesson::HttrackMirror;
use carpenpi_core::orchestrator::RunReport;
use carpenpi_core::{orchestrator, workdir};
use std::io::{self, Write};

pub fn run_mirror(cfg: &CarpenpiConfig) -> Result<()> {
    let base = cfg.resolve_base_dir()?;
    let dir = workdir::ensure_working_dir(&base).context("working directory bootstrap failed")?;

    let fetcher = CurlFetcher::new(&cfg.http);
    let mirror = HttrackMirror::new(&cfg.lesson);
    let report = match orchestrator::run(&dir, &cfg.urls, &fetcher, &mirror, cfg.run_options()) {
        Ok(report) => report,
        Err(err) => {
            // Downloads that failed before the lesson step must still reach the user.
            if let RunError::Lesson { report, .. } = &err {
                write_failures(report, &mut io::stderr().lock());
            }
            return Err(err.into());
        }
    };

    let failed = write_failures(&report, &mut io::stderr().lock());
    if failed > 0 {
        anyhow::bail!("{} of {} downloads failed", failed, report.outcomes.len());
    }

    tracing::info!(
        files = report.outcomes.len(),
        dir = %dir.display(),
        "mirror complete"
    );
    Ok(())
}

/// Writes one `failed: <url>: <error>` line per failed download; returns how many.
fn write_failures<W: Write>(report: &RunReport, out: &mut W) -> usize {
    let mut count = 0;
    for (url, err) in report.failures() {
        let _ = writeln!(out, "failed: {url}: {err}");
        count += 1;
    }
    count
}
