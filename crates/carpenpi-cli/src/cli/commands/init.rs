//! `carpenpi init` – create the working directory only.

use anyhow::{Context, Result};
use carpenpi_core::config::CarpenpiConfig;
use carpenpi_core::workdir;

pub fn run_init(cfg: &CarpenpiConfig) -> Result<()> {
    let base = cfg.resolve_base_dir()?;
    let dir = workdir::ensure_working_dir(&base).context("working directory bootstrap failed")?;
    println!("{}", dir.display());
    Ok(())
}
