use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::orchestrator::{FailurePolicy, RunOptions};
use crate::workdir;

/// HTTP settings for the per-URL fetcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    /// Connect timeout in seconds. The transfer itself is not time-limited.
    pub connect_timeout_secs: u64,
    /// Value sent as `User-Agent`.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            user_agent: format!("carpenpi/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Settings for the lesson mirroring step (an external site mirroring tool).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LessonConfig {
    /// Mirroring program, looked up on PATH.
    pub tool: String,
    /// Site to mirror.
    pub site_url: String,
    /// Extra arguments appended after the output directory.
    pub extra_args: Vec<String>,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            tool: "httrack".to_string(),
            site_url: "https://datacarpentry.org/".to_string(),
            extra_args: Vec::new(),
        }
    }
}

/// Global configuration loaded from `~/.config/carpenpi/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CarpenpiConfig {
    /// Base path for the working directory (None = home directory).
    pub base_dir: Option<PathBuf>,
    /// URLs fetched into the working directory, in order. Left out of the
    /// written file while it equals the built-in catalogue.
    #[serde(skip_serializing_if = "is_builtin_catalog")]
    pub urls: Vec<String>,
    /// What to do when one URL fails: "fail-fast" (default) or "continue".
    pub failure_policy: FailurePolicy,
    /// Number of downloads in flight at once. 1 = strictly sequential.
    pub max_concurrent: usize,
    pub http: HttpConfig,
    pub lesson: LessonConfig,
}

impl Default for CarpenpiConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            urls: catalog::default_urls(),
            failure_policy: FailurePolicy::default(),
            max_concurrent: 1,
            http: HttpConfig::default(),
            lesson: LessonConfig::default(),
        }
    }
}

impl CarpenpiConfig {
    /// Base path to bootstrap under: configured `base_dir`, else `$HOME`.
    pub fn resolve_base_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(p) => Ok(p.clone()),
            None => workdir::default_base_dir()
                .context("no base directory configured and $HOME is not set"),
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            failure_policy: self.failure_policy,
            max_concurrent: self.max_concurrent.max(1),
        }
    }
}

fn is_builtin_catalog(urls: &[String]) -> bool {
    urls == catalog::default_urls().as_slice()
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("carpenpi")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Parse the config file at `path`.
pub fn load_from_path(path: &Path) -> Result<CarpenpiConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CarpenpiConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CarpenpiConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CarpenpiConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}
