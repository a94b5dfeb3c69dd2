//! CLI for carpenpi.

mod commands;

use anyhow::Result;
use carpenpi_core::config::{self, CarpenpiConfig};
use carpenpi_core::orchestrator::FailurePolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_init, run_mirror, run_urls};

/// Top-level CLI. With no subcommand, `run` is performed.
#[derive(Debug, Parser)]
#[command(name = "carpenpi")]
#[command(about = "Bootstrap a local mirror of Data Carpentry lesson material", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/carpenpi/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory under which `carpenpi/` is created (default: home directory).
    #[arg(long, global = true, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Keep going after a failed download; failures are reported at the end.
    #[arg(long, global = true)]
    pub keep_going: bool,

    /// Run up to N downloads at once (default 1, strictly sequential).
    #[arg(long, global = true, value_name = "N")]
    pub jobs: Option<usize>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Create the working directory, download every URL, then mirror the lessons.
    Run,

    /// Only create the working directory and print its path.
    Init,

    /// Print the configured URL list in download order.
    Urls,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = match &cli.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        cli.apply_overrides(&mut cfg);
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command.unwrap_or(CliCommand::Run) {
            CliCommand::Run => run_mirror(&cfg)?,
            CliCommand::Init => run_init(&cfg)?,
            CliCommand::Urls => run_urls(&cfg),
        }
        Ok(())
    }

    /// Command-line flags take precedence over the config file.
    pub fn apply_overrides(&self, cfg: &mut CarpenpiConfig) {
        if let Some(base) = &self.base_dir {
            cfg.base_dir = Some(base.clone());
        }
        if self.keep_going {
            cfg.failure_policy = FailurePolicy::Continue;
        }
        if let Some(jobs) = self.jobs {
            cfg.max_concurrent = jobs;
        }
    }
}

#[cfg(test)]
mod tests;
