//! CLI parse and override tests.

use super::{Cli, CliCommand};
use carpenpi_core::config::CarpenpiConfig;
use carpenpi_core::orchestrator::FailurePolicy;
use clap::Parser;
use std::path::{Path, PathBuf};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn no_subcommand_means_run() {
    let cli = parse(&["carpenpi"]);
    assert!(cli.command.is_none());
    assert!(cli.base_dir.is_none());
    assert!(!cli.keep_going);
    assert!(cli.jobs.is_none());
}

#[test]
fn cli_parse_subcommands() {
    assert_eq!(parse(&["carpenpi", "run"]).command, Some(CliCommand::Run));
    assert_eq!(parse(&["carpenpi", "init"]).command, Some(CliCommand::Init));
    assert_eq!(parse(&["carpenpi", "urls"]).command, Some(CliCommand::Urls));
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = parse(&[
        "carpenpi",
        "run",
        "--base-dir",
        "/tmp/testhome",
        "--keep-going",
        "--jobs",
        "4",
    ]);
    assert_eq!(cli.command, Some(CliCommand::Run));
    assert_eq!(cli.base_dir.as_deref(), Some(Path::new("/tmp/testhome")));
    assert!(cli.keep_going);
    assert_eq!(cli.jobs, Some(4));
}

#[test]
fn cli_parse_config_path() {
    let cli = parse(&["carpenpi", "--config", "/etc/carpenpi.toml", "urls"]);
    assert_eq!(cli.config, Some(PathBuf::from("/etc/carpenpi.toml")));
}

#[test]
fn cli_rejects_bad_jobs() {
    assert!(Cli::try_parse_from(["carpenpi", "--jobs", "many"]).is_err());
}

#[test]
fn flags_override_config() {
    let cli = parse(&["carpenpi", "--base-dir", "/srv", "--keep-going", "--jobs", "3"]);
    let mut cfg = CarpenpiConfig::default();
    cli.apply_overrides(&mut cfg);
    assert_eq!(cfg.base_dir, Some(PathBuf::from("/srv")));
    assert_eq!(cfg.failure_policy, FailurePolicy::Continue);
    assert_eq!(cfg.max_concurrent, 3);
}

#[test]
fn absent_flags_keep_config() {
    let cli = parse(&["carpenpi"]);
    let mut cfg = CarpenpiConfig {
        base_dir: Some(PathBuf::from("/data")),
        max_concurrent: 2,
        ..CarpenpiConfig::default()
    };
    cli.apply_overrides(&mut cfg);
    assert_eq!(cfg.base_dir, Some(PathBuf::from("/data")));
    assert_eq!(cfg.failure_policy, FailurePolicy::FailFast);
    assert_eq!(cfg.max_concurrent, 2);
}
