//! Lesson mirroring: hand the working directory to an external site mirroring tool.

use crate::config::LessonConfig;
use crate::error::LessonDownloadError;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;

/// Mirrors lesson content into a directory.
pub trait LessonMirror: Send + Sync {
    fn mirror(&self, dest_dir: &Path) -> Result<(), LessonDownloadError>;
}

/// Runs `httrack <site> -O <dest> [extra args]` (or another tool with the same calling convention).
#[derive(Debug, Clone)]
pub struct HttrackMirror {
    tool: String,
    site_url: String,
    extra_args: Vec<String>,
}

impl HttrackMirror {
    pub fn new(cfg: &LessonConfig) -> Self {
        Self {
            tool: cfg.tool.clone(),
            site_url: cfg.site_url.clone(),
            extra_args: cfg.extra_args.clone(),
        }
    }

    /// Arguments passed to the tool for `dest_dir`.
    pub fn args(&self, dest_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            self.site_url.clone().into(),
            "-O".into(),
            dest_dir.as_os_str().to_owned(),
        ];
        args.extend(self.extra_args.iter().map(OsString::from));
        args
    }
}

impl LessonMirror for HttrackMirror {
    fn mirror(&self, dest_dir: &Path) -> Result<(), LessonDownloadError> {
        tracing::info!(tool = %self.tool, site = %self.site_url, dest = %dest_dir.display(), "mirroring lessons");
        let status = Command::new(&self.tool)
            .args(self.args(dest_dir))
            .status()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    LessonDownloadError::ToolMissing {
                        tool: self.tool.clone(),
                    }
                } else {
                    LessonDownloadError::Spawn {
                        tool: self.tool.clone(),
                        source,
                    }
                }
            })?;

        if !status.success() {
            return Err(LessonDownloadError::Failed {
                tool: self.tool.clone(),
                status,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mirror_with(tool: &str, extra: &[&str]) -> HttrackMirror {
        HttrackMirror::new(&LessonConfig {
            tool: tool.to_string(),
            site_url: "https://datacarpentry.org/".to_string(),
            extra_args: extra.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn args_put_site_then_output_dir() {
        let m = mirror_with("httrack", &["-v"]);
        let args = m.args(Path::new("/tmp/testhome/carpenpi"));
        let expected: Vec<OsString> = ["https://datacarpentry.org/", "-O", "/tmp/testhome/carpenpi", "-v"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn missing_tool_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let m = mirror_with("carpenpi-no-such-mirroring-tool", &[]);
        let err = m.mirror(dir.path()).unwrap_err();
        assert!(matches!(err, LessonDownloadError::ToolMissing { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let m = mirror_with("false", &[]);
        let err = m.mirror(dir.path()).unwrap_err();
        assert!(matches!(err, LessonDownloadError::Failed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let m = mirror_with("true", &[]);
        m.mirror(dir.path()).unwrap();
    }
}
