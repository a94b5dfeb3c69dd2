//! Working directory bootstrap: `<base>/carpenpi`, created on first use.

use crate::error::DirectoryCreationError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Name of the directory created under the base path.
pub const WORKDIR_NAME: &str = "carpenpi";

/// The invoking user's home directory (`$HOME`), used when no base path is configured.
pub fn default_base_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Path of the working directory for `base`, without touching the filesystem.
pub fn working_dir_path(base: &Path) -> PathBuf {
    base.join(WORKDIR_NAME)
}

/// Ensures `<base>/carpenpi` exists, printing a notice on stdout when it is created.
pub fn ensure_working_dir(base: &Path) -> Result<PathBuf, DirectoryCreationError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    ensure_working_dir_with(base, &mut out)
}

/// Ensures `<base>/carpenpi` exists, writing the creation notice to `notice`.
///
/// Missing parents are created. An existing directory is left untouched and no
/// notice is written. A non-directory at the target path is an error.
pub fn ensure_working_dir_with<W: Write>(
    base: &Path,
    notice: &mut W,
) -> Result<PathBuf, DirectoryCreationError> {
    let target = working_dir_path(base);

    match fs::metadata(&target) {
        Ok(meta) if meta.is_dir() => {
            tracing::debug!(path = %target.display(), "working directory already present");
            return Ok(target);
        }
        Ok(_) => return Err(DirectoryCreationError::NotADirectory { path: target }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(map_io(target, e)),
    }

    // The notice is best effort; a closed stdout must not fail the bootstrap.
    let _ = writeln!(notice, "Creating {} folder in {}", WORKDIR_NAME, base.display());
    tracing::info!(path = %target.display(), "creating working directory");

    fs::create_dir_all(&target).map_err(|e| map_io(target.clone(), e))?;
    Ok(target)
}

fn map_io(path: PathBuf, e: io::Error) -> DirectoryCreationError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => DirectoryCreationError::PermissionDenied { path },
        io::ErrorKind::AlreadyExists if !path.is_dir() => {
            DirectoryCreationError::NotADirectory { path }
        }
        _ => DirectoryCreationError::Io { path, source: e },
    }
}
