//! Installing fetched bytes on disk.
//!
//! The body goes to `<target>.part`, is synced and made read+execute for
//! everyone, then renamed over the target. A transfer that fails half way
//! never leaves a truncated executable behind, and a previously installed
//! read-only binary can still be replaced.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// `r-x r-x r-x`: readable and executable by owner, group and others.
pub const INSTALLED_MODE: u32 = 0o555;

pub fn temp_path_for(target: &Path) -> PathBuf {
    let mut s = target.as_os_str().to_os_string();
    s.push(TEMP_SUFFIX);
    PathBuf::from(s)
}

/// Write `body` verbatim to `target`, replacing any existing content, and
/// apply [`INSTALLED_MODE`].
pub fn install_file(target: &Path, body: &[u8]) -> Result<()> {
    let temp = temp_path_for(target);

    // A leftover from an interrupted run may already be read-only.
    match fs::remove_file(&temp) {
        Ok(()) => tracing::debug!(path = %temp.display(), "removed stale temp file"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(&temp, e)),
    }

    let mut file = File::options()
        .write(true)
        .create_new(true)
        .open(&temp)
        .map_err(|e| Error::io(&temp, e))?;
    file.write_all(body).map_err(|e| Error::io(&temp, e))?;
    file.sync_all().map_err(|e| Error::io(&temp, e))?;
    drop(file);

    set_installed_mode(&temp)?;
    fs::rename(&temp, target).map_err(|e| Error::io(target, e))?;
    tracing::debug!(path = %target.display(), bytes = body.len(), "installed file");
    Ok(())
}

#[cfg(unix)]
fn set_installed_mode(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(INSTALLED_MODE))
        .map_err(|e| Error::io(path, e))
}

#[cfg(not(unix))]
fn set_installed_mode(path: &Path) -> Result<()> {
    let mut perms = fs::metadata(path).map_err(|e| Error::io(path, e))?.permissions();
    perms.set_readonly(true);
    fs::set_permissions(path, perms).map_err(|e| Error::io(path, e))
}
