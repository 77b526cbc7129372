//! `<target>.sha1` sidecar records.

use crate::checksum::{Sha1Digest, SHA1_HEX_LEN};
use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Sidecar suffix appended to the full target file name.
pub const SIDECAR_SUFFIX: &str = ".sha1";

/// `foo/mojom_parser` -> `foo/mojom_parser.sha1`.
pub fn sidecar_path(target: &Path) -> PathBuf {
    let mut s = target.as_os_str().to_os_string();
    s.push(SIDECAR_SUFFIX);
    PathBuf::from(s)
}

/// Reads the expected digest of `target` from its sidecar.
///
/// Only the first 40 characters count; a trailing newline or anything after
/// the digest is ignored.
pub fn read_expected_digest(target: &Path) -> Result<Sha1Digest> {
    let path = sidecar_path(target);
    let data = match fs::read(&path) {
        Ok(d) => d,
        // A directory where the sidecar should be is as good as no sidecar.
        Err(e) if e.kind() == ErrorKind::NotFound || path.is_dir() => {
            return Err(Error::MissingSidecar { path });
        }
        Err(e) => return Err(Error::io(path, e)),
    };
    if data.len() < SHA1_HEX_LEN {
        return Err(Error::InvalidSidecar {
            path,
            reason: format!("expected {} hex characters, found {}", SHA1_HEX_LEN, data.len()),
        });
    }
    let head = std::str::from_utf8(&data[..SHA1_HEX_LEN]).map_err(|_| Error::InvalidSidecar {
        path: path.clone(),
        reason: "digest is not ASCII".to_string(),
    })?;
    head.parse::<Sha1Digest>().map_err(|e| Error::InvalidSidecar {
        path: path.clone(),
        reason: e.to_string(),
    })
}
