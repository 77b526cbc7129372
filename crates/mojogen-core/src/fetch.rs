//! Content-addressed fetcher.
//!
//! [`ensure_file`] makes a local file match the digest recorded in its
//! `.sha1` sidecar. When the hashes already agree nothing is touched and the
//! store is never contacted; otherwise the object named by the digest is
//! downloaded, installed read+execute and verified.

use crate::checksum::{sha1_path, sha1_path_or_empty};
use crate::error::{Error, Result};
use crate::sidecar::read_expected_digest;
use crate::storage::install_file;
use crate::store::{ContentAddress, ObjectStore};
use std::path::{Path, PathBuf};

/// A file to keep in sync with the store. `path` is the local identity of the
/// file; `bucket` is the store namespace its content lives under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub path: PathBuf,
    pub bucket: String,
}

impl FetchTarget {
    pub fn new(path: impl Into<PathBuf>, bucket: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            bucket: bucket.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// Local content already matched the sidecar.
    UpToDate,
    /// Content was replaced with `bytes` bytes from the store.
    Downloaded { bytes: u64 },
}

/// Make `target.path` hold the content recorded in `target.path + ".sha1"`.
///
/// A missing target counts as empty content, so a sidecar holding the SHA-1
/// of empty input is satisfied without any download.
pub fn ensure_file(target: &FetchTarget, store: &dyn ObjectStore) -> Result<EnsureOutcome> {
    let path = target.path();
    let expected = read_expected_digest(path)?;
    let actual = sha1_path_or_empty(path)?;
    tracing::debug!(
        path = %path.display(),
        expected = %expected,
        actual = %actual,
        "compared local file with sidecar"
    );
    if actual == expected {
        return Ok(EnsureOutcome::UpToDate);
    }

    let address = ContentAddress::new(target.bucket.clone(), expected);
    let body = store.fetch(&address)?;
    install_file(path, &body)?;

    let written = sha1_path(path)?;
    if written != expected {
        tracing::error!(
            path = %path.display(),
            expected = %expected,
            actual = %written,
            "downloaded content failed verification"
        );
        return Err(Error::Integrity {
            path: path.to_path_buf(),
            expected,
            actual: written,
        });
    }

    tracing::info!(path = %path.display(), digest = %expected, "installed verified file");
    Ok(EnsureOutcome::Downloaded {
        bytes: body.len() as u64,
    })
}
