//! Error type shared by the fetcher, storage and generator.
//!
//! Every variant is fatal: nothing in this crate retries. Variants fall into
//! four groups: missing preconditions, integrity failures, fetch failures and
//! external tool failures.

use std::path::PathBuf;
use std::process::ExitStatus;

use crate::checksum::Sha1Digest;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `<target>.sha1` does not exist.
    #[error("missing checksum sidecar {}", .path.display())]
    MissingSidecar { path: PathBuf },

    /// Sidecar exists but its first 40 characters are not a SHA-1 hex digest.
    #[error("invalid checksum sidecar {}: {reason}", .path.display())]
    InvalidSidecar { path: PathBuf, reason: String },

    /// Interface file handed to the generator does not exist.
    #[error("input file not found: {}", .path.display())]
    MissingInput { path: PathBuf },

    #[error("generator script not found: {}", .path.display())]
    MissingGeneratorScript { path: PathBuf },

    #[error("working directory not found: {}", .path.display())]
    MissingWorkingDir { path: PathBuf },

    /// Content written to disk does not hash to the sidecar digest.
    #[error(
        "integrity check failed for {}: expected sha1 {expected}, got {actual}",
        .path.display()
    )]
    Integrity {
        path: PathBuf,
        expected: Sha1Digest,
        actual: Sha1Digest,
    },

    #[error("invalid object store URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// libcurl reported a transport failure (DNS, connect, timeout, ...).
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },

    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generator ran but exited unsuccessfully.
    #[error("{} exited with {status}", .program.display())]
    ExternalTool { program: PathBuf, status: ExitStatus },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors raised before any network or process activity because
    /// a required file or directory was absent or malformed.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::MissingSidecar { .. }
                | Error::InvalidSidecar { .. }
                | Error::MissingInput { .. }
                | Error::MissingGeneratorScript { .. }
                | Error::MissingWorkingDir { .. }
        )
    }
}
