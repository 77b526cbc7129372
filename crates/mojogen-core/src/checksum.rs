//! SHA-1 content hashing for content-addressed files.
//!
//! The object store keys every file by the SHA-1 of its bytes, so the same
//! digest type is used for sidecar records, local files and download URLs.

use crate::error::{Error, Result};
use sha1::{Digest, Sha1};
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;

const BUF_SIZE: usize = 64 * 1024;

/// Length of a SHA-1 digest rendered as hex.
pub const SHA1_HEX_LEN: usize = 40;

/// A 20-byte SHA-1 digest. Displays as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha1Digest([u8; 20]);

impl Sha1Digest {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    fn from_hasher(hasher: Sha1) -> Self {
        let mut out = [0u8; 20];
        out.copy_from_slice(&hasher.finalize());
        Sha1Digest(out)
    }
}

impl fmt::Display for Sha1Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Sha1Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha1Digest({})", self.to_hex())
    }
}

/// Parses exactly 40 hex characters, either case.
impl FromStr for Sha1Digest {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut out = [0u8; 20];
        hex::decode_to_slice(s, &mut out)?;
        Ok(Sha1Digest(out))
    }
}

/// SHA-1 of an in-memory buffer.
pub fn sha1_bytes(data: &[u8]) -> Sha1Digest {
    let mut hasher = Sha1::new();
    hasher.update(data);
    Sha1Digest::from_hasher(hasher)
}

/// Compute SHA-1 of a file. Reads in chunks so large binaries stay cheap.
pub fn sha1_path(path: &Path) -> Result<Sha1Digest> {
    let f = File::open(path).map_err(|e| Error::io(path, e))?;
    sha1_reader(path, f)
}

/// Like [`sha1_path`], but a file that does not exist hashes as empty input.
pub fn sha1_path_or_empty(path: &Path) -> Result<Sha1Digest> {
    match File::open(path) {
        Ok(f) => sha1_reader(path, f),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(sha1_bytes(&[])),
        Err(e) => Err(Error::io(path, e)),
    }
}

fn sha1_reader(path: &Path, mut f: File) -> Result<Sha1Digest> {
    let mut hasher = Sha1::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f.read(&mut buf).map_err(|e| Error::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(Sha1Digest::from_hasher(hasher))
}
