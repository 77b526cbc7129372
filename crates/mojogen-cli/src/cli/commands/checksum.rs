//! Checksum command: compute SHA-1 of a file.

use anyhow::Result;
use mojogen_core::checksum;
use std::path::Path;

/// Print the SHA-1 of the given file, `sha1sum`-style. The digest alone is
/// what belongs in a `.sha1` sidecar.
pub fn run_checksum(path: &Path) -> Result<()> {
    let digest = checksum::sha1_path(path)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
