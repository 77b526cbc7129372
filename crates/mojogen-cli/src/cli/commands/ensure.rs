//! Ensure command: run the content-addressed fetcher on one file.

use anyhow::{Context, Result};
use mojogen_core::{ensure_file, EnsureOutcome, FetchTarget, ObjectStore};
use std::path::Path;

pub fn run_ensure(path: &Path, bucket: &str, store: &dyn ObjectStore) -> Result<()> {
    let target = FetchTarget::new(path, bucket);
    let outcome =
        ensure_file(&target, store).with_context(|| format!("ensure {}", path.display()))?;
    match outcome {
        EnsureOutcome::UpToDate => println!("{}: up to date", path.display()),
        EnsureOutcome::Downloaded { bytes } => {
            println!("{}: downloaded {} bytes", path.display(), bytes)
        }
    }
    Ok(())
}
