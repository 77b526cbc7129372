//! Run and plan commands: the configured job list.

use anyhow::{Context, Result};
use mojogen_core::config::MojogenConfig;
use mojogen_core::{plan, ObjectStore};

/// Generate bindings for every configured interface file, stopping at the
/// first failure.
pub fn run_plan(cfg: &MojogenConfig, store: &dyn ObjectStore) -> Result<()> {
    let count = plan::run_plan(cfg, store).context("bindings generation failed")?;
    tracing::info!("generated bindings for {} interface files", count);
    println!("generated bindings for {} interface files", count);
    Ok(())
}

/// Print the job list without touching the network or running anything.
pub fn run_show_plan(cfg: &MojogenConfig) {
    println!(
        "parser:    {} (bucket {})",
        cfg.parser_full_path().display(),
        cfg.parser_bucket
    );
    println!("generator: {}", cfg.generator_script_full_path().display());
    for (i, job) in plan::jobs(cfg).iter().enumerate() {
        match &job.working_dir {
            Some(dir) => println!("{:>3}. {} (in {})", i + 1, job.input.display(), dir.display()),
            None => println!("{:>3}. {}", i + 1, job.input.display()),
        }
    }
}
