//! Generate command: bindings for a single interface file.

use anyhow::{Context, Result};
use mojogen_core::config::MojogenConfig;
use mojogen_core::{plan, GenerateJob, Generator, ObjectStore};
use std::path::PathBuf;

pub fn run_generate(
    cfg: &MojogenConfig,
    store: &dyn ObjectStore,
    input: PathBuf,
    working_dir: Option<PathBuf>,
) -> Result<()> {
    let generator = Generator::new(
        plan::parser_target(cfg),
        cfg.generator_script_full_path(),
        store,
    );
    let job = GenerateJob { input, working_dir };
    generator
        .generate(&job)
        .with_context(|| format!("generate bindings for {}", job.input.display()))?;
    Ok(())
}
