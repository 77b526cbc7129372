//! The fixed sequence of interface files to generate bindings for.

use crate::config::MojogenConfig;
use crate::error::Result;
use crate::fetch::FetchTarget;
use crate::generator::{GenerateJob, Generator};
use crate::store::ObjectStore;

/// Mojo public interfaces, relative to `mojo_dir`. Generated from the parent
/// of `mojo_dir` so output paths start with `mojo/`.
pub const MOJO_INTERFACES: &[&str] = &[
    "public/interfaces/bindings/interface_control_messages.mojom",
    "public/interfaces/application/service_provider.mojom",
    "public/interfaces/bindings/tests/ping_service.mojom",
    "public/interfaces/application/application.mojom",
];

/// The project's own interface file, relative to `project_dir`.
pub const PROJECT_INTERFACE: &str = "SkMojo.mojom";

/// Jobs to run, in order. An explicit `[[jobs]]` list in the config replaces
/// the built-in plan entirely.
pub fn jobs(cfg: &MojogenConfig) -> Vec<GenerateJob> {
    if let Some(jobs) = &cfg.jobs {
        return jobs
            .iter()
            .map(|j| GenerateJob {
                input: j.input.clone(),
                working_dir: j.working_dir.clone(),
            })
            .collect();
    }

    let mojo_parent = cfg.mojo_dir.join("..");
    let mut jobs: Vec<GenerateJob> = MOJO_INTERFACES
        .iter()
        .map(|rel| GenerateJob::new(cfg.mojo_dir.join(rel)).in_dir(&mojo_parent))
        .collect();
    jobs.push(GenerateJob::new(cfg.project_dir.join(PROJECT_INTERFACE)));
    jobs
}

pub fn parser_target(cfg: &MojogenConfig) -> FetchTarget {
    FetchTarget::new(cfg.parser_full_path(), cfg.parser_bucket.clone())
}

/// Run every job in order, stopping at the first failure.
pub fn run_plan(cfg: &MojogenConfig, store: &dyn ObjectStore) -> Result<usize> {
    let generator = Generator::new(parser_target(cfg), cfg.generator_script_full_path(), store);
    let jobs = jobs(cfg);
    for (i, job) in jobs.iter().enumerate() {
        tracing::info!(step = i + 1, total = jobs.len(), input = %job.input.display(), "generate");
        generator.generate(job)?;
    }
    Ok(jobs.len())
}
