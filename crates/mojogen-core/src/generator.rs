//! Running the external bindings generator.
//!
//! The generator script is an opaque collaborator: it is started with one
//! argument, the input path relative to the working directory, and inherits
//! our stdio. The working directory is set on the child process only; this
//! process never changes its own cwd.

use crate::error::{Error, Result};
use crate::fetch::{ensure_file, EnsureOutcome, FetchTarget};
use crate::store::ObjectStore;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

/// One interface file to generate bindings for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateJob {
    pub input: PathBuf,
    /// Directory to run the generator in; the input's parent when `None`.
    pub working_dir: Option<PathBuf>,
}

impl GenerateJob {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            working_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// Parser binary that must be present before the generator runs, plus the
/// generator script itself.
pub struct Generator<'a> {
    parser: FetchTarget,
    script: PathBuf,
    store: &'a dyn ObjectStore,
}

impl<'a> Generator<'a> {
    pub fn new(parser: FetchTarget, script: impl Into<PathBuf>, store: &'a dyn ObjectStore) -> Self {
        Self {
            parser,
            script: script.into(),
            store,
        }
    }

    /// Ensure the parser, validate the job's paths and run the generator.
    pub fn generate(&self, job: &GenerateJob) -> Result<()> {
        match ensure_file(&self.parser, self.store)? {
            EnsureOutcome::UpToDate => {
                tracing::debug!(path = %self.parser.path.display(), "parser up to date")
            }
            EnsureOutcome::Downloaded { bytes } => {
                tracing::info!(path = %self.parser.path.display(), bytes, "parser downloaded")
            }
        }

        if !job.input.is_file() {
            return Err(Error::MissingInput {
                path: job.input.clone(),
            });
        }
        let input = absolute(&job.input)?;

        if !self.script.is_file() {
            return Err(Error::MissingGeneratorScript {
                path: self.script.clone(),
            });
        }
        let script = absolute(&self.script)?;

        let working_dir = match &job.working_dir {
            Some(dir) => absolute(dir)?,
            None => input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("/")),
        };
        if !working_dir.is_dir() {
            return Err(Error::MissingWorkingDir { path: working_dir });
        }

        let rel = relative_to(&input, &working_dir);
        tracing::info!(
            script = %script.display(),
            input = %rel.display(),
            cwd = %working_dir.display(),
            "running bindings generator"
        );

        let status = Command::new(&script)
            .arg(&rel)
            .current_dir(&working_dir)
            .status()
            .map_err(|source| Error::Spawn {
                program: script.clone(),
                source,
            })?;
        if !status.success() {
            return Err(Error::ExternalTool {
                program: script,
                status,
            });
        }
        Ok(())
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| Error::io(path, e))?;
        cwd.join(path)
    };
    Ok(normalize(&joined))
}

/// Lexically resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(comp);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Path of `path` as seen from `base`. Both must be absolute and normalized.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_comps: Vec<Component> = path.components().collect();
    let base_comps: Vec<Component> = base.components().collect();
    let common = path_comps
        .iter()
        .zip(&base_comps)
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base_comps.len() {
        rel.push("..");
    }
    for comp in &path_comps[common..] {
        rel.push(comp);
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_to_child() {
        assert_eq!(
            relative_to(Path::new("/m/public/a.mojom"), Path::new("/m")),
            PathBuf::from("public/a.mojom")
        );
    }

    #[test]
    fn relative_to_sibling_tree() {
        assert_eq!(
            relative_to(
                Path::new("/src/third_party/externals/mojo/public/a.mojom"),
                Path::new("/src/third_party/externals")
            ),
            PathBuf::from("mojo/public/a.mojom")
        );
        assert_eq!(
            relative_to(Path::new("/a/b/c.mojom"), Path::new("/a/x/y")),
            PathBuf::from("../../b/c.mojom")
        );
    }

    #[test]
    fn relative_to_self_is_dot() {
        assert_eq!(relative_to(Path::new("/a/b"), Path::new("/a/b")), PathBuf::from("."));
    }

    #[test]
    fn normalize_collapses_parent_dirs() {
        assert_eq!(
            normalize(Path::new("/src/third_party/externals/mojo/../x/./y")),
            PathBuf::from("/src/third_party/externals/x/y")
        );
    }

    #[test]
    fn job_defaults_to_input_parent() {
        let job = GenerateJob::new("/p/SkMojo.mojom");
        assert!(job.working_dir.is_none());
        let job = job.in_dir("/p/..");
        assert_eq!(job.working_dir, Some(PathBuf::from("/p/..")));
    }
}
