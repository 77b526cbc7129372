use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::DEFAULT_STORE_BASE_URL;

/// An interface file listed in `config.toml` under `[[jobs]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    /// Interface file to generate bindings for.
    pub input: PathBuf,
    /// Directory the generator runs in; the input's parent when omitted.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

/// Global configuration loaded from `~/.config/mojogen/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MojogenConfig {
    /// Object store base URL; objects live at `<base>/<bucket>/<sha1>`.
    pub store_base_url: String,
    /// Checkout of the mojo sources (parser, generator script, interfaces).
    pub mojo_dir: PathBuf,
    /// Directory holding the project's own `SkMojo.mojom`.
    pub project_dir: PathBuf,
    /// Parser executable, relative to `mojo_dir`.
    pub parser_path: PathBuf,
    /// Store bucket the parser binary is published under.
    pub parser_bucket: String,
    /// Generator script, relative to `mojo_dir`.
    pub generator_script: PathBuf,
    /// Connect timeout for store requests, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout for a single store request, in seconds.
    pub timeout_secs: u64,
    /// Optional job list; if missing, the built-in plan is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<Vec<JobConfig>>,
}

impl Default for MojogenConfig {
    fn default() -> Self {
        Self {
            store_base_url: DEFAULT_STORE_BASE_URL.to_string(),
            mojo_dir: PathBuf::from("third_party/externals/mojo"),
            project_dir: PathBuf::from("experimental/mojo"),
            parser_path: PathBuf::from("public/tools/bindings/mojom_parser/bin/linux64/mojom_parser"),
            parser_bucket: "mojo/mojom_parser/linux64".to_string(),
            generator_script: PathBuf::from("public/tools/bindings/mojom_bindings_generator.py"),
            connect_timeout_secs: 30,
            timeout_secs: 600,
            jobs: None,
        }
    }
}

impl MojogenConfig {
    /// Resolve relative `mojo_dir`/`project_dir` against `base`.
    pub fn resolve_dirs(&mut self, base: &Path) {
        if self.mojo_dir.is_relative() {
            self.mojo_dir = base.join(&self.mojo_dir);
        }
        if self.project_dir.is_relative() {
            self.project_dir = base.join(&self.project_dir);
        }
    }

    pub fn parser_full_path(&self) -> PathBuf {
        self.mojo_dir.join(&self.parser_path)
    }

    pub fn generator_script_full_path(&self) -> PathBuf {
        self.mojo_dir.join(&self.generator_script)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mojogen")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MojogenConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MojogenConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file. The file must exist.
pub fn load_from(path: &Path) -> Result<MojogenConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: MojogenConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
