//! CLI for fetching the mojom parser and generating bindings.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mojogen_core::config::{self, MojogenConfig};
use mojogen_core::HttpObjectStore;
use std::path::PathBuf;
use std::time::Duration;

use commands::{run_checksum, run_ensure, run_generate, run_plan, run_show_plan};

/// Top-level CLI for mojogen.
#[derive(Debug, Parser)]
#[command(name = "mojogen")]
#[command(about = "Fetch the mojom parser by content hash and generate bindings", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/mojogen/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the mojo checkout directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub mojo_dir: Option<PathBuf>,

    /// Override the directory holding SkMojo.mojom.
    #[arg(long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Override the object store base URL.
    #[arg(long, global = true, value_name = "URL")]
    pub store_url: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Ensure the parser and generate bindings for every configured interface file.
    Run,

    /// Make a file match its `.sha1` sidecar, downloading it by digest if needed.
    Ensure {
        /// Target file; its sidecar is `<path>.sha1`.
        path: PathBuf,
        /// Store bucket the content is published under.
        #[arg(long)]
        bucket: String,
    },

    /// Generate bindings for a single interface file.
    Generate {
        /// Interface (.mojom) file.
        input: PathBuf,
        /// Directory to run the generator in (default: the input's directory).
        #[arg(long, value_name = "DIR")]
        working_dir: Option<PathBuf>,
    },

    /// Print the SHA-1 of a file in sidecar format.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// List the configured generator jobs without running them.
    Plan,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    fn apply_overrides(&self, cfg: &mut MojogenConfig) {
        if let Some(dir) = &self.mojo_dir {
            cfg.mojo_dir = dir.clone();
        }
        if let Some(dir) = &self.project_dir {
            cfg.project_dir = dir.clone();
        }
        if let Some(url) = &self.store_url {
            cfg.store_base_url = url.clone();
        }
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        cli.apply_overrides(&mut cfg);
        cfg.resolve_dirs(&std::env::current_dir().context("current directory")?);
        tracing::debug!("loaded config: {:?}", cfg);

        cli.command.dispatch(&cfg)
    }

    /// Run the command against a loaded config. Only commands that talk to
    /// the object store build one, so a bad `store_base_url` does not break
    /// `checksum` or `plan`.
    pub fn dispatch(self, cfg: &MojogenConfig) -> Result<()> {
        match self {
            CliCommand::Run => run_plan(cfg, &object_store(cfg)?)?,
            CliCommand::Ensure { path, bucket } => {
                run_ensure(&path, &bucket, &object_store(cfg)?)?
            }
            CliCommand::Generate { input, working_dir } => {
                run_generate(cfg, &object_store(cfg)?, input, working_dir)?
            }
            CliCommand::Checksum { path } => run_checksum(&path)?,
            CliCommand::Plan => run_show_plan(cfg),
        }
        Ok(())
    }
}

fn object_store(cfg: &MojogenConfig) -> Result<HttpObjectStore> {
    let store = HttpObjectStore::new(&cfg.store_base_url)
        .with_context(|| format!("object store {}", cfg.store_base_url))?;
    Ok(store.with_timeouts(
        Duration::from_secs(cfg.connect_timeout_secs),
        Duration::from_secs(cfg.timeout_secs),
    ))
}

#[cfg(test)]
mod tests;
