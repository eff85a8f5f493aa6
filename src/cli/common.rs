//! Common utilities shared across CLI commands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use hotshade::config::{CONFIG_FILE, PipelineConfig, find_config_file};
use hotshade::{NullBackend, Pipeline};

use super::Cli;

/// Load `hotshade.toml`, searching upward from the current directory.
///
/// Falls back to defaults rooted at the current directory when the default
/// config name is not found. An explicitly given file must exist.
pub fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;

    match find_config_file(&cli.config, &cwd) {
        Some(path) => PipelineConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None if cli.config == Path::new(CONFIG_FILE) => {
            hotshade::debug!("config"; "no {} found, using defaults", CONFIG_FILE);
            Ok(PipelineConfig::with_root(&cwd))
        }
        None => bail!("config file not found: {}", cli.config.display()),
    }
}

/// Headless pipeline for one-shot commands: no filesystem watchers.
pub fn oneshot_pipeline(mut config: PipelineConfig) -> Pipeline<NullBackend> {
    config.watch.enabled = false;
    Pipeline::new(config, NullBackend::new())
}
