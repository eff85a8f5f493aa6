//! Pipeline configuration from `hotshade.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [sources], [stages], [watch]
//! ├── error.rs       # ConfigError
//! ├── util.rs        # config file discovery
//! └── mod.rs         # PipelineConfig (this file)
//! ```
//!
//! Every section is optional; a missing file means "all defaults, rooted at
//! the current directory".

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{SourcesConfig, StagesConfig, WatchConfig};
pub use util::find_config_file;

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::utils::path::resolve_path;

/// Default config file name.
pub const CONFIG_FILE: &str = "hotshade.toml";

/// Root configuration structure representing `hotshade.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Absolute path to the config file, empty when running on defaults
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub stages: StagesConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

impl PipelineConfig {
    /// Load and validate the config file at `path`.
    ///
    /// The parent directory of `path` becomes the project root.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        config.set_root(path.parent().unwrap_or_else(|| Path::new(".")));
        config.validate()?;

        crate::debug!("config"; "loaded {}", path.display());
        Ok(config)
    }

    /// Default configuration rooted at `root`.
    pub fn with_root(root: &Path) -> Self {
        let mut config = Self::default();
        config.set_root(root);
        config
    }

    /// Parse configuration from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.roots.is_empty() {
            return Err(ConfigError::Validation(
                "[sources] roots must list at least one directory".into(),
            ));
        }

        let (vertex, fragment) = (&self.stages.vertex, &self.stages.fragment);
        if vertex.is_empty() || fragment.is_empty() {
            return Err(ConfigError::Validation(
                "[stages] suffixes must not be empty".into(),
            ));
        }
        if vertex == fragment {
            return Err(ConfigError::Validation(format!(
                "[stages] vertex and fragment suffix are both \"{vertex}\""
            )));
        }

        if self.watch.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "[watch] interval_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Search roots as absolute paths, in configured order.
    pub fn search_roots(&self) -> Vec<PathBuf> {
        self.sources
            .roots
            .iter()
            .map(|root| resolve_path(root, &self.root))
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn test_parse_config(content: &str) -> PipelineConfig {
    PipelineConfig::from_str(content).unwrap()
}
