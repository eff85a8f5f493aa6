//! `[sources]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [sources]
//! roots = ["shaders/", "../engine/shaders/"]   # earliest wins
//! ```
//!
//! Relative roots are resolved against the directory of `hotshade.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Filesystem search roots for stage and include files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Searched in order, the first root containing a name wins.
    pub roots: Vec<PathBuf>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from("shaders")],
        }
    }
}
