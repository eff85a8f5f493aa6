//! `[stages]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [stages]
//! vertex = ".vert"
//! fragment = ".frag"
//! ```
//!
//! Program `post/blur` is then built from `post/blur.vert` and `post/blur.frag`.

use serde::{Deserialize, Serialize};

use crate::backend::StageKind;

/// Suffixes appended to a program name to find its two stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StagesConfig {
    pub vertex: String,
    pub fragment: String,
}

impl Default for StagesConfig {
    fn default() -> Self {
        Self {
            vertex: ".vert".into(),
            fragment: ".frag".into(),
        }
    }
}

impl StagesConfig {
    pub fn suffix(&self, kind: StageKind) -> &str {
        match kind {
            StageKind::Vertex => &self.vertex,
            StageKind::Fragment => &self.fragment,
        }
    }

    /// Virtual name of one stage of `program`.
    pub fn stage_name(&self, program: &str, kind: StageKind) -> String {
        format!("{program}{}", self.suffix(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_stage_names() {
        let stages = StagesConfig::default();
        assert_eq!(stages.stage_name("post/blur", StageKind::Vertex), "post/blur.vert");
        assert_eq!(stages.stage_name("post/blur", StageKind::Fragment), "post/blur.frag");
    }

    #[test]
    fn test_stages_config() {
        let config = test_parse_config("[stages]\nvertex = \".vs.glsl\"\nfragment = \".fs.glsl\"");
        assert_eq!(config.stages.stage_name("sky", StageKind::Vertex), "sky.vs.glsl");
        assert_eq!(config.stages.stage_name("sky", StageKind::Fragment), "sky.fs.glsl");
    }

    #[test]
    fn test_stages_partial_override() {
        let config = test_parse_config("[stages]\nfragment = \".fs\"");
        assert_eq!(config.stages.vertex, ".vert");
        assert_eq!(config.stages.fragment, ".fs");
    }
}
