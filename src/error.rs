//! Build errors.
//!
//! Every variant aborts the current build attempt. None of them is fatal:
//! a first build surfaces as "unavailable", a rebuild keeps the old program.

use std::path::PathBuf;

use thiserror::Error;

use crate::backend::{Diagnostics, StageKind};
use crate::source::SourceId;

#[derive(Debug, Error)]
pub enum BuildError {
    /// A stage or include could not be resolved in any namespace.
    #[error("source \"{path}\" not found{}", included_from(.requested_by))]
    SourceNotFound {
        path: String,
        /// Unit whose `$include` asked for it, `None` for a stage entry point
        requested_by: Option<SourceId>,
    },

    /// A file was found under a search root but could not be read. Later
    /// roots are not consulted.
    #[error("source \"{}\" could not be read{}: {source}", path.display(), included_from(.requested_by))]
    SourceUnreadable {
        path: PathBuf,
        requested_by: Option<SourceId>,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} stage of \"{program}\" failed to compile:\n{diagnostics}")]
    CompileFailure {
        program: String,
        stage: StageKind,
        diagnostics: Diagnostics,
    },

    #[error("\"{program}\" failed to link:\n{diagnostics}")]
    LinkFailure {
        program: String,
        diagnostics: Diagnostics,
    },
}

impl BuildError {
    /// Attribute a resolution failure to the unit whose `$include` caused it.
    pub(crate) fn included_by(self, includer: &SourceId) -> Self {
        match self {
            Self::SourceUnreadable { path, source, .. } => Self::SourceUnreadable {
                path,
                requested_by: Some(includer.clone()),
                source,
            },
            other => other,
        }
    }
}

fn included_from(requested_by: &Option<SourceId>) -> String {
    requested_by
        .as_ref()
        .map(|id| format!(" (included from \"{id}\")"))
        .unwrap_or_default()
}
