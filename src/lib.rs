//! hotshade - hot-reloading build cache for two-stage shader programs.
//!
//! Programs are built on demand from `<name>.vert` + `<name>.frag`, with
//! `$include "path"` directives spliced in recursively. Every build records
//! which sources it consumed; once per tick the pipeline polls for changed
//! sources and rebuilds exactly the programs that used them. A failed rebuild
//! keeps the last good program.
//!
//! ```ignore
//! let config = PipelineConfig::load(Path::new("hotshade.toml"))?;
//! let mut pipeline = Pipeline::new(config, NullBackend::new());
//!
//! loop {
//!     pipeline.poll_and_invalidate();
//!     if let Some(program) = pipeline.get_program("post/blur") {
//!         // draw with program
//!     }
//! }
//! ```

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod preprocess;
pub mod source;
pub mod utils;
pub mod watch;

pub use backend::{Backend, Compiled, Diagnostics, NullBackend, StageKind};
pub use cache::{CacheEntry, RebuildOutcome};
pub use config::PipelineConfig;
pub use error::BuildError;
pub use pipeline::{InvalidationReport, Pipeline};
pub use preprocess::{DependencySet, DirectiveWarning, Expansion};
pub use source::{SourceId, SourceProvider};
