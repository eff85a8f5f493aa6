//! Compiler/linker backend interface.
//!
//! The pipeline never talks to a graphics API directly. It hands expanded
//! stage text to a [`Backend`], which turns two compiled stages into one
//! opaque program handle.
//!
//! Implementations shipped here:
//! - [`NullBackend`]: accepts everything, used for headless checks
//! - `GlowBackend` (feature `glow`): OpenGL through `glow`

mod null;
#[cfg(feature = "glow")]
mod opengl;

pub use null::{NullBackend, NullProgram, NullStage};
#[cfg(feature = "glow")]
pub use opengl::GlowBackend;

use std::fmt;

/// Which of the two stages of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub const ALL: [StageKind; 2] = [StageKind::Vertex, StageKind::Fragment];

    pub fn label(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Backend log text (compiler/linker info log). May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(String);

impl Diagnostics {
    pub fn new(log: impl Into<String>) -> Self {
        Self(log.into())
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("<no log available>")
        } else {
            f.write_str(self.0.trim_end())
        }
    }
}

/// Successful backend output plus whatever it logged along the way.
#[derive(Debug)]
pub struct Compiled<T> {
    pub value: T,
    /// Warnings; a backend may log without failing
    pub diagnostics: Diagnostics,
}

impl<T> Compiled<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            diagnostics: Diagnostics::none(),
        }
    }

    pub fn with_diagnostics(value: T, diagnostics: Diagnostics) -> Self {
        Self { value, diagnostics }
    }
}

/// Compiles stages and links them into programs.
///
/// Handles are owned values: whoever holds one must give it back through
/// `release_stage` / `release_program` exactly once.
pub trait Backend {
    /// One compiled stage.
    type Stage;
    /// A linked program, the artifact the cache hands out.
    type Program;

    fn compile_stage(
        &mut self,
        kind: StageKind,
        text: &str,
    ) -> Result<Compiled<Self::Stage>, Diagnostics>;

    /// Link a vertex and a fragment stage. The stages stay owned by the
    /// caller and are released afterwards, whether linking worked or not.
    /// On failure the backend cleans up the half-built program itself.
    fn link(
        &mut self,
        vertex: &Self::Stage,
        fragment: &Self::Stage,
    ) -> Result<Compiled<Self::Program>, Diagnostics>;

    fn release_stage(&mut self, stage: Self::Stage);

    fn release_program(&mut self, program: Self::Program);
}
