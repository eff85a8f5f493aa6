//! Program cache with failure-retaining rebuilds.
//!
//! ```text
//! get_or_build("blur")
//! ├── hit  → &program
//! └── miss → expand blur.vert + blur.frag → compile → link
//!            ├── ok   → insert entry, &program
//!            └── fail → None (nothing cached, next call tries again)
//!
//! rebuild("blur")
//! ├── ok   → release old program, replace entry       (Replaced)
//! └── fail → old entry untouched, still served         (KeptOld)
//! ```
//!
//! Failures are never cached: a program that does not build yet is retried on
//! every request, so fixing the source is picked up without any extra step.

mod build;
mod entry;

pub use build::BuildContext;
pub use entry::{CacheEntry, StageSource};

use rustc_hash::FxHashMap;

use crate::backend::Backend;
use crate::error::BuildError;
use crate::preprocess::DependencySet;
use build::build_program;

/// What a rebuild did to the cached entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// New program built; the previous one was released.
    Replaced,
    /// Build failed; the previous program is still cached and valid.
    KeptOld,
}

/// Cached programs by logical name.
#[derive(Debug)]
pub struct ProgramCache<P> {
    entries: FxHashMap<String, CacheEntry<P>>,
}

impl<P> Default for ProgramCache<P> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<P> ProgramCache<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached program for `name`, building it on a miss.
    ///
    /// Returns `None` if the build failed; diagnostics have been logged.
    pub fn get_or_build<B>(&mut self, name: &str, ctx: &mut BuildContext<'_, B>) -> Option<&P>
    where
        B: Backend<Program = P>,
    {
        match self.try_get_or_build(name, ctx) {
            Ok(program) => Some(program),
            Err(e) => {
                crate::log!("build"; "program \"{}\" unavailable: {}", name, e);
                None
            }
        }
    }

    /// Like [`get_or_build`](Self::get_or_build), but returns the build error
    /// instead of logging it.
    pub fn try_get_or_build<B>(
        &mut self,
        name: &str,
        ctx: &mut BuildContext<'_, B>,
    ) -> Result<&P, BuildError>
    where
        B: Backend<Program = P>,
    {
        if !self.entries.contains_key(name) {
            let entry = build_program(name, ctx)?;
            crate::debug!("build"; "cached \"{}\"", name);
            return Ok(self.entries.entry(name.to_owned()).or_insert(entry).program());
        }
        Ok(self.entries[name].program())
    }

    /// Build `name` again and swap it in only if the build succeeds.
    ///
    /// A name that is not cached yet gets inserted on success.
    pub fn rebuild<B>(&mut self, name: &str, ctx: &mut BuildContext<'_, B>) -> RebuildOutcome
    where
        B: Backend<Program = P>,
    {
        match build_program(name, ctx) {
            Ok(entry) => {
                crate::log!("reload"; "reloading program \"{}\"", name);
                if let Some(old) = self.entries.insert(name.to_owned(), entry) {
                    ctx.backend.release_program(old.program);
                }
                RebuildOutcome::Replaced
            }
            Err(e) => {
                crate::log!("reload"; "program \"{}\" could not be reloaded, keeping the old program: {}", name, e);
                RebuildOutcome::KeptOld
            }
        }
    }

    /// Names of entries built from any of `changed`.
    pub fn affected_by(&self, changed: &DependencySet) -> Vec<String> {
        if changed.is_empty() {
            return Vec::new();
        }
        self.entries
            .values()
            .filter(|entry| entry.depends_on_any(changed))
            .map(|entry| entry.name.clone())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&CacheEntry<P>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, giving each program back to the backend.
    pub fn release_all<B>(&mut self, backend: &mut B)
    where
        B: Backend<Program = P>,
    {
        for (_, entry) in self.entries.drain() {
            backend.release_program(entry.program);
        }
    }
}
