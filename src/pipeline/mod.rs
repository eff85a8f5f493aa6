//! The hot-reloading program pipeline.
//!
//! Ties the pieces together on the caller's thread:
//!
//! ```text
//!                    ┌──────────────────────────────┐
//! get_program(name) ─┤ ProgramCache                 │─→ &Program
//!                    │   miss → expand → compile    │
//!                    └──────────────▲───────────────┘
//!                                   │ rebuild(affected)
//! poll_and_invalidate() ─→ ChangeDetector ─→ changed set
//! ```
//!
//! Call [`Pipeline::poll_and_invalidate`] once per frame (or tick), then look
//! programs up with [`Pipeline::get_program`]. A program reference never
//! outlives the next call that takes `&mut self`, so nobody can hold on to a
//! program across a reload.

mod report;


pub use report::InvalidationReport;

use crate::backend::Backend;
use crate::cache::{BuildContext, CacheEntry, ProgramCache, RebuildOutcome};
use crate::config::PipelineConfig;
use crate::error::BuildError;
use crate::preprocess::{self, DependencySet, Expansion};
use crate::source::SourceProvider;
use crate::utils::plural_count;
use crate::watch::ChangeDetector;

/// Program cache, source provider and change detector over one backend.
///
/// Programs still cached when the pipeline is dropped are released through
/// the backend.
pub struct Pipeline<B: Backend> {
    config: PipelineConfig,
    provider: SourceProvider,
    cache: ProgramCache<B::Program>,
    detector: ChangeDetector,
    backend: B,
    /// Completed invalidation passes
    tick: u64,
}

impl<B: Backend> Pipeline<B> {
    /// Create a pipeline that watches the configured roots (unless
    /// `[watch] enabled = false`).
    ///
    /// Watchers are only created on the first poll.
    pub fn new(config: PipelineConfig, backend: B) -> Self {
        let detector = if config.watch.enabled {
            ChangeDetector::new(config.search_roots())
        } else {
            crate::debug!("watch"; "filesystem watching disabled");
            ChangeDetector::inline_only()
        };
        Self::with_detector(config, backend, detector)
    }

    /// Create a pipeline with a caller supplied change detector.
    pub fn with_detector(config: PipelineConfig, backend: B, detector: ChangeDetector) -> Self {
        let roots = config.search_roots();
        crate::debug_do! {
            for root in &roots {
                crate::debug!("build"; "search root {}", root.display());
            }
        }

        Self {
            provider: SourceProvider::new(roots),
            config,
            cache: ProgramCache::new(),
            detector,
            backend,
            tick: 0,
        }
    }

    /// Insert or replace an inline source, addressable as `<inline>/<name>`.
    ///
    /// Re-registering identical content is a no-op; changed content is picked
    /// up by the next [`poll_and_invalidate`](Self::poll_and_invalidate).
    pub fn register_inline(&mut self, name: &str, content: &str) -> bool {
        self.provider.registry_mut().register(name, content)
    }

    /// Program `name`, built on first request.
    ///
    /// `None` if it cannot be built right now. Failures are not cached, so the
    /// next call tries again.
    pub fn get_program(&mut self, name: &str) -> Option<&B::Program> {
        let mut ctx = BuildContext {
            provider: &self.provider,
            backend: &mut self.backend,
            stages: &self.config.stages,
        };
        self.cache.get_or_build(name, &mut ctx)
    }

    /// Like [`get_program`](Self::get_program), but hands the build error to
    /// the caller instead of logging it.
    pub fn try_program(&mut self, name: &str) -> Result<&B::Program, BuildError> {
        let mut ctx = BuildContext {
            provider: &self.provider,
            backend: &mut self.backend,
            stages: &self.config.stages,
        };
        self.cache.try_get_or_build(name, &mut ctx)
    }

    /// Collect changes since the last call and rebuild every cached program
    /// that consumed one of them.
    pub fn poll_and_invalidate(&mut self) -> InvalidationReport {
        let changed = self.detector.poll(self.provider.registry_mut());
        self.invalidate(&changed)
    }

    /// Rebuild every cached program whose dependencies intersect `changed`.
    ///
    /// Programs outside the intersection are left untouched.
    pub fn invalidate(&mut self, changed: &DependencySet) -> InvalidationReport {
        self.tick += 1;

        let mut report = InvalidationReport {
            tick: self.tick,
            changed: changed.iter().cloned().collect(),
            ..Default::default()
        };
        report.changed.sort();

        for id in &report.changed {
            crate::log!("reload"; "tick {}: \"{}\" changed", self.tick, id);
        }

        let mut affected = self.cache.affected_by(changed);
        affected.sort();

        for name in affected {
            match self.rebuild(&name) {
                RebuildOutcome::Replaced => report.reloaded.push(name),
                RebuildOutcome::KeptOld => report.kept_old.push(name),
            }
        }

        report
    }

    /// Force a rebuild of `name`, keeping the old program if it fails.
    pub fn rebuild(&mut self, name: &str) -> RebuildOutcome {
        let mut ctx = BuildContext {
            provider: &self.provider,
            backend: &mut self.backend,
            stages: &self.config.stages,
        };
        self.cache.rebuild(name, &mut ctx)
    }

    /// Expand a single stage source without building anything.
    pub fn expand(&self, stage_name: &str) -> Result<Expansion, BuildError> {
        preprocess::expand(&self.provider, stage_name)
    }

    /// Names of all cached programs, sorted.
    pub fn program_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.cache.names().collect();
        names.sort_unstable();
        names
    }

    /// Read-only view of a cached program and what it was built from.
    pub fn entry(&self, name: &str) -> Option<&CacheEntry<B::Program>> {
        self.cache.get(name)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn provider(&self) -> &SourceProvider {
        &self.provider
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Completed invalidation passes.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Release every cached program and drop the pipeline.
    pub fn shutdown(self) {
        crate::debug!("build"; "shutting down, releasing {}", plural_count(self.cache.len(), "program"));
    }
}

impl<B: Backend> Drop for Pipeline<B> {
    fn drop(&mut self) {
        self.cache.release_all(&mut self.backend);
    }
}
