//! Change detection
//!
//! Collects everything that changed since the previous poll: files under
//! the search roots (via one [`RootWatcher`] per root) and inline sources
//! whose content was replaced.
//!
//! ```text
//! notify → EventBatch (dedup) → FileChange ┐
//!                                          ├→ changed set (SourceId)
//! InlineRegistry::take_dirty ──────────────┘
//! ```

mod events;
mod native;
mod types;


pub use native::NotifyWatcher;
pub use types::{ChangeKind, FileChange};

use std::path::{Path, PathBuf};

use crate::preprocess::DependencySet;
use crate::source::{InlineRegistry, SourceId};
use crate::utils::path::normalize_path;

/// Reports file changes under one root since the last call.
pub trait RootWatcher {
    fn poll(&mut self) -> Vec<FileChange>;
}

/// Creates the watcher for a search root.
pub type WatcherFactory = Box<dyn FnMut(&Path) -> Box<dyn RootWatcher>>;

/// Merges filesystem and inline changes into one changed set per poll.
pub struct ChangeDetector {
    roots: Vec<PathBuf>,
    /// Created on the first poll
    watchers: Option<Vec<Box<dyn RootWatcher>>>,
    /// `None` disables filesystem watching
    factory: Option<WatcherFactory>,
}

impl ChangeDetector {
    /// Watch `roots` with native OS notifications.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self::with_factory(
            roots,
            Box::new(|root: &Path| Box::new(NotifyWatcher::new(root)) as Box<dyn RootWatcher>),
        )
    }

    pub fn with_factory(roots: Vec<PathBuf>, factory: WatcherFactory) -> Self {
        Self {
            roots,
            watchers: None,
            factory: Some(factory),
        }
    }

    /// Only inline sources are tracked.
    pub fn inline_only() -> Self {
        Self {
            roots: Vec::new(),
            watchers: None,
            factory: None,
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn is_watching(&self) -> bool {
        self.watchers.is_some()
    }

    /// Everything that changed since the previous poll.
    ///
    /// Removed files are left out: their dependents keep the program they
    /// already have. Dirty inline sources are reported and cleared.
    pub fn poll(&mut self, registry: &mut InlineRegistry) -> DependencySet {
        let mut changed = DependencySet::default();

        for watcher in self.watchers_mut() {
            for change in watcher.poll() {
                if !change.kind.triggers_rebuild() {
                    crate::debug!("watch"; "ignoring {}: {}", change.kind.label(), change.path.display());
                    continue;
                }
                changed.insert(SourceId::File(normalize_path(&change.path)));
            }
        }

        for name in registry.take_dirty() {
            changed.insert(SourceId::Inline(name));
        }

        changed
    }

    fn watchers_mut(&mut self) -> &mut [Box<dyn RootWatcher>] {
        if self.watchers.is_none()
            && let Some(factory) = self.factory.as_mut()
        {
            let watchers = self.roots.iter().map(|root| factory(root)).collect();
            self.watchers = Some(watchers);
        }
        self.watchers.as_deref_mut().unwrap_or_default()
    }
}
