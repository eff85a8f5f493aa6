use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use super::RootWatcher;
use super::events::EventBatch;
use super::types::FileChange;
use crate::utils::path::normalize_path;

/// Recursive OS watcher over one search root.
///
/// Events are buffered by notify's callback thread into a channel and
/// drained without blocking on every [`RootWatcher::poll`]. A root that
/// does not exist yet (or was deleted and recreated) is attached on the
/// next poll that finds it on disk.
pub struct NotifyWatcher {
    root: PathBuf,
    /// Channel fed by the notify callback
    rx: Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive); `None` if the OS refused one
    watcher: Option<RecommendedWatcher>,
    /// Path currently registered with the watcher
    attached: Option<PathBuf>,
}

impl NotifyWatcher {
    pub fn new(root: &Path) -> Self {
        let (tx, rx) = mpsc::channel();

        let watcher = match notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        }) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                crate::log!("watch"; "cannot watch {}: {}", root.display(), e);
                None
            }
        };

        let mut this = Self {
            root: root.to_path_buf(),
            rx,
            watcher,
            attached: None,
        };
        this.maintain();
        this
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Attach the root if it exists, drop the handle if it vanished.
    fn maintain(&mut self) {
        let Some(watcher) = self.watcher.as_mut() else {
            return;
        };

        if let Some(path) = &self.attached {
            if path.exists() {
                return;
            }
            let _ = watcher.unwatch(path);
            crate::debug!("watch"; "root vanished: {}", path.display());
            self.attached = None;
        }

        if !self.root.exists() {
            return;
        }

        let path = normalize_path(&self.root);
        match watcher.watch(&path, RecursiveMode::Recursive) {
            Ok(()) => {
                crate::debug!("watch"; "attached {}", path.display());
                self.attached = Some(path);
            }
            Err(e) => crate::debug!("watch"; "attach {} failed: {}", path.display(), e),
        }
    }
}

impl RootWatcher for NotifyWatcher {
    fn poll(&mut self) -> Vec<FileChange> {
        self.maintain();

        let mut batch = EventBatch::default();
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => batch.add_event(&event),
                Ok(Err(e)) => crate::log!("watch"; "notify error: {}", e),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        batch.into_changes()
    }
}
