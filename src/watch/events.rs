use std::path::{Path, PathBuf};

use notify::EventKind;
use notify::event::{ModifyKind, RenameMode};
use rustc_hash::FxHashMap;

use super::types::{ChangeKind, FileChange};
use crate::utils::path::{is_temp_file, normalize_path};

/// Raw notify events of one poll, deduplicated per path.
#[derive(Debug, Default)]
pub(super) struct EventBatch {
    /// Path → ChangeKind (dedup is free via HashMap key uniqueness)
    pub(super) changes: FxHashMap<PathBuf, ChangeKind>,
}

impl EventBatch {
    /// Add a notify event.
    pub(super) fn add_event(&mut self, event: &notify::Event) {
        let kind = match event.kind {
            EventKind::Create(_) => ChangeKind::Added,
            EventKind::Remove(_) => ChangeKind::Removed,
            // Ignore metadata-only changes (mtime/atime/chmod noise)
            EventKind::Modify(ModifyKind::Metadata(_)) => return,
            EventKind::Modify(ModifyKind::Name(mode)) => {
                self.add_rename(mode, &event.paths);
                return;
            }
            EventKind::Modify(_) => ChangeKind::Modified,
            _ => return,
        };

        crate::debug!("watch"; "raw notify: {:?} {:?}", event.kind, event.paths);

        for path in &event.paths {
            self.add_path(path, kind);
        }
    }

    /// Renames arrive as from/to halves or as one event carrying both paths.
    fn add_rename(&mut self, mode: RenameMode, paths: &[PathBuf]) {
        match (mode, paths) {
            (RenameMode::Both, [from, to, ..]) => {
                self.add_path(from, ChangeKind::Removed);
                self.add_path(to, ChangeKind::RenamedNew);
            }
            (RenameMode::From, _) => {
                for path in paths {
                    self.add_path(path, ChangeKind::Removed);
                }
            }
            (RenameMode::To, _) => {
                for path in paths {
                    self.add_path(path, ChangeKind::RenamedNew);
                }
            }
            _ => {
                // Backend could not tell which half this is
                for path in paths {
                    let kind = if path.exists() {
                        ChangeKind::RenamedNew
                    } else {
                        ChangeKind::Removed
                    };
                    self.add_path(path, kind);
                }
            }
        }
    }

    /// Record one path, applying dedup rules:
    /// - Removed + Added/Modified/RenamedNew → new kind (file was restored)
    /// - Modified/RenamedNew + Removed → Removed (file was deleted)
    /// - Added + Removed → nothing (appeared then vanished)
    /// - otherwise: first event wins
    fn add_path(&mut self, path: &Path, kind: ChangeKind) {
        if is_temp_file(path) {
            return;
        }

        let path = normalize_path(path);

        let Some(&existing) = self.changes.get(&path) else {
            crate::debug!("watch"; "event {}: {}", kind.label(), path.display());
            self.changes.insert(path, kind);
            return;
        };

        match (existing, kind) {
            (ChangeKind::Removed, ChangeKind::Removed) => {}
            (ChangeKind::Removed, _) => {
                crate::debug!("watch"; "restore removed->{}: {}", kind.label(), path.display());
                self.changes.insert(path, kind);
            }
            (ChangeKind::Modified | ChangeKind::RenamedNew, ChangeKind::Removed) => {
                crate::debug!("watch"; "upgrade {}->removed: {}", existing.label(), path.display());
                self.changes.insert(path, ChangeKind::Removed);
            }
            (ChangeKind::Added, ChangeKind::Removed) => {
                crate::debug!("watch"; "discard added+removed: {}", path.display());
                self.changes.remove(&path);
            }
            _ => {}
        }
    }

    pub(super) fn into_changes(self) -> Vec<FileChange> {
        self.changes
            .into_iter()
            .map(|(path, kind)| FileChange { path, kind })
            .collect()
    }
}
