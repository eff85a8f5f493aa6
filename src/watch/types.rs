use std::path::PathBuf;

/// What happened to a file since the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    /// Destination of a rename (editors that save via rename-over)
    RenamedNew,
    Removed,
}

impl ChangeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::RenamedNew => "renamed",
            Self::Removed => "removed",
        }
    }

    /// Removal alone never triggers a rebuild: the last good program keeps
    /// being served instead.
    pub fn triggers_rebuild(self) -> bool {
        !matches!(self, Self::Removed)
    }
}

/// One path reported by a root watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl FileChange {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}
