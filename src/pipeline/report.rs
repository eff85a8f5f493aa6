use crate::source::SourceId;

/// What one invalidation pass saw and did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidationReport {
    /// Pass counter, starting at 1
    pub tick: u64,
    /// Changed identities, sorted
    pub changed: Vec<SourceId>,
    /// Programs rebuilt and swapped in
    pub reloaded: Vec<String>,
    /// Programs whose rebuild failed; the previous program is still served
    pub kept_old: Vec<String>,
}

impl InvalidationReport {
    /// Nothing changed during this tick.
    pub fn is_quiet(&self) -> bool {
        self.changed.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.kept_old.is_empty()
    }

    /// Number of programs a rebuild was attempted for.
    pub fn attempted(&self) -> usize {
        self.reloaded.len() + self.kept_old.len()
    }
}
