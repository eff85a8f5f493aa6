use rustc_hash::FxHashMap;

use super::strip_inline_prefix;

/// One programmatically supplied source unit.
#[derive(Debug, Clone)]
struct InlineSource {
    content: String,
    /// Content changed since the change detector last looked
    dirty: bool,
}

/// Programmatic namespace of the source provider.
///
/// Call sites commonly re-register the same text every frame, so an update
/// only counts as a change when the bytes actually differ.
#[derive(Debug, Default)]
pub struct InlineRegistry {
    sources: FxHashMap<String, InlineSource>,
}

impl InlineRegistry {
    /// Insert or update an inline source.
    ///
    /// Returns `true` if this call marked the source dirty. A first
    /// registration never does: nothing can have been built from it yet.
    pub fn register(&mut self, name: &str, content: &str) -> bool {
        let name = strip_inline_prefix(name);

        match self.sources.get_mut(&name) {
            Some(existing) => {
                if existing.content == content {
                    return false;
                }
                existing.content = content.to_owned();
                existing.dirty = true;
                crate::debug!("include"; "inline source <inline>/{} changed", name);
                true
            }
            None => {
                self.sources.insert(
                    name,
                    InlineSource {
                        content: content.to_owned(),
                        dirty: false,
                    },
                );
                false
            }
        }
    }

    /// Current content of a normalized inline name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(|s| s.content.as_str())
    }

    pub fn is_dirty(&self, name: &str) -> bool {
        self.sources
            .get(&strip_inline_prefix(name))
            .is_some_and(|s| s.dirty)
    }

    /// Collect the names of all dirty sources and clear their flags.
    pub fn take_dirty(&mut self) -> Vec<String> {
        self.sources
            .iter_mut()
            .filter(|(_, source)| source.dirty)
            .map(|(name, source)| {
                source.dirty = false;
                name.clone()
            })
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
