//! Source resolution for shader stages and their includes.
//!
//! A virtual name is looked up in two namespaces, in order:
//!
//! ```text
//! 1. inline registry   <inline>/common.glsl   (pushed by calling code)
//! 2. search roots      shaders/common.glsl, ../3d_lib/shaders/common.glsl, ...
//! ```
//!
//! The first hit wins and determines the [`SourceId`] that gets recorded as a
//! dependency of whatever is being preprocessed.

mod registry;

pub use registry::InlineRegistry;

use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::error::BuildError;
use crate::utils::path::{normalize_name, normalize_path};

/// Reserved prefix of the programmatic namespace.
pub const INLINE_PREFIX: &str = "<inline>/";

/// Concrete identity of a resolved source unit.
///
/// The two variants are the two namespaces, so an inline name can never
/// collide with a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceId {
    /// Absolute, normalized path under one of the search roots.
    File(PathBuf),
    /// Normalized virtual name in the inline registry (without prefix).
    Inline(String),
}

impl SourceId {
    pub fn inline(name: &str) -> Self {
        Self::Inline(strip_inline_prefix(name))
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline(name) => write!(f, "{INLINE_PREFIX}{name}"),
        }
    }
}

/// Normalize a name for the inline namespace, accepting it with or without
/// the reserved prefix.
pub(crate) fn strip_inline_prefix(name: &str) -> String {
    normalize_name(name.strip_prefix(INLINE_PREFIX).unwrap_or(name))
}

/// A successfully resolved source unit.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub id: SourceId,
    pub content: String,
}

/// Resolves virtual names against the inline registry and the search roots.
#[derive(Debug, Default)]
pub struct SourceProvider {
    /// Ordered search roots, earliest wins
    roots: Vec<PathBuf>,
    registry: InlineRegistry,
}

impl SourceProvider {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            registry: InlineRegistry::default(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn registry(&self) -> &InlineRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut InlineRegistry {
        &mut self.registry
    }

    /// Resolve a virtual name to its content and concrete identity.
    ///
    /// A name spelled with [`INLINE_PREFIX`] only looks in the registry.
    /// Returns `Ok(None)` if no namespace has it, and an error if the first
    /// matching file cannot be read.
    pub fn resolve(&self, name: &str) -> Result<Option<Resolved>, BuildError> {
        let inline_only = name.starts_with(INLINE_PREFIX);
        let name = strip_inline_prefix(name);

        if let Some(content) = self.registry.get(&name) {
            return Ok(Some(Resolved {
                content: content.to_owned(),
                id: SourceId::Inline(name),
            }));
        }
        if inline_only {
            return Ok(None);
        }

        for root in &self.roots {
            let path = root.join(&name);
            if !path.is_file() {
                continue;
            }
            let path = normalize_path(&path);
            let content = fs::read_to_string(&path).map_err(|source| {
                crate::debug!("include"; "cannot read {}: {}", path.display(), source);
                BuildError::SourceUnreadable {
                    path: path.clone(),
                    requested_by: None,
                    source,
                }
            })?;
            return Ok(Some(Resolved {
                id: SourceId::File(path),
                content,
            }));
        }

        Ok(None)
    }
}
