use crate::backend::StageKind;
use crate::preprocess::{DependencySet, DirectiveWarning};
use crate::source::SourceId;

/// Expanded text of one stage, kept for inspection.
#[derive(Debug, Clone)]
pub struct StageSource {
    /// Virtual name the stage was expanded from, e.g. `blur.frag`
    pub name: String,
    pub text: String,
    pub warnings: Vec<DirectiveWarning>,
}

/// The latest successful build of one program.
///
/// Owns its program exclusively. It is only ever replaced as a whole, so the
/// program inside is always the product of one complete, successful build.
#[derive(Debug)]
pub struct CacheEntry<P> {
    pub(super) name: String,
    pub(super) program: P,
    pub(super) dependencies: DependencySet,
    pub(super) vertex: StageSource,
    pub(super) fragment: StageSource,
}

impl<P> CacheEntry<P> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn program(&self) -> &P {
        &self.program
    }

    /// Every source unit either stage consumed during the build.
    pub fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }

    pub fn stage(&self, kind: StageKind) -> &StageSource {
        match kind {
            StageKind::Vertex => &self.vertex,
            StageKind::Fragment => &self.fragment,
        }
    }

    /// Whether any of `changed` went into this build.
    pub fn depends_on_any(&self, changed: &DependencySet) -> bool {
        !self.dependencies.is_disjoint(changed)
    }

    pub fn depends_on(&self, id: &SourceId) -> bool {
        self.dependencies.contains(id)
    }

    /// Dependencies in a stable order, for display.
    pub fn sorted_dependencies(&self) -> Vec<&SourceId> {
        let mut deps: Vec<_> = self.dependencies.iter().collect();
        deps.sort();
        deps
    }
}
