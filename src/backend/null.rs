use super::{Backend, Compiled, Diagnostics, StageKind};

/// Stage handle of the [`NullBackend`].
#[derive(Debug, PartialEq, Eq)]
pub struct NullStage {
    kind: StageKind,
}

/// Program handle of the [`NullBackend`].
#[derive(Debug, PartialEq, Eq)]
pub struct NullProgram {
    id: u64,
}

impl NullProgram {
    /// Unique per backend instance, never reused.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Backend without a GPU.
///
/// Accepts every stage and hands out sequential ids, so the whole
/// resolve/expand/cache/reload path can run headless. Stages with nothing but
/// whitespace get a warning, the way a real driver would complain about an
/// empty shader.
#[derive(Debug, Default)]
pub struct NullBackend {
    next_id: u64,
    live_stages: usize,
    live_programs: usize,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages compiled and not yet released.
    pub fn live_stages(&self) -> usize {
        self.live_stages
    }

    /// Programs linked and not yet released.
    pub fn live_programs(&self) -> usize {
        self.live_programs
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Backend for NullBackend {
    type Stage = NullStage;
    type Program = NullProgram;

    fn compile_stage(
        &mut self,
        kind: StageKind,
        text: &str,
    ) -> Result<Compiled<NullStage>, Diagnostics> {
        let stage = NullStage { kind };
        self.live_stages += 1;

        if text.trim().is_empty() {
            let warning = Diagnostics::new(format!("warning: {kind} stage is empty"));
            return Ok(Compiled::with_diagnostics(stage, warning));
        }
        Ok(Compiled::new(stage))
    }

    fn link(
        &mut self,
        vertex: &NullStage,
        fragment: &NullStage,
    ) -> Result<Compiled<NullProgram>, Diagnostics> {
        if vertex.kind != StageKind::Vertex || fragment.kind != StageKind::Fragment {
            return Err(Diagnostics::new(format!(
                "error: expected vertex + fragment, got {} + {}",
                vertex.kind, fragment.kind
            )));
        }

        self.live_programs += 1;
        Ok(Compiled::new(NullProgram { id: self.next_id() }))
    }

    fn release_stage(&mut self, _stage: NullStage) {
        self.live_stages -= 1;
    }

    fn release_program(&mut self, _program: NullProgram) {
        self.live_programs -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_and_link() {
        let mut backend = NullBackend::new();
        let vert = backend.compile_stage(StageKind::Vertex, "void main() {}").unwrap();
        let frag = backend.compile_stage(StageKind::Fragment, "void main() {}").unwrap();
        assert!(vert.diagnostics.is_empty());

        let program = backend.link(&vert.value, &frag.value).unwrap().value;
        backend.release_stage(vert.value);
        backend.release_stage(frag.value);

        assert_eq!(backend.live_stages(), 0);
        assert_eq!(backend.live_programs(), 1);
        backend.release_program(program);
        assert_eq!(backend.live_programs(), 0);
    }

    #[test]
    fn test_empty_stage_warns() {
        let mut backend = NullBackend::new();
        let stage = backend.compile_stage(StageKind::Fragment, " \n").unwrap();
        assert!(!stage.diagnostics.is_empty());
        assert!(stage.diagnostics.as_str().contains("fragment"));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut backend = NullBackend::new();
        let mut program = || {
            let v = backend.compile_stage(StageKind::Vertex, "v").unwrap().value;
            let f = backend.compile_stage(StageKind::Fragment, "f").unwrap().value;
            backend.link(&v, &f).unwrap().value
        };
        let a = program();
        let b = program();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_swapped_stages_fail_to_link() {
        let mut backend = NullBackend::new();
        let v = backend.compile_stage(StageKind::Vertex, "v").unwrap().value;
        let f = backend.compile_stage(StageKind::Fragment, "f").unwrap().value;
        assert!(backend.link(&f, &v).is_err());
        assert_eq!(backend.live_programs(), 0);
    }
}
