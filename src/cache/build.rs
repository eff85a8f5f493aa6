//! One full build of a program: expand both stages, compile, link.

use super::entry::{CacheEntry, StageSource};
use crate::backend::{Backend, Compiled, StageKind};
use crate::config::StagesConfig;
use crate::error::BuildError;
use crate::preprocess::{self, Expansion};
use crate::source::SourceProvider;
use crate::utils::plural_count;

/// Everything a build needs besides the cache itself.
pub struct BuildContext<'a, B: Backend> {
    pub provider: &'a SourceProvider,
    pub backend: &'a mut B,
    pub stages: &'a StagesConfig,
}

/// Build `name` from scratch.
///
/// The dependency set is the union over both stages and is computed fresh;
/// nothing from an earlier build of the same name is carried over. On error
/// every backend handle created so far has been released.
pub(super) fn build_program<B: Backend>(
    name: &str,
    ctx: &mut BuildContext<'_, B>,
) -> Result<CacheEntry<B::Program>, BuildError> {
    let vertex_name = ctx.stages.stage_name(name, StageKind::Vertex);
    let fragment_name = ctx.stages.stage_name(name, StageKind::Fragment);

    // Each stage gets its own include guard
    let vertex = preprocess::expand(ctx.provider, &vertex_name)?;
    let fragment = preprocess::expand(ctx.provider, &fragment_name)?;

    let mut dependencies = vertex.dependencies.clone();
    dependencies.extend(fragment.dependencies.iter().cloned());

    let vertex_stage = compile(name, StageKind::Vertex, &vertex, ctx.backend);
    let fragment_stage = compile(name, StageKind::Fragment, &fragment, ctx.backend);

    let (vertex_stage, fragment_stage) = match (vertex_stage, fragment_stage) {
        (Ok(v), Ok(f)) => (v, f),
        (Ok(v), Err(e)) => {
            ctx.backend.release_stage(v);
            return Err(e);
        }
        (Err(e), Ok(f)) => {
            ctx.backend.release_stage(f);
            return Err(e);
        }
        (Err(e), Err(second)) => {
            // Only one error travels up, the other one must not vanish
            crate::log!("backend"; "{}", second);
            return Err(e);
        }
    };

    let linked = ctx.backend.link(&vertex_stage, &fragment_stage);
    ctx.backend.release_stage(vertex_stage);
    ctx.backend.release_stage(fragment_stage);

    let Compiled { value: program, diagnostics } =
        linked.map_err(|diagnostics| BuildError::LinkFailure {
            program: name.to_owned(),
            diagnostics,
        })?;

    if !diagnostics.is_empty() {
        crate::log!("backend"; "link log \"{}\":\n{}", name, diagnostics);
    }

    crate::debug!("build"; "built \"{}\" from {}", name, plural_count(dependencies.len(), "source"));

    Ok(CacheEntry {
        name: name.to_owned(),
        program,
        dependencies,
        vertex: stage_source(vertex_name, vertex),
        fragment: stage_source(fragment_name, fragment),
    })
}

fn compile<B: Backend>(
    program: &str,
    kind: StageKind,
    expansion: &Expansion,
    backend: &mut B,
) -> Result<B::Stage, BuildError> {
    match backend.compile_stage(kind, &expansion.text) {
        Ok(Compiled { value, diagnostics }) => {
            if !diagnostics.is_empty() {
                crate::log!("backend"; "{} stage log \"{}\":\n{}", kind, program, diagnostics);
            }
            Ok(value)
        }
        Err(diagnostics) => Err(BuildError::CompileFailure {
            program: program.to_owned(),
            stage: kind,
            diagnostics,
        }),
    }
}

fn stage_source(name: String, expansion: Expansion) -> StageSource {
    StageSource {
        name,
        text: expansion.text,
        warnings: expansion.warnings,
    }
}
