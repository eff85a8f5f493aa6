use glow::HasContext;

use super::{Backend, Compiled, Diagnostics, StageKind};

/// OpenGL backend over a caller-owned `glow` context.
///
/// The context must be current on the calling thread for every call, which
/// the single-threaded tick loop guarantees.
pub struct GlowBackend<'gl, T: HasContext> {
    gl: &'gl T,
}

impl<'gl, T: HasContext> GlowBackend<'gl, T> {
    pub fn new(gl: &'gl T) -> Self {
        Self { gl }
    }
}

fn gl_stage(kind: StageKind) -> u32 {
    match kind {
        StageKind::Vertex => glow::VERTEX_SHADER,
        StageKind::Fragment => glow::FRAGMENT_SHADER,
    }
}

impl<T: HasContext> Backend for GlowBackend<'_, T> {
    type Stage = T::Shader;
    type Program = T::Program;

    fn compile_stage(
        &mut self,
        kind: StageKind,
        text: &str,
    ) -> Result<Compiled<T::Shader>, Diagnostics> {
        unsafe {
            let shader = self
                .gl
                .create_shader(gl_stage(kind))
                .map_err(Diagnostics::new)?;

            self.gl.shader_source(shader, text);
            self.gl.compile_shader(shader);

            let log = Diagnostics::new(self.gl.get_shader_info_log(shader));
            if !self.gl.get_shader_compile_status(shader) {
                self.gl.delete_shader(shader);
                return Err(log);
            }

            Ok(Compiled::with_diagnostics(shader, log))
        }
    }

    fn link(
        &mut self,
        vertex: &T::Shader,
        fragment: &T::Shader,
    ) -> Result<Compiled<T::Program>, Diagnostics> {
        unsafe {
            let program = self.gl.create_program().map_err(Diagnostics::new)?;

            self.gl.attach_shader(program, *vertex);
            self.gl.attach_shader(program, *fragment);
            self.gl.link_program(program);

            let log = Diagnostics::new(self.gl.get_program_info_log(program));
            let linked = self.gl.get_program_link_status(program);

            self.gl.detach_shader(program, *vertex);
            self.gl.detach_shader(program, *fragment);

            if !linked {
                self.gl.delete_program(program);
                return Err(log);
            }

            Ok(Compiled::with_diagnostics(program, log))
        }
    }

    fn release_stage(&mut self, stage: T::Shader) {
        unsafe { self.gl.delete_shader(stage) }
    }

    fn release_program(&mut self, program: T::Program) {
        unsafe { self.gl.delete_program(program) }
    }
}
