use crate::error::ActivationError;
use crate::gl::{GlApi, ShaderStage};

/// Built-in vertex stage: maps the unit quad onto the viewport and passes the
/// quad coordinates to the fragment stage as `pixelCoords`.
pub const DEFAULT_VERTEX_SHADER: &str = "\
attribute vec3 position;
varying vec2 pixelCoords;
void main() {
    gl_Position = vec4(position.xy * 2.0 - 1.0, 0.0, 1.0);
    pixelCoords = position.xy;
}
";

/// Name of the vertex attribute fed with the quad geometry.
pub const POSITION_ATTRIBUTE: &str = "position";

/// Compiles fragment sources against a fixed vertex stage.
#[derive(Debug, Clone)]
pub struct ProgramCompiler {
    vertex_source: String,
}

impl Default for ProgramCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_VERTEX_SHADER)
    }
}

impl ProgramCompiler {
    pub fn new(vertex_source: impl Into<String>) -> Self {
        Self {
            vertex_source: vertex_source.into(),
        }
    }

    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    /// Compiles and links a program for `fragment_source` and makes it current.
    ///
    /// Stage objects are released once linked. On failure every object created
    /// here is deleted and the compiler or linker log is returned.
    pub fn compile<G: GlApi>(
        &self,
        gl: &G,
        fragment_source: &str,
    ) -> Result<G::Program, ActivationError> {
        let vertex = compile_stage(gl, ShaderStage::Vertex, &self.vertex_source)?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, fragment_source) {
            Ok(shader) => shader,
            Err(err) => {
                gl.delete_shader(vertex);
                return Err(err);
            }
        };

        let program = match gl.create_program() {
            Ok(program) => program,
            Err(err) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(ActivationError::Gl(err));
            }
        };

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        if !gl.program_link_status(program) {
            let log = gl.program_info_log(program);
            gl.delete_program(program);
            return Err(ActivationError::Link { log });
        }

        gl.use_program(Some(program));
        log::debug!("linked program {program:?}");

        Ok(program)
    }
}

fn compile_stage<G: GlApi>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, ActivationError> {
    let shader = gl.create_shader(stage).map_err(ActivationError::Gl)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(ActivationError::Compile { stage, log });
    }

    Ok(shader)
}
