use std::fmt;
use std::rc::Rc;

use glow::HasContext;

use crate::paint::Color;

/// Shader stage kind, carried by compile errors.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_kind(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failure during shader program construction.
///
/// All variants are fatal to [`ShaderProgram::new`]; there is no partial
/// program to recover.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {log}")]
    Link { log: String },

    #[error("shader object allocation failed: {0}")]
    Allocate(String),
}

/// One linked shader program.
///
/// The two stage objects compiled during construction are transient; only the
/// linked program handle survives. Dropping the wrapper deletes it.
pub struct ShaderProgram {
    gl: Rc<glow::Context>,
    raw: glow::Program,
}

impl ShaderProgram {
    /// Compiles both stages and links them into a program.
    ///
    /// Compile failures surface the driver's info log per stage; a link
    /// failure surfaces the program log. Stage objects created before a
    /// failure are deleted on the way out.
    pub fn new(
        gl: Rc<glow::Context>,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, ShaderError> {
        let vs = compile_stage(&gl, ShaderStage::Vertex, vertex_src)?;
        let fs = match compile_stage(&gl, ShaderStage::Fragment, fragment_src) {
            Ok(fs) => fs,
            Err(err) => {
                unsafe { gl.delete_shader(vs) };
                return Err(err);
            }
        };

        let raw = match unsafe { gl.create_program() } {
            Ok(program) => program,
            Err(log) => {
                unsafe {
                    gl.delete_shader(vs);
                    gl.delete_shader(fs);
                }
                return Err(ShaderError::Allocate(log));
            }
        };

        unsafe {
            gl.attach_shader(raw, vs);
            gl.attach_shader(raw, fs);
            gl.link_program(raw);
        }
        let linked = unsafe { gl.get_program_link_status(raw) };

        // The linked program subsumes the stage objects either way.
        unsafe {
            gl.detach_shader(raw, vs);
            gl.detach_shader(raw, fs);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
        }

        if !linked {
            let log = unsafe { gl.get_program_info_log(raw) };
            unsafe { gl.delete_program(raw) };
            return Err(ShaderError::Link { log });
        }

        Ok(Self { gl, raw })
    }

    /// Makes this program current for subsequent draws. Idempotent.
    pub fn activate(&self) {
        unsafe {
            self.gl.use_program(Some(self.raw));
        }
    }

    /// Location of a named uniform, or `None` if the linked program has no
    /// active uniform by that name.
    pub fn uniform_location(&self, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(self.raw, name) }
    }

    /// Uploads `color` to a vec4 uniform.
    ///
    /// A `None` location is a silent no-op, matching the API's `-1` sentinel.
    /// The program must be active for the upload to land.
    pub fn set_color(&self, location: Option<&glow::UniformLocation>, color: Color) {
        unsafe {
            self.gl
                .uniform_4_f32(location, color.r, color.g, color.b, color.a);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.raw);
        }
    }
}

fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    src: &str,
) -> Result<glow::Shader, ShaderError> {
    let shader = unsafe { gl.create_shader(stage.gl_kind()) }.map_err(ShaderError::Allocate)?;

    unsafe {
        gl.shader_source(shader, src);
        gl.compile_shader(shader);
    }

    if unsafe { gl.get_shader_compile_status(shader) } {
        Ok(shader)
    } else {
        let log = unsafe { gl.get_shader_info_log(shader) };
        unsafe { gl.delete_shader(shader) };
        Err(ShaderError::Compile { stage, log })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_display_as_lowercase_words() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn compile_error_names_stage_and_carries_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3: syntax error".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("fragment"));
        assert!(text.contains("0:3: syntax error"));
    }

    #[test]
    fn link_error_carries_log() {
        let err = ShaderError::Link {
            log: "unresolved varying".to_string(),
        };
        assert!(err.to_string().contains("unresolved varying"));
    }
}
