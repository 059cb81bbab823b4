//! OpenGL context + resource wrappers.
//!
//! This module is responsible for:
//! - bootstrapping the glutin display/context/surface for a winit window
//! - loading the glow function table
//! - RAII wrappers over the GL objects the engine hands out

mod buffer;
mod context;
mod shader;
mod vertex_array;

pub use buffer::{BufferKind, GlBuffer};
pub use context::GlContext;
pub use shader::{ShaderError, ShaderProgram, ShaderStage};
pub use vertex_array::{VertexArray, VertexAttribute};
