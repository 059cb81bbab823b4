use std::rc::Rc;

use anyhow::{Result, anyhow};
use glow::HasContext;

/// Binding target of a data buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferKind {
    Vertex,
    Index,
}

impl BufferKind {
    pub(crate) fn gl_target(self) -> u32 {
        match self {
            BufferKind::Vertex => glow::ARRAY_BUFFER,
            BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// One GPU data buffer, filled once at construction.
///
/// The upload uses a `STATIC_DRAW` hint; the contents are never touched
/// again. Dropping the wrapper deletes the handle.
pub struct GlBuffer {
    gl: Rc<glow::Context>,
    raw: glow::Buffer,
    kind: BufferKind,
    byte_len: usize,
}

impl GlBuffer {
    /// Allocates a buffer object, binds it as `kind`, and uploads `data`.
    pub fn new(gl: Rc<glow::Context>, kind: BufferKind, data: &[f32]) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(data);

        let raw = unsafe { gl.create_buffer() }
            .map_err(|e| anyhow!("failed to allocate GL buffer: {e}"))?;
        unsafe {
            gl.bind_buffer(kind.gl_target(), Some(raw));
            gl.buffer_data_u8_slice(kind.gl_target(), bytes, glow::STATIC_DRAW);
        }

        Ok(Self {
            gl,
            raw,
            kind,
            byte_len: bytes.len(),
        })
    }

    /// Re-binds this buffer as the current one for its target. Idempotent.
    pub fn bind(&self) {
        unsafe {
            self.gl.bind_buffer(self.kind.gl_target(), Some(self.raw));
        }
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// Size of the uploaded data in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

impl Drop for GlBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_kind_maps_to_array_buffer() {
        assert_eq!(BufferKind::Vertex.gl_target(), glow::ARRAY_BUFFER);
    }

    #[test]
    fn index_kind_maps_to_element_array_buffer() {
        assert_eq!(BufferKind::Index.gl_target(), glow::ELEMENT_ARRAY_BUFFER);
    }

    #[test]
    fn float_slices_cast_to_four_bytes_per_element() {
        let data = [0.0f32; 9];
        let bytes: &[u8] = bytemuck::cast_slice(&data);
        assert_eq!(bytes.len(), 36);
    }
}
