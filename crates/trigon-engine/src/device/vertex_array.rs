use std::rc::Rc;

use anyhow::{Result, anyhow};
use glow::HasContext;

use super::buffer::GlBuffer;

/// Describes how a buffer's `f32` elements feed one shader input location.
///
/// Stride and offset are given in elements; the byte math lives here so call
/// sites never hand-multiply by the element size.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: i32,
    pub stride_elements: i32,
    pub offset_elements: i32,
}

impl VertexAttribute {
    pub const fn new(
        location: u32,
        components: i32,
        stride_elements: i32,
        offset_elements: i32,
    ) -> Self {
        Self {
            location,
            components,
            stride_elements,
            offset_elements,
        }
    }

    pub const fn byte_stride(self) -> i32 {
        self.stride_elements * size_of::<f32>() as i32
    }

    pub const fn byte_offset(self) -> i32 {
        self.offset_elements * size_of::<f32>() as i32
    }
}

/// One vertex-array object and the attribute descriptors recorded on it.
///
/// The array holds a binding relationship to the buffers linked through
/// [`link_attribute`](Self::link_attribute), not ownership — the caller keeps
/// each buffer alive through any draw that uses this layout.
pub struct VertexArray {
    gl: Rc<glow::Context>,
    raw: glow::VertexArray,
    attributes: Vec<VertexAttribute>,
}

impl VertexArray {
    /// Allocates the vertex-array handle eagerly.
    pub fn new(gl: Rc<glow::Context>) -> Result<Self> {
        let raw = unsafe { gl.create_vertex_array() }
            .map_err(|e| anyhow!("failed to allocate vertex array: {e}"))?;

        Ok(Self {
            gl,
            raw,
            attributes: Vec::new(),
        })
    }

    /// Records `attr` against `buffer` and enables its location.
    ///
    /// Neither the location nor the stride/offset pair is validated; a
    /// mismatch feeds the shader garbage, exactly as the raw API would.
    pub fn link_attribute(&mut self, buffer: &GlBuffer, attr: VertexAttribute) {
        self.bind();
        buffer.bind();
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                attr.location,
                attr.components,
                glow::FLOAT,
                false,
                attr.byte_stride(),
                attr.byte_offset(),
            );
            self.gl.enable_vertex_attrib_array(attr.location);
        }
        self.attributes.push(attr);
    }

    /// Returns the recorded descriptor for `location`, if one was linked.
    pub fn attribute(&self, location: u32) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.location == location)
    }

    /// Makes this the current vertex array. Idempotent.
    pub fn bind(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.raw));
        }
    }

    /// Clears the current vertex array binding.
    pub fn unbind(&self) {
        unsafe {
            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tightly_packed_vec3_stride_is_twelve_bytes() {
        let attr = VertexAttribute::new(0, 3, 3, 0);
        assert_eq!(attr.byte_stride(), 12);
        assert_eq!(attr.byte_offset(), 0);
    }

    #[test]
    fn offset_converts_from_elements_to_bytes() {
        let attr = VertexAttribute::new(1, 2, 5, 3);
        assert_eq!(attr.byte_stride(), 20);
        assert_eq!(attr.byte_offset(), 12);
    }
}
