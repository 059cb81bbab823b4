use std::rc::Rc;

use crate::device::GlContext;
use crate::paint::Color;
use crate::time::FrameTime;

/// Context for one-time setup, valid while the GL context is current.
pub struct InitCtx<'a> {
    pub(crate) context: &'a GlContext,
}

impl InitCtx<'_> {
    /// Shared handle to the loaded GL function table.
    ///
    /// Resource wrappers keep a clone so they can delete their handle on drop.
    pub fn gl(&self) -> Rc<glow::Context> {
        self.context.gl().clone()
    }
}

/// Per-frame context passed to `core::App::frame`.
pub struct FrameCtx<'a> {
    pub(crate) context: &'a GlContext,
    pub time: FrameTime,
}

impl FrameCtx<'_> {
    /// Shared handle to the loaded GL function table.
    pub fn gl(&self) -> Rc<glow::Context> {
        self.context.gl().clone()
    }

    /// Clears the color buffer to `color`.
    pub fn clear(&self, color: Color) {
        self.context.clear(color);
    }

    /// Issues one non-indexed triangle-list draw call.
    ///
    /// Whatever vertex array and program are currently bound feed the draw;
    /// binding them is the caller's job.
    pub fn draw_triangles(&self, first: i32, vertex_count: i32) {
        self.context.draw_triangle_arrays(first, vertex_count);
    }
}
