use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{Context as _, Result, anyhow};
use glow::HasContext;
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use crate::paint::Color;

/// Owns the GL side of one window: surface, current context, and the loaded
/// function table.
///
/// All operations must stay on the thread that created the context; the type
/// is neither `Send` nor `Sync` by construction.
pub struct GlContext {
    gl: Rc<glow::Context>,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
}

impl GlContext {
    /// Creates the window together with a current OpenGL 3.3 context on it.
    ///
    /// Window and display creation are entangled on some platforms, so glutin
    /// builds both; the window is returned alongside the GL bundle and owns
    /// its own lifetime.
    pub fn create(
        event_loop: &ActiveEventLoop,
        attrs: WindowAttributes,
        vsync: bool,
    ) -> Result<(Window, Self)> {
        let template = ConfigTemplateBuilder::new().with_transparency(false);
        let display_builder = DisplayBuilder::new().with_window_attributes(Some(attrs));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|best, candidate| {
                        if candidate.num_samples() > best.num_samples() {
                            candidate
                        } else {
                            best
                        }
                    })
                    .expect("display offered no GL configs")
            })
            .map_err(|e| anyhow!("failed to build GL display: {e}"))?;

        let window = window.context("display builder did not create a window")?;
        let raw_handle = window.window_handle().ok().map(|h| h.as_raw());

        let gl_display = gl_config.display();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(raw_handle);
        // Version-unpinned retry for drivers that refuse an exact 3.3 request.
        let fallback_attributes = ContextAttributesBuilder::new().build(raw_handle);

        let not_current = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .or_else(|_| gl_display.create_context(&gl_config, &fallback_attributes))
                .context("failed to create GL context")?
        };

        let surface_attributes = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .context("failed to build GL surface attributes")?;
        let surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &surface_attributes)
                .context("failed to create GL surface")?
        };

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                log::warn!("failed to enable vsync: {e}");
            }
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };

        log::debug!("GL context ready ({} samples)", gl_config.num_samples());

        Ok((
            window,
            Self {
                gl: Rc::new(gl),
                surface,
                context,
            },
        ))
    }

    /// Shared handle to the loaded GL function table.
    pub fn gl(&self) -> &Rc<glow::Context> {
        &self.gl
    }

    /// Resizes the surface and viewport after a window resize.
    ///
    /// Zero-sized dimensions (minimized window) are ignored.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };

        self.surface.resize(&self.context, width, height);
        unsafe {
            self.gl.viewport(0, 0, size.width as i32, size.height as i32);
        }
    }

    /// Presents the frame.
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }

    /// Clears the color buffer to `color`.
    pub fn clear(&self, color: Color) {
        unsafe {
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    /// One non-indexed `TRIANGLES` draw from the currently bound state.
    pub fn draw_triangle_arrays(&self, first: i32, vertex_count: i32) {
        unsafe {
            self.gl.draw_arrays(glow::TRIANGLES, first, vertex_count);
        }
    }
}
