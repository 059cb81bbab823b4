use anyhow::{Context as _, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, InitCtx};
use crate::device::GlContext;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub vsync: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "trigon".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            vsync: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the window closes or the app requests exit.
    ///
    /// A setup failure (window, GL context, or `App::init`) aborts the loop
    /// and is returned from here.
    pub fn run<A, Args>(config: RuntimeConfig, args: Args) -> Result<()>
    where
        A: App<Args>,
        Args: 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState::<A, Args>::new(config, args);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Everything that exists only while the app is running.
///
/// Field order is drop order: app resources delete their GL handles while
/// the context is still current, then the GL bundle goes, then the window.
struct Gfx<A> {
    app: A,
    ctx: GlContext,
    clock: FrameClock,
    window: Window,
}

/// Runtime lifecycle: `gfx` is `None` before setup and again after disposal;
/// both transitions happen at most once.
struct RuntimeState<A, Args> {
    config: RuntimeConfig,
    args: Option<Args>,
    gfx: Option<Gfx<A>>,
    failure: Option<anyhow::Error>,
}

impl<A, Args> RuntimeState<A, Args>
where
    A: App<Args>,
    Args: 'static,
{
    fn new(config: RuntimeConfig, args: Args) -> Self {
        Self {
            config,
            args: Some(args),
            gfx: None,
            failure: None,
        }
    }

    fn init_gfx(&mut self, event_loop: &ActiveEventLoop, args: Args) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let (window, ctx) = GlContext::create(event_loop, attrs, self.config.vsync)?;

        let mut init_ctx = InitCtx { context: &ctx };
        let app = A::init(&mut init_ctx, args).context("application setup failed")?;

        self.gfx = Some(Gfx {
            app,
            ctx,
            clock: FrameClock::new(),
            window,
        });
        Ok(())
    }

    /// One-way Running → Disposed transition. Safe to reach without ever
    /// having entered Running: there is simply nothing to drop.
    fn dispose(&mut self, event_loop: &ActiveEventLoop) {
        self.gfx = None;
        event_loop.exit();
    }
}

impl<A, Args> ApplicationHandler for RuntimeState<A, Args>
where
    A: App<Args>,
    Args: 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }
        let Some(args) = self.args.take() else {
            return;
        };

        if let Err(e) = self.init_gfx(event_loop, args) {
            log::error!("setup failed: {e:#}");
            self.failure = Some(e);
            event_loop.exit();
            return;
        }

        if let Some(gfx) = &self.gfx {
            gfx.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: re-request after every drained event batch.
        if let Some(gfx) = &self.gfx {
            gfx.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self
            .gfx
            .as_ref()
            .is_none_or(|gfx| gfx.window.id() != window_id)
        {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.dispose(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(gfx) = &self.gfx {
                    gfx.ctx.resize(new_size);
                    gfx.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(gfx) = self.gfx.as_mut() else {
                    return;
                };

                let time = gfx.clock.tick();
                let control = {
                    let mut ctx = FrameCtx {
                        context: &gfx.ctx,
                        time,
                    };
                    gfx.app.frame(&mut ctx)
                };

                gfx.window.pre_present_notify();
                if let Err(e) = gfx.ctx.swap_buffers() {
                    log::warn!("presentation failed: {e:#}");
                }

                if control == AppControl::Exit {
                    self.dispose(event_loop);
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_tutorial_window() {
        let config = RuntimeConfig::default();
        assert_eq!(config.initial_size, LogicalSize::new(800.0, 600.0));
        assert!(config.vsync);
    }
}
