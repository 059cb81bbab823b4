use anyhow::Result;

use super::ctx::{FrameCtx, InitCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the binary.
///
/// `Args` carries user configuration into `init` (launch options, variant
/// switches). Both callbacks run on the thread that owns the GL context.
pub trait App<Args = ()>: Sized + 'static {
    /// Called exactly once, after the OpenGL context has been made current.
    ///
    /// All GPU resource construction belongs here. An error aborts the run
    /// and propagates out of [`Runtime::run`](crate::window::Runtime::run).
    fn init(ctx: &mut InitCtx<'_>, args: Args) -> Result<Self>;

    /// Called once per rendered frame. The runtime swaps buffers afterwards.
    fn frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
