use anyhow::Result;
use winit::event::WindowEvent;

use crate::gl::GlowDriver;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the binary.
///
/// Lifecycle: `on_init` once the context is current, `on_frame` per redraw,
/// `on_exit` once before the context is destroyed. GPU resources created in
/// `on_init` are released in `on_exit`.
pub trait App {
    /// Creates GPU resources. An error stops the runtime and is returned from
    /// [`Runtime::run`](crate::window::Runtime::run).
    fn on_init(&mut self, gl: &GlowDriver) -> Result<()>;

    /// Called for window events before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame, before buffers are swapped.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Releases GPU resources while the context is still current.
    fn on_exit(&mut self, gl: &GlowDriver);
}
