use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::gl::GlowDriver;

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub gl: &'a GlowDriver,
    pub window: &'a Window,
    /// Drawable size in physical pixels.
    pub size: PhysicalSize<u32>,
    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}
