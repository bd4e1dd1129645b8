//! OpenGL display, context and window surface.
//!
//! This module is responsible for:
//! - creating the window together with a matching GL config (glutin-winit)
//! - creating an OpenGL core context and making it current
//! - owning the window surface (swap interval, resize, buffer swap)
//! - exposing the [`GlowDriver`](crate::gl::GlowDriver) bound to that context

mod context;
mod error;
mod init;
mod surface;

pub use context::GlContext;
pub use error::SwapErrorAction;
pub use init::GlInit;
