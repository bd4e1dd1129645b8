//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, and drives the
//! application's lifecycle callbacks around the GL context.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
