//! Wroggle engine crate.
//!
//! This crate owns the platform + OpenGL pieces used by the demo binary:
//! shader resources, the driver seam, the GL context and the window loop.

pub mod gl;
pub mod shader;
pub mod device;
pub mod window;
pub mod core;

pub mod logging;
pub mod anim;
pub mod geometry;
pub mod scene;
