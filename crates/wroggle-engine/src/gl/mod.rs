//! Graphics driver seam.
//!
//! Everything the engine asks of the OpenGL driver goes through the [`Driver`]
//! trait. Handles are typed per resource kind ([`StageHandle`],
//! [`ProgramHandle`], ...) so a stage can never be passed where a program is
//! expected.
//!
//! Every driver call is expected to be wrapped in [`gl_call!`](crate::gl_call),
//! which attributes the first queued driver error to that exact call and stops
//! the process with a [`DriverFault`].

mod check;
mod driver;
mod handle;
mod native;

#[cfg(test)]
pub(crate) mod mock;

pub use check::{check_errors, clear_errors, error_name, DriverFault};
pub use driver::{BufferTarget, Driver, StageKind};
pub use handle::{BufferHandle, ProgramHandle, StageHandle, VertexArrayHandle};
pub use native::GlowDriver;
pub(crate) use native::ProgramValidation;
