//! The demo scene: one quad drawn with a pulsing uniform color.

mod pulsing_quad;

pub use pulsing_quad::{PulsingQuad, COLOR_UNIFORM};
