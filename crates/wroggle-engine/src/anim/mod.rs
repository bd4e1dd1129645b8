//! Frame-to-frame animation state.
//!
//! State is owned by the application and advanced once per presented frame;
//! nothing here is global.

mod pulse;

pub use pulse::ColorPulse;
