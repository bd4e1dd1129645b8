use std::num::NonZeroU32;

use glutin::config::{Config, GlConfig};
use winit::dpi::PhysicalSize;

/// Picks the config with the most multisample buffers.
///
/// `glutin_winit::DisplayBuilder::build` requires a `Config` back and only
/// invokes the picker after finding at least one candidate, so an empty
/// iterator cannot reach this function.
pub(crate) fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, candidate| {
            if candidate.num_samples() > best.num_samples() {
                candidate
            } else {
                best
            }
        })
        .expect("glutin offered no GL configs")
}

/// Surface dimensions, or `None` while the window has no area (minimized).
pub(crate) fn surface_size(size: PhysicalSize<u32>) -> Option<(NonZeroU32, NonZeroU32)> {
    Some((NonZeroU32::new(size.width)?, NonZeroU32::new(size.height)?))
}

/// Viewport extent in the signed form the driver takes.
pub(crate) fn viewport_extent(size: PhysicalSize<u32>) -> (i32, i32) {
    let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
    (clamp(size.width), clamp(size.height))
}
