/// Initialization parameters for the GL layer.
///
/// Keep this structure minimal. Add flags only when a concrete platform
/// requirement exists.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested OpenGL core profile version `(major, minor)`.
    pub version: (u8, u8),

    /// Wait for vertical blank on buffer swap (swap interval 1).
    pub vsync: bool,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            version: (3, 3),
            vsync: true,
        }
    }
}
