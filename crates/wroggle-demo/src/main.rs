use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use wroggle_engine::anim::ColorPulse;
use wroggle_engine::core::{App, AppControl, FrameCtx};
use wroggle_engine::device::GlInit;
use wroggle_engine::gl::GlowDriver;
use wroggle_engine::logging::{init_logging, LoggingConfig};
use wroggle_engine::scene::PulsingQuad;
use wroggle_engine::shader::ShaderSource;
use wroggle_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

const DEFAULT_SHADER: &str = "res/shaders/Basic.shader";

struct Demo {
    source: ShaderSource,
    scene: Option<PulsingQuad<GlowDriver>>,
}

impl App for Demo {
    fn on_init(&mut self, gl: &GlowDriver) -> Result<()> {
        let scene = PulsingQuad::setup(gl, &self.source, ColorPulse::default())?;
        self.scene = Some(scene);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        if let Some(scene) = self.scene.as_mut() {
            scene.frame(ctx.gl);
        }
        AppControl::Continue
    }

    fn on_exit(&mut self, gl: &GlowDriver) {
        if let Some(scene) = self.scene.take() {
            scene.delete(gl);
        }
    }
}

/// Resolves the shader resource path.
///
/// An explicit argument is used as given. The default is looked up in the
/// working directory first, then next to this crate's manifest so that
/// `cargo run` works from the workspace root.
fn shader_path(arg: Option<String>) -> PathBuf {
    if let Some(arg) = arg {
        return PathBuf::from(arg);
    }

    let local = Path::new(DEFAULT_SHADER);
    if local.exists() {
        return local.to_path_buf();
    }
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_SHADER)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let path = shader_path(std::env::args().nth(1));
    let source = ShaderSource::load(&path)
        .with_context(|| format!("cannot start without shader resource {}", path.display()))?;
    if source.is_empty() {
        log::warn!("{} contains no `#shader` sections", path.display());
    }

    let config = RuntimeConfig {
        title: "Seizure Square".to_string(),
        initial_size: LogicalSize::new(640.0, 480.0),
        ..RuntimeConfig::default()
    };

    let demo = Demo {
        source,
        scene: None,
    };

    Runtime::run(config, GlInit::default(), demo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_is_kept() {
        assert_eq!(shader_path(Some("x/y.shader".into())), PathBuf::from("x/y.shader"));
    }

    #[test]
    fn default_path_points_at_bundled_resource() {
        let path = shader_path(None);
        assert!(path.ends_with(DEFAULT_SHADER));
        assert!(path.exists());
    }

    #[test]
    fn bundled_resource_has_both_stages() {
        let source = ShaderSource::load(shader_path(None)).unwrap();
        assert!(source.vertex.contains("gl_Position = position;"));
        assert!(source.fragment.contains("uniform vec4 u_Color;"));
        assert!(!source.vertex.contains("#shader"));
        assert!(!source.fragment.contains("#shader"));
    }
}
