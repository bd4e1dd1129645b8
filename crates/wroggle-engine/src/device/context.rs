use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use crate::gl::{Driver, GlowDriver, ProgramValidation};
use crate::gl_call;

use super::surface::{pick_config, surface_size, viewport_extent};
use super::{GlInit, SwapErrorAction};

/// Owns the window, its GL surface and the current GL context.
///
/// Field order is drop order: the driver and surface go before the context,
/// and the window outlives all of them.
pub struct GlContext {
    driver: GlowDriver,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,

    window: Window,
}

impl GlContext {
    /// Creates a window with a current OpenGL core context.
    pub fn new(
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
        init: &GlInit,
    ) -> Result<Self> {
        let template = ConfigTemplateBuilder::new().with_alpha_size(8);

        // The error type here is not `Send`, so it is flattened to text.
        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|e| anyhow!("failed to create window and GL display: {e}"))?;
        let window = window.context("GL display was created without a window")?;

        let display = config.display();
        let raw_window_handle = window
            .window_handle()
            .ok()
            .map(|handle| handle.as_raw());

        let (major, minor) = init.version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(raw_window_handle);

        let not_current = unsafe { display.create_context(&config, &context_attributes) }
            .with_context(|| format!("failed to create OpenGL {major}.{minor} core context"))?;

        let surface_attributes = window
            .build_surface_attributes(SurfaceAttributesBuilder::default())
            .context("failed to describe window surface")?;
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .context("failed to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make OpenGL context current")?;

        let interval = if init.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("failed to set swap interval {interval:?}: {e}");
        }

        let gl = unsafe {
            ::glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };
        let validation =
            unsafe { ProgramValidation::load(|name| display.get_proc_address(name)) }
                .context("driver does not export glValidateProgram/glGetProgramiv")?;
        let driver = GlowDriver::new(gl, validation);

        let size = window.inner_size();
        let ctx = GlContext {
            driver,
            surface,
            context,
            size,
            window,
        };
        ctx.apply_viewport();

        log::info!("OpenGL {}", gl_call!(&ctx.driver, ctx.driver.version_string()));
        Ok(ctx)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn driver(&self) -> &GlowDriver {
        &self.driver
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Resizes the surface and the viewport.
    ///
    /// A zero-area size only updates internal state; the surface keeps its
    /// last valid extent until the window has area again.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;

        let Some((width, height)) = surface_size(new_size) else {
            return;
        };
        self.surface.resize(&self.context, width, height);
        self.apply_viewport();
    }

    /// Presents the back buffer.
    ///
    /// Returns the action the runtime should take when the swap fails.
    pub fn swap_buffers(&self) -> Result<(), SwapErrorAction> {
        self.window.pre_present_notify();
        self.surface.swap_buffers(&self.context).map_err(|e| {
            let action = SwapErrorAction::classify(e.error_kind());
            log::warn!("buffer swap failed ({action:?}): {e}");
            action
        })
    }

    fn apply_viewport(&self) {
        if surface_size(self.size).is_none() {
            return;
        }
        let (width, height) = viewport_extent(self.size);
        let gl = &self.driver;
        gl_call!(gl, gl.viewport(width, height));
    }
}
