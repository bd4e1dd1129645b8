use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{GlContext, GlInit, SwapErrorAction};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "wroggle".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            resizable: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, runs `app` until the window closes, and returns the
    /// first setup error, if any.
    pub fn run<A>(config: RuntimeConfig, gl_init: GlInit, app: A) -> Result<()>
    where
        A: App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gl_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct WindowEntry {
    gl: GlContext,
    frame_index: u64,
}

struct AppState<A: App> {
    config: RuntimeConfig,
    gl_init: GlInit,
    app: A,

    window: Option<WindowEntry>,
    /// Set once the window has been created; the runtime never reopens it.
    started: bool,
    failure: Option<anyhow::Error>,
}

impl<A: App> AppState<A> {
    fn new(config: RuntimeConfig, gl_init: GlInit, app: A) -> Self {
        Self {
            config,
            gl_init,
            app,
            window: None,
            started: false,
            failure: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let gl = GlContext::new(event_loop, attrs, &self.gl_init)?;
        self.app
            .on_init(gl.driver())
            .context("application setup failed")?;

        gl.window().request_redraw();
        self.window = Some(WindowEntry { gl, frame_index: 0 });
        Ok(())
    }

    /// Releases application resources and the context. Runs at most once.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(entry) = self.window.take() {
            self.app.on_exit(entry.gl.driver());
            log::debug!("window closed after {} frames", entry.frame_index);
        }
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };

        let control = {
            let mut ctx = FrameCtx {
                gl: entry.gl.driver(),
                window: entry.gl.window(),
                size: entry.gl.size(),
                frame_index: entry.frame_index,
            };
            self.app.on_frame(&mut ctx)
        };
        entry.frame_index = entry.frame_index.wrapping_add(1);

        if control == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        if let Err(SwapErrorAction::Fatal) = entry.gl.swap_buffers() {
            self.failure
                .get_or_insert_with(|| anyhow::anyhow!("OpenGL context lost"));
            self.shutdown(event_loop);
        }
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        if let Err(e) = self.create_window(event_loop) {
            log::error!("failed to start: {e:#}");
            self.failure = Some(e);
            self.shutdown(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; vsync paces the loop.
        if let Some(entry) = &self.window {
            entry.gl.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = &self.window else {
            return;
        };
        if entry.gl.window().id() != window_id {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.gl.resize(new_size);
                    entry.gl.window().request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.gl.window().inner_size();
                    entry.gl.resize(new_size);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown(event_loop);
    }
}
