//! Winit Application Shell
//!
//! The fixed per-frame loop every demo runs on:
//!
//! 1. [`App`] — builder for the window title and [`ShellSettings`]
//! 2. [`AppHandler`] — the per-demo state; implements setup / update / render
//! 3. `AppRunner` — internal winit event-loop handler
//!
//! One thread owns the window, the GPU context and the loop. Each redraw
//! polls OS events, computes `dt` from a monotonic clock, runs
//! `update(dt)` then `render()`, and presents. The loop ends when the
//! window is closed or Escape is pressed; a window- or context-creation
//! failure ends it immediately and surfaces from [`App::run`] as an error.
//!
//! ```rust,ignore
//! struct Demo { /* meshes, pipelines, camera */ }
//!
//! impl AppHandler for Demo {
//!     fn setup(engine: &mut Engine, window: &Arc<Window>) -> Result<Self> { /* ... */ }
//!     fn update(&mut self, engine: &mut Engine, frame: &FrameState) { /* ... */ }
//!     fn render(&mut self, engine: &Engine, frame: &mut Frame) { /* ... */ }
//! }
//!
//! fn main() {
//!     env_logger::init();
//!     if let Err(e) = App::new().with_title("Demo").run::<Demo>() {
//!         log::error!("{e}");
//!         std::process::exit(-1);
//!     }
//! }
//! ```

pub mod input;

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
pub use winit::window::{Window, WindowId};

use crate::engine::{Engine, Frame, FrameState};
use crate::errors::{GlintError, Result};
use crate::gpu::context::ShellSettings;
use crate::utils::FpsCounter;

/// Per-demo application state and behavior.
///
/// Implementing this trait is the whole of a demo: `setup` is the Resource
/// Setup phase, `update` the per-frame update phase, `render` the per-frame
/// render phase. Teardown is `Drop`, in reverse ownership order.
pub trait AppHandler: Sized + 'static {
    /// Creates all GPU resources. Runs once, after the context exists.
    ///
    /// Failures abort the application; recoverable load failures should be
    /// handled here with explicit fallbacks instead.
    fn setup(engine: &mut Engine, window: &Arc<Window>) -> Result<Self>;

    /// Per-frame state mutation: read input, move the camera, animate.
    #[allow(unused_variables)]
    fn update(&mut self, engine: &mut Engine, frame: &FrameState) {}

    /// Records this frame's fixed bind/draw sequence into `frame.encoder`.
    fn render(&mut self, engine: &Engine, frame: &mut Frame);
}

/// Application builder.
pub struct App {
    title: String,
    settings: ShellSettings,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "glint".into(),
            settings: ShellSettings::default(),
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the compiled-in settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ShellSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Runs the event loop until exit. Blocks the calling thread.
    ///
    /// Returns the window/context-creation or setup error when
    /// initialization failed; demo mains map that to exit code -1.
    pub fn run<H: AppHandler>(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = AppRunner::<H>::new(self.title, self.settings);
        event_loop.run_app(&mut runner)?;

        match runner.fatal.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal winit `ApplicationHandler` driving the loop.
struct AppRunner<H: AppHandler> {
    title: String,
    settings: ShellSettings,

    window: Option<Arc<Window>>,
    engine: Option<Engine>,
    handler: Option<H>,

    start_time: Instant,
    last_loop_time: Instant,
    fps: FpsCounter,

    /// Initialization or presentation error to surface from `App::run`.
    fatal: Option<GlintError>,
}

impl<H: AppHandler> AppRunner<H> {
    fn new(title: String, settings: ShellSettings) -> Self {
        let now = Instant::now();
        Self {
            title,
            settings,
            window: None,
            engine: None,
            handler: None,
            start_time: now,
            last_loop_time: now,
            fps: FpsCounter::default(),
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: GlintError) {
        log::error!("Fatal error: {error}");
        self.fatal = Some(error);
        event_loop.exit();
    }
}

impl<H: AppHandler> ApplicationHandler for AppRunner<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(self.settings.width),
                f64::from(self.settings.height),
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, GlintError::WindowCreateFailed(e.to_string()));
                return;
            }
        };
        self.window = Some(window.clone());

        log::info!("Initializing GPU context...");
        let size = window.inner_size();
        let mut engine = match pollster::block_on(Engine::new(
            window.clone(),
            &self.settings,
            size.width.max(1),
            size.height.max(1),
        )) {
            Ok(engine) => engine,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        match H::setup(&mut engine, &window) {
            Ok(handler) => self.handler = Some(handler),
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        }
        self.engine = Some(engine);

        let now = Instant::now();
        self.start_time = now;
        self.last_loop_time = now;
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(window), Some(engine), Some(handler)) =
            (&self.window, &mut self.engine, &mut self.handler)
        else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if matches!(event.physical_key, PhysicalKey::Code(KeyCode::Escape)) {
                    event_loop.exit();
                    return;
                }
                engine.input.handle_key(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                engine.input.handle_cursor_move(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                engine.input.handle_mouse_button(state, button);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                engine.input.handle_mouse_wheel(delta);
            }
            WindowEvent::Resized(physical_size) => {
                engine.resize(physical_size.width, physical_size.height);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_loop_time).as_secs_f32();
                let total_time = now.duration_since(self.start_time).as_secs_f32();
                self.last_loop_time = now;

                engine.update(dt);
                let frame_state = FrameState {
                    time: total_time,
                    dt,
                    frame_count: engine.frame_count(),
                };
                handler.update(engine, &frame_state);

                match engine.begin_frame() {
                    Ok(Some(mut frame)) => {
                        handler.render(engine, &mut frame);
                        engine.finish_frame(frame);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        self.fail(event_loop, e);
                        return;
                    }
                }

                engine.input.end_frame();

                if let Some((fps, ms)) = self.fps.tick() {
                    log::debug!("{fps:.1} fps ({ms:.2} ms/frame)");
                }

                window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.engine.is_some()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }
}
