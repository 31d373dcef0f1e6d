use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::assets;
use crate::device::{EngineInit, WgpuEngine};
use crate::frame::WindowVsync;
use crate::library;
use crate::lifecycle::{Control, Lifecycle, LifecycleEvent};
use crate::session::SessionConfig;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Directory optional assets are read from.
    pub asset_dir: PathBuf,
    /// Material payload handed to the engine at startup, if present.
    pub material_asset: String,

    pub session: SessionConfig,
    pub engine: EngineInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "pagecurl".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            asset_dir: PathBuf::from("assets"),
            material_asset: "test.wgsl".to_string(),
            session: SessionConfig::default(),
            engine: EngineInit::default(),
        }
    }
}

type StudioLifecycle = Lifecycle<WgpuEngine, WindowVsync>;

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    pub fn run(config: RuntimeConfig) -> Result<()> {
        let engine = WgpuEngine::new_blocking(config.engine.clone())?;
        let mut lifecycle = Lifecycle::new(engine, WindowVsync::default(), &config.session)
            .context("failed to create render session")?;

        load_material(&mut lifecycle, &config);

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, lifecycle);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        // `exiting` normally does this; covers an event loop that returned early.
        state.shutdown();
        Ok(())
    }
}

fn load_material(lifecycle: &mut StudioLifecycle, config: &RuntimeConfig) {
    let Some(payload) = assets::read_optional_asset(&config.asset_dir, &config.material_asset)
    else {
        return;
    };

    match lifecycle.session_mut().load_material(&payload) {
        Ok(info) => {
            log::debug!(
                "material {} has {} parameters",
                config.material_asset,
                info.parameters.len()
            );
            for parameter in &info.parameters {
                log::debug!("  {parameter}");
            }
        }
        Err(e) => log::warn!("skipping material {}: {e:#}", config.material_asset),
    }
}

struct AppState {
    config: RuntimeConfig,
    lifecycle: Option<StudioLifecycle>,
    window: Option<Arc<Window>>,
    exit_requested: bool,
}

impl AppState {
    fn new(config: RuntimeConfig, lifecycle: StudioLifecycle) -> Self {
        Self {
            config,
            lifecycle: Some(lifecycle),
            window: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn dispatch(&mut self, event: LifecycleEvent<Arc<Window>>) -> Control {
        match self.lifecycle.as_mut() {
            Some(lifecycle) => lifecycle.dispatch(event),
            None => Control::Exit,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        if let Some(window) = &self.window {
            return Ok(window.clone());
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let window = Arc::new(window);
        self.window = Some(window.clone());
        Ok(window)
    }

    /// Stops rendering, releases the surface and destroys the session and
    /// engine, then tears the engine library down. Runs at most once.
    fn shutdown(&mut self) {
        let Some(lifecycle) = self.lifecycle.take() else {
            return;
        };

        let engine = lifecycle.shutdown();
        drop(engine);
        self.window = None;
        library::teardown();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.request_exit(event_loop);
                return;
            }
        };

        if let Some(lifecycle) = self.lifecycle.as_mut() {
            lifecycle.vsync_mut().attach(window.clone());
        }

        let size = window.inner_size();
        self.dispatch(LifecycleEvent::SurfaceAvailable(window));
        self.dispatch(LifecycleEvent::SurfaceResized {
            width: size.width,
            height: size.height,
        });
        self.dispatch(LifecycleEvent::Resume);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.dispatch(LifecycleEvent::Pause);
        self.dispatch(LifecycleEvent::SurfaceLost { ack: None });

        if let Some(lifecycle) = self.lifecycle.as_mut() {
            lifecycle.vsync_mut().detach();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(lifecycle) = self.lifecycle.as_mut() else {
            self.request_exit(event_loop);
            return;
        };

        if lifecycle.pump() == Control::Exit {
            self.request_exit(event_loop);
            return;
        }

        // Ticks that present are paced by the present itself; idle ticks by the deadline.
        let flow = match lifecycle.vsync_mut().poll(Instant::now()) {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
        event_loop.set_control_flow(flow);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let control = match &event {
            WindowEvent::CloseRequested => Control::Exit,

            WindowEvent::Resized(new_size) => self.dispatch(LifecycleEvent::SurfaceResized {
                width: new_size.width,
                height: new_size.height,
            }),

            WindowEvent::ScaleFactorChanged { .. } => match &self.window {
                Some(window) => {
                    let size = window.inner_size();
                    self.dispatch(LifecycleEvent::SurfaceResized {
                        width: size.width,
                        height: size.height,
                    })
                }
                None => Control::Continue,
            },

            WindowEvent::RedrawRequested => self.dispatch(LifecycleEvent::Tick(Instant::now())),

            _ => Control::Continue,
        };

        if control == Control::Exit {
            self.request_exit(event_loop);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
