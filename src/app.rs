//! Application lifecycle and frame loop.
//!
//! [`App`] owns every platform handle (window, renderer, GUI context,
//! gamepad) and drives the frame loop through winit's `ApplicationHandler`.
//! Initialization runs in a strict order on the first `resumed` callback;
//! teardown releases resources in reverse-acquisition order and is safe to
//! run at any point, including after a partial initialization.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowId};

use crate::config::AppConfig;
use crate::display;
use crate::error::InitError;
use crate::gfx::GfxContext;
use crate::gui::GuiContext;
use crate::input::gamepad::{GamepadInput, StickState};
use crate::overlay;
use crate::perf::FrameStats;

/// Frame loop state. STOPPED is terminal; no iteration runs after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Running,
    Stopped,
}

pub struct App {
    config: AppConfig,
    launch_args: Vec<String>,
    state: LoopState,
    init_error: Option<InitError>,

    // Resources in acquisition order; shutdown() releases them in reverse.
    window: Option<Arc<Window>>,
    gfx: Option<GfxContext>,
    gui: Option<GuiContext>,
    gamepad: Option<GamepadInput>,

    stats: FrameStats,
    left_stick: StickState,
    right_stick: StickState,
}

impl App {
    pub fn new(config: AppConfig, launch_args: Vec<String>) -> Self {
        Self {
            config,
            launch_args,
            state: LoopState::Running,
            init_error: None,
            window: None,
            gfx: None,
            gui: None,
            gamepad: None,
            stats: FrameStats::new(),
            left_stick: StickState::default(),
            right_stick: StickState::default(),
        }
    }

    /// The initialization failure recorded during startup, if any. Consumed
    /// by `main` to pick the process exit code.
    pub fn take_init_error(&mut self) -> Option<InitError> {
        self.init_error.take()
    }

    /// Acquire all resources in order: gamepad backend, display query,
    /// window, renderer, GUI context, gamepad device. Partial state left
    /// behind by an early return is unwound by [`App::shutdown`].
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), InitError> {
        info!("launch arguments: {:?}", self.launch_args);

        let mut gamepad =
            GamepadInput::new().map_err(|err| InitError::GamepadBackend(err.to_string()))?;

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .ok_or(InitError::DisplayQuery)?;
        info!(
            "primary display: {}",
            monitor.name().unwrap_or_else(|| "<unnamed>".to_string())
        );

        let mut attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_resizable(true)
            .with_visible(false)
            .with_inner_size(LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        if self.config.fullscreen {
            let fullscreen = match display::pick_video_mode(&monitor) {
                Some(mode) => Fullscreen::Exclusive(mode),
                // Desktop-mode fallback when the monitor reports no modes.
                None => Fullscreen::Borderless(Some(monitor.clone())),
            };
            attrs = attrs.with_fullscreen(Some(fullscreen));
        }
        let window = Arc::new(event_loop.create_window(attrs)?);
        self.window = Some(window.clone());

        let gfx = GfxContext::new(window.clone(), self.config.sync_mode)?;

        let scale_factor = window.scale_factor();
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(InitError::ScaleFactor(scale_factor));
        }
        let gui = GuiContext::new(
            &window,
            gfx.device(),
            gfx.surface_format(),
            scale_factor as f32,
        );
        self.gfx = Some(gfx);
        self.gui = Some(gui);

        if !gamepad.discover() {
            return Err(InitError::NoGamepad);
        }
        self.gamepad = Some(gamepad);

        Ok(())
    }

    /// Transition RUNNING -> STOPPED. Returns true only on the first call;
    /// later calls are no-ops.
    fn stop(&mut self, reason: &str) -> bool {
        if self.state == LoopState::Stopped {
            return false;
        }
        self.state = LoopState::Stopped;
        info!("stopping: {reason}");
        true
    }

    /// Release everything in reverse-acquisition order. Idempotent and safe
    /// to call before or during initialization.
    fn shutdown(&mut self) {
        if let Some(gamepad) = self.gamepad.take() {
            drop(gamepad);
            debug!("gamepad released");
        }
        if let Some(gui) = self.gui.take() {
            drop(gui);
            debug!("gui context released");
        }
        if let Some(gfx) = self.gfx.take() {
            drop(gfx);
            debug!("renderer released");
        }
        if let Some(window) = self.window.take() {
            drop(window);
            debug!("window released");
        }
    }

    /// One frame loop iteration: discrete event drain, continuous sampling,
    /// stats update, render, optional pacing sleep.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        if self.state == LoopState::Stopped {
            return;
        }

        let mut stop_reason = None;
        if let Some(gamepad) = self.gamepad.as_mut() {
            if gamepad.drain_events() {
                stop_reason = Some("gamepad disconnected");
            } else if gamepad.exit_pressed() {
                stop_reason = Some("exit button pressed");
            } else {
                let (left, right) = gamepad.sample_sticks();
                self.left_stick = left;
                self.right_stick = right;
            }
        }
        if let Some(reason) = stop_reason {
            self.stop(reason);
            event_loop.exit();
            return;
        }

        self.stats.tick(Instant::now());
        self.render();

        // Cap the loop speed ourselves when presentation does not.
        if let Some(gfx) = &self.gfx {
            if !gfx.vsync_active() {
                std::thread::sleep(self.config.min_frame_interval);
            }
        }
    }

    /// Clear the target, draw the (placeholder) scene and the overlay,
    /// then present.
    fn render(&mut self) {
        let (Some(window), Some(gfx), Some(gui)) = (
            self.window.as_ref(),
            self.gfx.as_mut(),
            self.gui.as_mut(),
        ) else {
            return;
        };

        let frame = match gfx.begin_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gfx.reconfigure();
                return;
            }
            Err(err) => {
                warn!("skipping frame: {err}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let sample = self.stats.sample();
        let (left, right) = (self.left_stick, self.right_stick);
        let (primitives, textures_delta) =
            gui.prepare(window, |ctx| overlay::draw(ctx, sample, left, right));

        let (width, height) = gfx.size();
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: gui.pixels_per_point(),
        };

        let mut encoder = gfx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });
        let user_buffers = gui.upload(
            gfx.device(),
            gfx.queue(),
            &mut encoder,
            &primitives,
            &textures_delta,
            &screen,
        );

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("frame pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            // Scene rendering would go here, under the overlay.

            gui.paint(&mut pass, &primitives, &screen);
        }

        gui.cleanup(&textures_delta);
        gfx.queue()
            .submit(user_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        frame.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }

        match self.initialize(event_loop) {
            Ok(()) => {
                info!("initialization complete, starting frame loop");
                if let Some(window) = &self.window {
                    window.set_visible(true);
                    window.request_redraw();
                }
            }
            Err(err) => {
                if err.is_recoverable() {
                    warn!("{err}");
                } else {
                    error!("initialization failed: {err}");
                }
                self.init_error = Some(err);
                self.shutdown();
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // GUI event sink sees every event before the loop acts on it.
        if let (Some(window), Some(gui)) = (self.window.as_ref(), self.gui.as_mut()) {
            let _ = gui.on_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                self.stop("window close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gfx) = self.gfx.as_mut() {
                    gfx.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.state == LoopState::Running {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.stop("event loop exiting");
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_app() -> App {
        App::new(AppConfig::default(), vec![])
    }

    #[test]
    fn test_stop_transitions_exactly_once() {
        let mut app = bare_app();
        assert_eq!(app.state, LoopState::Running);
        assert!(app.stop("first"));
        assert_eq!(app.state, LoopState::Stopped);
        assert!(!app.stop("second"));
        assert_eq!(app.state, LoopState::Stopped);
    }

    #[test]
    fn test_shutdown_before_init_is_noop() {
        let mut app = bare_app();
        app.shutdown();
        assert!(app.window.is_none());
        assert!(app.gamepad.is_none());
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut app = bare_app();
        app.shutdown();
        app.shutdown();
        assert!(app.window.is_none());
        assert!(app.gfx.is_none());
        assert!(app.gui.is_none());
        assert!(app.gamepad.is_none());
    }

    #[test]
    fn test_no_init_error_recorded_initially() {
        let mut app = bare_app();
        assert!(app.take_init_error().is_none());
    }
}
