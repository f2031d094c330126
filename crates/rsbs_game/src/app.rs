//! Windowed runner. winit owns the event loop, so one iteration of the
//! frame loop runs per `RedrawRequested`; window and controller events that
//! arrive between redraws are queued and drained by that iteration.

use rsbs_core::frame_loop::{FrameLoop, LoopStatus};
use rsbs_core::input::{EventQueue, InputEvent};
use rsbs_platform::keymap::translate_key_event;
use rsbs_platform::{GamepadInput, PlatformConfig};
use rsbs_render::SpriteRenderer;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::error::SetupError;
use crate::settings::Settings;

struct Running {
    renderer: SpriteRenderer,
    input: EventQueue,
    gamepad: GamepadInput,
    frame_loop: FrameLoop,
}

pub struct App {
    settings: Settings,
    platform: PlatformConfig,
    running: Option<Running>,
    setup_error: Option<SetupError>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let platform = PlatformConfig {
            width: settings.config.screen_width,
            height: settings.config.screen_height,
            ..PlatformConfig::default()
        };
        Self {
            settings,
            platform,
            running: None,
            setup_error: None,
        }
    }

    /// The setup failure that ended the event loop, if any.
    pub fn finish(self) -> Result<(), SetupError> {
        match self.setup_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running, SetupError> {
        let window =
            rsbs_platform::create_window(event_loop, &self.platform).map_err(SetupError::Window)?;
        log::info!(
            "Window created: {}x{}",
            self.platform.width,
            self.platform.height
        );

        let config = self.settings.config;
        let renderer = SpriteRenderer::new(
            window,
            (config.screen_width, config.screen_height),
            config.asset_layout,
            self.settings.asset_root.as_deref(),
        )
        .map_err(SetupError::Renderer)?;

        Ok(Running {
            renderer,
            input: EventQueue::new(),
            gamepad: GamepadInput::new(),
            frame_loop: FrameLoop::new(config),
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || self.setup_error.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(err) => {
                self.setup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            running.renderer.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                running.input.push(InputEvent::Quit);
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    running.renderer.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(input_event) = translate_key_event(&event) {
                    running.input.push(input_event);
                }
            }

            WindowEvent::RedrawRequested => {
                running.gamepad.pump(&mut running.input);
                let status = running
                    .frame_loop
                    .run_frame(&mut running.input, &mut running.renderer);
                if status == LoopStatus::Exit {
                    log::info!(
                        "Loop finished after {} frames ({} skipped by the surface)",
                        running.frame_loop.stats().frames,
                        running.renderer.skipped_frames()
                    );
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}
