//! rsbs-xboxen: a circle on a background, moved left/right and recoloured
//! with the arrow keys or a controller's D-pad.
//!
//! Startup reads `Settings` from the environment, then either opens a window
//! (`App`) or, when a replay file is given, runs the same frame loop
//! headless. Any setup failure is logged and the process exits non-zero.

mod app;
mod error;
mod headless;
mod settings;

use winit::event_loop::{ControlFlow, EventLoop};

use app::App;
use error::SetupError;
use settings::Settings;

fn run() -> Result<(), SetupError> {
    let settings = Settings::from_env()?;
    log::info!(
        "Loop config from {}: {:?}",
        settings.config_source,
        settings.config
    );

    if let Some(replay_path) = settings.replay.clone() {
        headless::run_replay(settings.config, &replay_path)?;
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;
    app.finish()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("rsbs starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
