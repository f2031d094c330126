use std::sync::Arc;

use rsbs_core::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "rsbs-xboxen".to_string(),
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, String> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

    let window = event_loop
        .create_window(attrs)
        .map_err(|e| format!("Window could not be created: {e}"))?;
    Ok(Arc::new(window))
}
