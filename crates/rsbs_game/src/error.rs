/// Everything that can stop the demo before its first frame. Once the loop
/// runs nothing is fallible.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Couldn't init event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Window could not be created: {0}")]
    Window(String),

    /// GPU bring-up or image loading.
    #[error("Renderer setup failed: {0}")]
    Renderer(String),

    #[error("Replay error: {0}")]
    Replay(String),
}
