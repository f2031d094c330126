pub mod camera;
pub mod gpu_context;
pub mod renderer;
pub mod sprite_pipeline;
pub mod texture;
pub mod vertex;

pub use camera::{CameraUniform, ScreenCamera};
pub use gpu_context::GpuContext;
pub use renderer::SpriteRenderer;
pub use sprite_pipeline::SpritePipeline;
pub use texture::Texture;
pub use vertex::SpriteVertex;
