pub mod assets;
pub mod config;
pub mod controller;
pub mod entity;
pub mod frame_loop;
pub mod input;
pub mod replay;
pub mod surface;
pub mod time;

pub use config::{InputMode, LoopConfig, Preset};
pub use entity::{CircleColor, Entity, Layer, Rect};
pub use frame_loop::{FrameLoop, FrameStats, LoopStatus};
pub use input::{EventQueue, InputEvent, InputSource, InputState, Key, PadButton};
pub use surface::{FrameSurface, RecordingSurface};
