pub mod gamepad;
pub mod keymap;
pub mod window;

pub use gamepad::GamepadInput;
pub use window::{create_window, PlatformConfig};
