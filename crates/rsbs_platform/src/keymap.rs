use rsbs_core::input::{InputEvent, Key};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

pub fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

/// Translate a winit keyboard event. Auto-repeat is dropped and Escape
/// press is reported as a quit request.
pub fn translate_key_event(event: &KeyEvent) -> Option<InputEvent> {
    if event.repeat {
        return None;
    }
    let PhysicalKey::Code(key_code) = event.physical_key else {
        return None;
    };
    translate_key(key_code, event.state)
}

pub fn translate_key(key_code: KeyCode, state: ElementState) -> Option<InputEvent> {
    let key = map_key(key_code)?;
    match (key, state) {
        (Key::Escape, ElementState::Pressed) => Some(InputEvent::Quit),
        (_, ElementState::Pressed) => Some(InputEvent::KeyDown(key)),
        (_, ElementState::Released) => Some(InputEvent::KeyUp(key)),
    }
}
