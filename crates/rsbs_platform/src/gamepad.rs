//! Game controller input via gilrs.
//!
//! Only one controller drives the circle: the first one present at startup,
//! or the first one to connect afterwards. Its D-pad transitions are pushed
//! into the shared `EventQueue` as `ButtonDown` / `ButtonUp`.

use gilrs::{Button, EventType, GamepadId, Gilrs};
use rsbs_core::input::{EventQueue, InputEvent, PadButton};

const DPAD: [PadButton; 4] = [
    PadButton::DpadUp,
    PadButton::DpadDown,
    PadButton::DpadLeft,
    PadButton::DpadRight,
];

pub fn map_button(button: Button) -> Option<PadButton> {
    match button {
        Button::DPadUp => Some(PadButton::DpadUp),
        Button::DPadDown => Some(PadButton::DpadDown),
        Button::DPadLeft => Some(PadButton::DpadLeft),
        Button::DPadRight => Some(PadButton::DpadRight),
        _ => None,
    }
}

pub struct GamepadInput {
    gilrs: Option<Gilrs>,
    active: Option<GamepadId>,
}

impl GamepadInput {
    /// A missing controller backend is not fatal: the demo still runs on
    /// keyboard input alone.
    pub fn new() -> Self {
        match Gilrs::new() {
            Ok(gilrs) => {
                log::info!("{} joysticks were found.", gilrs.gamepads().count());
                let active = gilrs.gamepads().next().map(|(id, gamepad)| {
                    log::info!("Using controller {}: {}", id, gamepad.name());
                    id
                });
                Self {
                    gilrs: Some(gilrs),
                    active,
                }
            }
            Err(err) => {
                log::warn!("Game controller support unavailable: {err}");
                Self {
                    gilrs: None,
                    active: None,
                }
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.active.is_some()
    }

    /// Drain every pending controller event into `queue`.
    pub fn pump(&mut self, queue: &mut EventQueue) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };
        while let Some(gilrs::Event { id, event, .. }) = gilrs.next_event() {
            match event {
                EventType::Connected if self.active.is_none() => {
                    log::info!("Controller {} connected, now active", id);
                    self.active = Some(id);
                }
                EventType::Disconnected if self.active == Some(id) => {
                    log::warn!("Active controller {} disconnected", id);
                    self.active = None;
                    // Nothing will ever release the buttons it was holding.
                    for button in DPAD {
                        queue.push(InputEvent::ButtonUp(button));
                    }
                }
                EventType::ButtonPressed(button, _) if self.active == Some(id) => {
                    if let Some(button) = map_button(button) {
                        queue.push(InputEvent::ButtonDown(button));
                    }
                }
                EventType::ButtonReleased(button, _) if self.active == Some(id) => {
                    if let Some(button) = map_button(button) {
                        queue.push(InputEvent::ButtonUp(button));
                    }
                }
                _ => {}
            }
        }
    }
}

impl Default for GamepadInput {
    fn default() -> Self {
        Self::new()
    }
}
