//! Held-state tracking for keys and D-pad buttons.
//!
//! Platform adapters never touch `InputState` directly. They push
//! `InputEvent`s into an `EventQueue`, and the state view changes only as the
//! frame loop drains those events. Querying held state therefore always
//! reflects exactly the events consumed so far, the same "pump then query"
//! contract a multimedia library's keyboard-state array has. Press/release
//! edges are consumed from the events themselves by `LatchState`.

use std::collections::{HashSet, VecDeque};

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
}

/// Directional pad buttons of the active game controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadButton {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

/// One discrete event drained from the platform queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    ButtonDown(PadButton),
    ButtonUp(PadButton),
}

#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: HashSet<Key>,
    pad_held: HashSet<PadButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Quit => {}
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::ButtonDown(button) => self.pad_down(button),
            InputEvent::ButtonUp(button) => self.pad_up(button),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn pad_down(&mut self, button: PadButton) {
        self.pad_held.insert(button);
    }

    pub fn pad_up(&mut self, button: PadButton) {
        self.pad_held.remove(&button);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_pad_held(&self, button: PadButton) -> bool {
        self.pad_held.contains(&button)
    }
}

/// Anything the frame loop can drain events from and query held state on.
pub trait InputSource {
    /// Called once at the top of every frame, before the first `poll_event`.
    fn begin_frame(&mut self) {}

    /// Next pending event, or `None` once the queue is empty. Never blocks.
    fn poll_event(&mut self) -> Option<InputEvent>;

    /// Instantaneous key and D-pad state after the events drained so far.
    fn state(&self) -> &InputState;
}

/// FIFO that platform adapters push into and the frame loop drains.
#[derive(Default)]
pub struct EventQueue {
    pending: VecDeque<InputEvent>,
    state: InputState,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl InputSource for EventQueue {
    fn poll_event(&mut self) -> Option<InputEvent> {
        let event = self.pending.pop_front()?;
        self.state.apply(&event);
        Some(event)
    }

    fn state(&self) -> &InputState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_then_up() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        assert!(input.is_held(Key::Right));
        input.key_up(Key::Right);
        assert!(!input.is_held(Key::Right));
    }

    #[test]
    fn test_key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::Left);
        assert!(!input.is_held(Key::Left));
    }

    #[test]
    fn test_pad_repeat_stays_held_until_release() {
        let mut input = InputState::new();
        input.pad_down(PadButton::DpadUp);
        input.pad_down(PadButton::DpadUp);
        assert!(input.is_pad_held(PadButton::DpadUp));
        input.pad_up(PadButton::DpadUp);
        assert!(!input.is_pad_held(PadButton::DpadUp));
    }

    #[test]
    fn test_keys_and_pad_are_independent() {
        let mut input = InputState::new();
        input.apply(&InputEvent::KeyDown(Key::Down));
        input.apply(&InputEvent::ButtonDown(PadButton::DpadDown));
        input.apply(&InputEvent::KeyUp(Key::Down));
        assert!(!input.is_held(Key::Down));
        assert!(input.is_pad_held(PadButton::DpadDown));
    }

    #[test]
    fn test_quit_does_not_touch_state() {
        let mut input = InputState::new();
        input.apply(&InputEvent::Quit);
        assert!(!input.is_held(Key::Escape));
    }

    #[test]
    fn test_queue_state_follows_drain() {
        let mut queue = EventQueue::new();
        queue.push(InputEvent::KeyDown(Key::Right));
        queue.push(InputEvent::KeyUp(Key::Right));
        assert_eq!(queue.len(), 2);

        queue.begin_frame();
        // Nothing drained yet, so nothing is held.
        assert!(!queue.state().is_held(Key::Right));

        assert_eq!(queue.poll_event(), Some(InputEvent::KeyDown(Key::Right)));
        assert!(queue.state().is_held(Key::Right));
        assert_eq!(queue.poll_event(), Some(InputEvent::KeyUp(Key::Right)));
        assert!(!queue.state().is_held(Key::Right));
        assert_eq!(queue.poll_event(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_held_state_survives_frames() {
        let mut queue = EventQueue::new();
        queue.push(InputEvent::ButtonDown(PadButton::DpadRight));
        queue.begin_frame();
        while queue.poll_event().is_some() {}

        queue.begin_frame();
        assert_eq!(queue.poll_event(), None);
        assert!(queue.state().is_pad_held(PadButton::DpadRight));
    }
}
