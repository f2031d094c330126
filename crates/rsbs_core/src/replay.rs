//! Scripted input for headless runs and deterministic tests.
//!
//! A replay lists, per frame, which keys and D-pad buttons are held. The
//! `ReplayInput` source turns each frame's difference from the previous one
//! into press/release events, so both the latched and the polled input modes
//! see exactly what a real device would have produced.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::input::{EventQueue, InputEvent, InputSource, InputState, Key, PadButton};

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ReplayFrame {
    #[serde(default)]
    pub keys: Vec<Key>,
    #[serde(default)]
    pub buttons: Vec<PadButton>,
    #[serde(default)]
    pub quit: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    /// Frames played once every `repeat` is unrolled.
    pub fn total_frames(&self) -> u64 {
        self.frames.iter().map(|frame| u64::from(frame.repeat)).sum()
    }
}

pub fn parse_replay(raw: &str) -> Result<ReplaySequence, String> {
    let replay: ReplaySequence =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse replay JSON: {e}"))?;
    validate_replay(&replay)?;
    Ok(replay)
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    parse_replay(&raw).map_err(|e| format!("{}: {e}", path.display()))
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    if let Some(index) = replay.frames.iter().position(|frame| frame.repeat == 0) {
        return Err(format!(
            "Replay validation failed: frame {index} has repeat 0 (must be >= 1)"
        ));
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

/// Plays a replay back one frame per `begin_frame`, walking each entry
/// `repeat` times in place. Once the script runs out it keeps emitting `Quit`.
pub struct ReplayInput {
    frames: Vec<ReplayFrame>,
    entry: usize,
    played_in_entry: u32,
    queue: EventQueue,
    prev_keys: Vec<Key>,
    prev_buttons: Vec<PadButton>,
}

impl ReplayInput {
    pub fn new(replay: &ReplaySequence) -> Self {
        Self {
            frames: replay.frames.clone(),
            entry: 0,
            played_in_entry: 0,
            queue: EventQueue::new(),
            prev_keys: Vec::new(),
            prev_buttons: Vec::new(),
        }
    }

    pub fn frames_remaining(&self) -> u64 {
        let rest: u64 = self
            .frames
            .iter()
            .skip(self.entry)
            .map(|frame| u64::from(frame.repeat))
            .sum();
        rest - u64::from(self.played_in_entry)
    }

    fn next_frame(&mut self) -> Option<ReplayFrame> {
        while let Some(frame) = self.frames.get(self.entry) {
            if self.played_in_entry < frame.repeat {
                self.played_in_entry += 1;
                return Some(frame.clone());
            }
            self.entry += 1;
            self.played_in_entry = 0;
        }
        None
    }

    fn queue_transitions(&mut self, frame: &ReplayFrame) {
        for &key in &self.prev_keys {
            if !frame.keys.contains(&key) {
                self.queue.push(InputEvent::KeyUp(key));
            }
        }
        for &button in &self.prev_buttons {
            if !frame.buttons.contains(&button) {
                self.queue.push(InputEvent::ButtonUp(button));
            }
        }
        for &key in &frame.keys {
            if !self.prev_keys.contains(&key) {
                self.queue.push(InputEvent::KeyDown(key));
            }
        }
        for &button in &frame.buttons {
            if !self.prev_buttons.contains(&button) {
                self.queue.push(InputEvent::ButtonDown(button));
            }
        }
        self.prev_keys.clone_from(&frame.keys);
        self.prev_buttons.clone_from(&frame.buttons);
    }
}

impl InputSource for ReplayInput {
    fn begin_frame(&mut self) {
        match self.next_frame() {
            Some(frame) => {
                self.queue_transitions(&frame);
                if frame.quit {
                    self.queue.push(InputEvent::Quit);
                }
            }
            None => self.queue.push(InputEvent::Quit),
        }
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.queue.poll_event()
    }

    fn state(&self) -> &InputState {
        self.queue.state()
    }
}
