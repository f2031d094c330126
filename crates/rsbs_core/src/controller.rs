//! Per-frame movement and colour update for the circle.
//!
//! Two input models feed the same entity:
//!
//! - **Latched (edge-driven):** D-pad press/release events set and clear a
//!   small `LatchState` owned by the frame loop. Motion and colour come from
//!   those latches, so a held button keeps working across frames without any
//!   state query.
//! - **Polled:** the instantaneous key and D-pad state is read every frame.
//!   Up beats Down for colour, Right beats Left for motion.
//!
//! `BoundsPolicy::Literal` keeps the original bounds behaviour bit for bit:
//! in polled mode the right-edge check guards only the D-pad term, so a held
//! keyboard Right walks the circle off screen. Left is guarded for both
//! devices, but the guard is `x > 0`, which lets a 10px step from x=6 land on
//! -4. `Clamped` checks every input and tests the landing position on both
//! sides.

use serde::Deserialize;

use crate::entity::{CircleColor, Entity, SPRITE_SIZE};
use crate::input::{InputEvent, InputState, Key, PadButton};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    #[default]
    Literal,
    Clamped,
}

/// Colour selector latched by D-pad Up/Down, released by either button-up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    #[default]
    Neutral,
    Up,
    Down,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LatchState {
    pub selector: Selector,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl LatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only D-pad transitions enter or leave a latch; keyboard events and
    /// quit pass through untouched.
    pub fn on_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::ButtonDown(button) => match button {
                PadButton::DpadUp => self.selector = Selector::Up,
                PadButton::DpadDown => self.selector = Selector::Down,
                PadButton::DpadLeft => {
                    self.moving_left = true;
                    self.moving_right = false;
                }
                PadButton::DpadRight => {
                    self.moving_right = true;
                    self.moving_left = false;
                }
            },
            InputEvent::ButtonUp(button) => match button {
                // Releasing either vertical button drops the selector, even if
                // the other one is still down.
                PadButton::DpadUp | PadButton::DpadDown => self.selector = Selector::Neutral,
                PadButton::DpadLeft => self.moving_left = false,
                PadButton::DpadRight => self.moving_right = false,
            },
            _ => {}
        }
    }

    pub fn color(&self) -> CircleColor {
        match self.selector {
            Selector::Neutral => CircleColor::Red,
            Selector::Up => CircleColor::Blue,
            Selector::Down => CircleColor::Green,
        }
    }
}

pub fn resolve_polled_color(input: &InputState) -> CircleColor {
    if input.is_held(Key::Up) || input.is_pad_held(PadButton::DpadUp) {
        CircleColor::Blue
    } else if input.is_held(Key::Down) || input.is_pad_held(PadButton::DpadDown) {
        CircleColor::Green
    } else {
        CircleColor::Red
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MotionController {
    pub delta: i32,
    pub max_x: i32,
    pub policy: BoundsPolicy,
}

impl MotionController {
    pub fn new(screen_width: u32, move_delta: u32, policy: BoundsPolicy) -> Self {
        Self {
            delta: i32::try_from(move_delta).unwrap_or(i32::MAX),
            max_x: i32::try_from(screen_width)
                .unwrap_or(i32::MAX)
                .saturating_sub(SPRITE_SIZE as i32),
            policy,
        }
    }

    fn can_step_right(&self, x: i32) -> bool {
        x.checked_add(self.delta).is_some_and(|next| next <= self.max_x)
    }

    fn can_step_left(&self, x: i32) -> bool {
        match self.policy {
            BoundsPolicy::Literal => x > 0,
            BoundsPolicy::Clamped => x.checked_sub(self.delta).is_some_and(|next| next >= 0),
        }
    }

    fn step_right(&self, entity: &mut Entity) {
        entity.x = entity.x.saturating_add(self.delta);
    }

    fn step_left(&self, entity: &mut Entity) {
        entity.x = entity.x.saturating_sub(self.delta);
    }

    pub fn step_latched(&self, entity: &mut Entity, latch: &LatchState) {
        if latch.moving_right && self.can_step_right(entity.x) {
            self.step_right(entity);
        } else if latch.moving_left && self.can_step_left(entity.x) {
            self.step_left(entity);
        }
    }

    pub fn step_polled(&self, entity: &mut Entity, input: &InputState) {
        let key_right = input.is_held(Key::Right);
        let pad_right = input.is_pad_held(PadButton::DpadRight);
        let right = match self.policy {
            BoundsPolicy::Literal => key_right || (pad_right && self.can_step_right(entity.x)),
            BoundsPolicy::Clamped => (key_right || pad_right) && self.can_step_right(entity.x),
        };
        if right {
            self.step_right(entity);
            return;
        }

        let left = input.is_held(Key::Left) || input.is_pad_held(PadButton::DpadLeft);
        if left && self.can_step_left(entity.x) {
            self.step_left(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motion(policy: BoundsPolicy) -> MotionController {
        MotionController::new(640, 10, policy)
    }

    fn held_keys(keys: &[Key]) -> InputState {
        let mut input = InputState::new();
        for &key in keys {
            input.key_down(key);
        }
        input
    }

    fn held_pad(buttons: &[PadButton]) -> InputState {
        let mut input = InputState::new();
        for &button in buttons {
            input.pad_down(button);
        }
        input
    }

    #[test]
    fn max_x_leaves_room_for_sprite() {
        assert_eq!(motion(BoundsPolicy::Literal).max_x, 512);
    }

    #[test]
    fn latch_down_up_cycle() {
        let mut latch = LatchState::new();
        latch.on_event(&InputEvent::ButtonDown(PadButton::DpadUp));
        assert_eq!(latch.color(), CircleColor::Blue);
        latch.on_event(&InputEvent::ButtonDown(PadButton::DpadDown));
        assert_eq!(latch.color(), CircleColor::Green);
        latch.on_event(&InputEvent::ButtonUp(PadButton::DpadUp));
        assert_eq!(latch.selector, Selector::Neutral);
        assert_eq!(latch.color(), CircleColor::Red);
    }

    #[test]
    fn latch_horizontal_is_exclusive() {
        let mut latch = LatchState::new();
        latch.on_event(&InputEvent::ButtonDown(PadButton::DpadLeft));
        assert!(latch.moving_left);
        latch.on_event(&InputEvent::ButtonDown(PadButton::DpadRight));
        assert!(latch.moving_right);
        assert!(!latch.moving_left);
        // Releasing the already-cleared direction changes nothing.
        latch.on_event(&InputEvent::ButtonUp(PadButton::DpadLeft));
        assert!(latch.moving_right);
        latch.on_event(&InputEvent::ButtonUp(PadButton::DpadRight));
        assert_eq!(latch, LatchState::default());
    }

    #[test]
    fn latch_ignores_keyboard_and_quit() {
        let mut latch = LatchState::new();
        latch.on_event(&InputEvent::KeyDown(Key::Right));
        latch.on_event(&InputEvent::KeyDown(Key::Up));
        latch.on_event(&InputEvent::Quit);
        assert_eq!(latch, LatchState::default());
    }

    #[test]
    fn polled_color_up_wins_over_down() {
        assert_eq!(resolve_polled_color(&held_keys(&[Key::Up, Key::Down])), CircleColor::Blue);
        assert_eq!(
            resolve_polled_color(&held_pad(&[PadButton::DpadDown, PadButton::DpadUp])),
            CircleColor::Blue
        );
        assert_eq!(resolve_polled_color(&held_keys(&[Key::Down])), CircleColor::Green);
        assert_eq!(resolve_polled_color(&InputState::new()), CircleColor::Red);
    }

    #[test]
    fn polled_color_mixes_keyboard_and_pad() {
        let mut input = held_keys(&[Key::Down]);
        input.pad_down(PadButton::DpadUp);
        assert_eq!(resolve_polled_color(&input), CircleColor::Blue);
    }

    #[test]
    fn latched_right_stops_at_last_step_inside_bounds() {
        let motion = motion(BoundsPolicy::Literal);
        let mut entity = Entity::default();
        let latch = LatchState {
            moving_right: true,
            ..LatchState::default()
        };
        for _ in 0..40 {
            motion.step_latched(&mut entity, &latch);
        }
        assert_eq!(entity.x, 506);
    }

    #[test]
    fn literal_left_guard_can_undershoot_zero() {
        let motion = motion(BoundsPolicy::Literal);
        let mut entity = Entity::new(6, 176);
        let latch = LatchState {
            moving_left: true,
            ..LatchState::default()
        };
        motion.step_latched(&mut entity, &latch);
        assert_eq!(entity.x, -4);
        motion.step_latched(&mut entity, &latch);
        assert_eq!(entity.x, -4);
    }

    #[test]
    fn clamped_left_guard_never_undershoots() {
        let motion = motion(BoundsPolicy::Clamped);
        let mut entity = Entity::new(6, 176);
        let latch = LatchState {
            moving_left: true,
            ..LatchState::default()
        };
        motion.step_latched(&mut entity, &latch);
        assert_eq!(entity.x, 6);
    }

    #[test]
    fn literal_keyboard_right_ignores_bounds() {
        let motion = motion(BoundsPolicy::Literal);
        let mut entity = Entity::new(506, 176);
        let input = held_keys(&[Key::Right]);
        motion.step_polled(&mut entity, &input);
        motion.step_polled(&mut entity, &input);
        assert_eq!(entity.x, 526);
    }

    #[test]
    fn literal_pad_right_respects_bounds() {
        let motion = motion(BoundsPolicy::Literal);
        let mut entity = Entity::new(506, 176);
        motion.step_polled(&mut entity, &held_pad(&[PadButton::DpadRight]));
        assert_eq!(entity.x, 506);
    }

    #[test]
    fn clamped_keyboard_right_respects_bounds() {
        let motion = motion(BoundsPolicy::Clamped);
        let mut entity = Entity::new(506, 176);
        motion.step_polled(&mut entity, &held_keys(&[Key::Right]));
        assert_eq!(entity.x, 506);
    }

    #[test]
    fn polled_right_takes_precedence_over_left() {
        let motion = motion(BoundsPolicy::Clamped);
        let mut entity = Entity::default();
        motion.step_polled(&mut entity, &held_keys(&[Key::Left, Key::Right]));
        assert_eq!(entity.x, 266);
    }

    #[test]
    fn polled_left_runs_when_right_blocked_at_edge() {
        let motion = motion(BoundsPolicy::Clamped);
        let mut entity = Entity::new(506, 176);
        let mut input = held_pad(&[PadButton::DpadRight]);
        input.key_down(Key::Left);
        motion.step_polled(&mut entity, &input);
        assert_eq!(entity.x, 496);
    }

    #[test]
    fn polled_left_at_zero_stays() {
        for policy in [BoundsPolicy::Literal, BoundsPolicy::Clamped] {
            let motion = motion(policy);
            let mut entity = Entity::new(0, 176);
            motion.step_polled(&mut entity, &held_pad(&[PadButton::DpadLeft]));
            assert_eq!(entity.x, 0);
            motion.step_polled(&mut entity, &held_keys(&[Key::Left]));
            assert_eq!(entity.x, 0);
        }
    }

    #[test]
    fn literal_keyboard_left_uses_same_guard_as_pad() {
        let motion = motion(BoundsPolicy::Literal);
        let mut entity = Entity::new(6, 176);
        let input = held_keys(&[Key::Left]);
        motion.step_polled(&mut entity, &input);
        assert_eq!(entity.x, -4);
        motion.step_polled(&mut entity, &input);
        assert_eq!(entity.x, -4);
    }

    #[test]
    fn oversized_delta_never_wraps_or_reverses() {
        for policy in [BoundsPolicy::Literal, BoundsPolicy::Clamped] {
            let motion = MotionController::new(640, u32::MAX, policy);
            let mut entity = Entity::default();
            motion.step_polled(&mut entity, &held_pad(&[PadButton::DpadRight]));
            assert_eq!(entity.x, 256);
            let latch = LatchState {
                moving_right: true,
                ..LatchState::default()
            };
            motion.step_latched(&mut entity, &latch);
            assert_eq!(entity.x, 256);
        }

        let motion = MotionController::new(640, u32::MAX, BoundsPolicy::Literal);
        let mut entity = Entity::default();
        motion.step_polled(&mut entity, &held_keys(&[Key::Right]));
        assert_eq!(entity.x, i32::MAX);
        motion.step_polled(&mut entity, &held_keys(&[Key::Right]));
        assert_eq!(entity.x, i32::MAX);
    }

    #[test]
    fn huge_screen_width_saturates_max_x() {
        let motion = MotionController::new(u32::MAX, 10, BoundsPolicy::Clamped);
        assert_eq!(motion.max_x, i32::MAX - 128);
    }

    #[test]
    fn idle_input_leaves_position_unchanged() {
        let motion = motion(BoundsPolicy::Literal);
        let mut entity = Entity::default();
        for _ in 0..100 {
            motion.step_polled(&mut entity, &InputState::new());
            motion.step_latched(&mut entity, &LatchState::new());
        }
        assert_eq!(entity.x, 256);
    }
}
