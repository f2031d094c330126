//! The frame loop controller.
//!
//! One call to `run_frame` is one iteration of the demo:
//!
//!   1. pace (sleep out the frame budget, if the config asks for it)
//!   2. drain every pending input event, noting a quit request
//!   3. resolve colour, latched or polled depending on `InputMode`
//!   4. resolve horizontal motion under the configured `BoundsPolicy`
//!   5. copy the background over the full screen, then the circle
//!   6. present
//!   7. report `Exit` if quit was seen this frame
//!
//! A quit seen halfway through the drain does not cut the drain short and
//! does not skip the draw: the frame that observed it is still presented.
//! Every later call returns `Exit` without touching input or the surface.

use crate::config::{InputMode, LoopConfig};
use crate::controller::{resolve_polled_color, LatchState, MotionController};
use crate::entity::{Entity, Layer, Rect};
use crate::input::{InputEvent, InputSource};
use crate::surface::FrameSurface;
use crate::time::FramePacer;

const STATS_LOG_INTERVAL: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Continue,
    Exit,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub events: u64,
}

pub struct FrameLoop {
    config: LoopConfig,
    motion: MotionController,
    screen: Rect,
    entity: Entity,
    latch: LatchState,
    pacer: FramePacer,
    stats: FrameStats,
    done: bool,
}

impl FrameLoop {
    pub fn new(config: LoopConfig) -> Self {
        Self {
            config,
            motion: MotionController::new(config.screen_width, config.move_delta, config.bounds),
            screen: Rect::screen(config.screen_width, config.screen_height),
            entity: Entity::default(),
            latch: LatchState::new(),
            pacer: FramePacer::new(config.pacing),
            stats: FrameStats::default(),
            done: false,
        }
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn latch(&self) -> &LatchState {
        &self.latch
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn run_frame<I, S>(&mut self, input: &mut I, surface: &mut S) -> LoopStatus
    where
        I: InputSource + ?Sized,
        S: FrameSurface + ?Sized,
    {
        if self.done {
            return LoopStatus::Exit;
        }

        self.pacer.begin_frame();
        input.begin_frame();

        let mut quit_requested = false;
        while let Some(event) = input.poll_event() {
            self.stats.events += 1;
            if event == InputEvent::Quit {
                quit_requested = true;
            } else if self.config.input_mode == InputMode::Edge {
                self.latch.on_event(&event);
            }
        }

        match self.config.input_mode {
            InputMode::Edge => {
                self.entity.color = self.latch.color();
                self.motion.step_latched(&mut self.entity, &self.latch);
            }
            InputMode::Polled => {
                let state = input.state();
                self.entity.color = resolve_polled_color(state);
                self.motion.step_polled(&mut self.entity, state);
            }
        }

        // The background covers the whole screen, so it doubles as the clear.
        surface.copy(Layer::Background, self.screen);
        surface.copy(self.entity.layer(), self.entity.rect());
        surface.present();

        self.stats.frames += 1;
        if self.stats.frames % STATS_LOG_INTERVAL == 0 {
            log::debug!(
                "Frame {}: x={} color={} ({:.1} fps)",
                self.stats.frames,
                self.entity.x,
                self.entity.color,
                self.pacer.smoothed_fps
            );
        }

        if quit_requested {
            self.done = true;
            log::info!(
                "Quit requested after {} frames, exiting loop.",
                self.stats.frames
            );
            LoopStatus::Exit
        } else {
            LoopStatus::Continue
        }
    }

    /// Drive `run_frame` until it reports `Exit`.
    pub fn run<I, S>(&mut self, input: &mut I, surface: &mut S) -> FrameStats
    where
        I: InputSource + ?Sized,
        S: FrameSurface + ?Sized,
    {
        while self.run_frame(input, surface) == LoopStatus::Continue {}
        self.stats
    }
}
