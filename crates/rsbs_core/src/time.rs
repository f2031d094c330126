use std::time::{Duration, Instant};

use serde::Deserialize;

const FPS_SAMPLE_COUNT: usize = 60;

/// How the frame loop throttles itself before draining input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Pacing {
    /// No sleep; presentation (vblank) is the only throttle.
    Unpaced,
    /// Budget measured against the moment the pacer was created. Only the
    /// first frames ever sleep, which is how the shipped builds behaved.
    SinceStart { fps: u32 },
    /// Budget measured against the start of the previous frame.
    Delta { fps: u32 },
}

impl Pacing {
    pub fn target_fps(self) -> Option<u32> {
        match self {
            Self::Unpaced => None,
            Self::SinceStart { fps } | Self::Delta { fps } => Some(fps),
        }
    }

    pub fn frame_budget(self) -> Option<Duration> {
        self.target_fps()
            .filter(|&fps| fps > 0)
            .map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
    }
}

pub struct FramePacer {
    pacing: Pacing,
    start: Instant,
    last_frame: Instant,
    pub frame_count: u64,
    pub real_dt: f64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FramePacer {
    pub fn new(pacing: Pacing) -> Self {
        Self::starting_at(pacing, Instant::now())
    }

    pub fn starting_at(pacing: Pacing, start: Instant) -> Self {
        Self {
            pacing,
            start,
            last_frame: start,
            frame_count: 0,
            real_dt: 0.0,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// How long a frame starting at `now` has to wait. Pure, so callers can
    /// probe it with synthetic instants.
    pub fn delay_at(&self, now: Instant) -> Duration {
        let Some(budget) = self.pacing.frame_budget() else {
            return Duration::ZERO;
        };
        let reference = match self.pacing {
            Pacing::Unpaced => return Duration::ZERO,
            Pacing::SinceStart { .. } => self.start,
            Pacing::Delta { .. } => self.last_frame,
        };
        budget.saturating_sub(now.saturating_duration_since(reference))
    }

    /// Sleep out the remaining budget, then stamp the frame start.
    pub fn begin_frame(&mut self) {
        let delay = self.delay_at(Instant::now());
        if !delay.is_zero() {
            log::trace!("Pacing: sleeping {:.2}ms", delay.as_secs_f64() * 1000.0);
            std::thread::sleep(delay);
        }
        self.mark_frame(Instant::now());
    }

    pub fn mark_frame(&mut self, now: Instant) {
        self.real_dt = now.saturating_duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }
}
