use std::path::Path;

use rsbs_core::frame_loop::{FrameLoop, FrameStats};
use rsbs_core::replay::{load_replay_from_path, ReplayInput};
use rsbs_core::surface::RecordingSurface;
use rsbs_core::{Entity, LoopConfig};

use crate::error::SetupError;

/// Run the frame loop against a replay file with no window.
pub fn run_replay(config: LoopConfig, path: &Path) -> Result<(FrameStats, Entity), SetupError> {
    let replay = load_replay_from_path(path).map_err(SetupError::Replay)?;
    let mut input = ReplayInput::new(&replay);
    let mut surface = RecordingSurface::new();
    let mut frame_loop = FrameLoop::new(config);

    log::info!("Running replay '{}' headless", path.display());
    let stats = frame_loop.run(&mut input, &mut surface);
    let entity = *frame_loop.entity();
    log::info!(
        "Replay finished: {} frames, {} events, circle at x={} ({})",
        stats.frames,
        stats.events,
        entity.x,
        entity.color
    );
    Ok((stats, entity))
}
