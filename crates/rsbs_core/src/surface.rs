use crate::entity::{Layer, Rect};

/// A render target the frame loop composes into. Draws are submitted in
/// order; nothing is visible until `present`.
pub trait FrameSurface {
    fn copy(&mut self, layer: Layer, dst: Rect);
    fn present(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub layer: Layer,
    pub dst: Rect,
}

/// Headless surface that keeps every presented frame's draw list.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pending: Vec<DrawCall>,
    frames: Vec<Vec<DrawCall>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Vec<DrawCall>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[DrawCall]> {
        self.frames.last().map(Vec::as_slice)
    }

    pub fn presented_count(&self) -> usize {
        self.frames.len()
    }

    /// Draws submitted since the last `present`.
    pub fn pending(&self) -> &[DrawCall] {
        &self.pending
    }
}

impl FrameSurface for RecordingSurface {
    fn copy(&mut self, layer: Layer, dst: Rect) {
        self.pending.push(DrawCall { layer, dst });
    }

    fn present(&mut self) {
        self.frames.push(std::mem::take(&mut self.pending));
    }
}
