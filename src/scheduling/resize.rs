use super::placement::snap;
use crate::domain::{AppData, ScheduledBlock, MINUTES_IN_DAY, MIN_BLOCK_MINUTES};
use crate::store::Action;

/// Which edge of a planned block is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Top,
    Bottom,
}

/// New `(start, end)` for a block when `edge` is pulled to `minute`.
/// Keeps at least `MIN_BLOCK_MINUTES` and stays within the day.
pub fn resize(block: &ScheduledBlock, edge: ResizeEdge, minute: u32) -> (u32, u32) {
    let snapped = snap(minute.min(MINUTES_IN_DAY));
    match edge {
        ResizeEdge::Top => {
            let latest = block.end.saturating_sub(MIN_BLOCK_MINUTES);
            (snapped.min(latest), block.end)
        }
        ResizeEdge::Bottom => {
            let earliest = block.start.saturating_add(MIN_BLOCK_MINUTES).min(MINUTES_IN_DAY);
            (block.start, snapped.max(earliest))
        }
    }
}

/// Resize in progress on one planned block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub block_id: String,
    pub edge: ResizeEdge,
    original_start: u32,
    original_end: u32,
}

impl ResizeSession {
    pub fn new(block: &ScheduledBlock, edge: ResizeEdge) -> Self {
        Self {
            block_id: block.id.clone(),
            edge,
            original_start: block.start,
            original_end: block.end,
        }
    }

    /// Update for the pointer at `minute`, or `None` if nothing moves.
    /// Overlaps with neighbouring blocks are not checked.
    pub fn update(&self, data: &AppData, minute: u32) -> Option<Action> {
        let block = data.scheduled_block(&self.block_id)?;
        let (start, end) = resize(block, self.edge, minute);
        if (start, end) == (block.start, block.end) {
            return None;
        }
        Some(Action::UpdateScheduledBlock(block.moved_to(start, end, block.date)))
    }

    /// Update that puts the block back where the resize began, if it moved
    pub fn revert(&self, data: &AppData) -> Option<Action> {
        let block = data.scheduled_block(&self.block_id)?;
        if (block.start, block.end) == (self.original_start, self.original_end) {
            return None;
        }
        Some(Action::UpdateScheduledBlock(block.moved_to(
            self.original_start,
            self.original_end,
            block.date,
        )))
    }

    /// Whether the block differs from when the resize began
    pub fn changed(&self, data: &AppData) -> bool {
        data.scheduled_block(&self.block_id)
            .map(|b| (b.start, b.end) != (self.original_start, self.original_end))
            .unwrap_or(false)
    }
}
