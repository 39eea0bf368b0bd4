//! Turn a drop position into a conflict-checked block placement.

use super::gesture::{DragOrigin, DragPayload};
use crate::domain::{
    new_id, AppData, ItemRef, Pane, ScheduledBlock, TimeBlock, Timeline, MINUTES_IN_DAY,
    SNAP_MINUTES,
};
use crate::store::Action;
use chrono::NaiveDate;
use std::fmt;

/// Floor a minute to the 15-minute grid
pub fn snap(minute: u32) -> u32 {
    minute / SNAP_MINUTES * SNAP_MINUTES
}

/// Half-open interval overlap: `start < other.end && end > other.start`
pub fn overlaps(start: u32, end: u32, other_start: u32, other_end: u32) -> bool {
    start < other_end && end > other_start
}

/// A proposed window on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub start: u32,
    pub end: u32,
    pub date: NaiveDate,
}

impl Candidate {
    /// Snapped window for a drop at `offset` along `timeline`
    pub fn at(offset: f64, timeline: Timeline, duration: u32, date: NaiveDate) -> Self {
        let start = snap(timeline.minute_at(offset));
        Self {
            start,
            end: start.saturating_add(duration),
            date,
        }
    }

    pub fn fits_in_day(&self) -> bool {
        self.end <= MINUTES_IN_DAY && self.start < self.end
    }

    /// Actual logs may land with zero length
    pub fn fits_as_log(&self) -> bool {
        self.end <= MINUTES_IN_DAY && self.start <= self.end
    }

    pub fn conflicts_with(&self, block: &TimeBlock) -> bool {
        self.date == block.date && overlaps(self.start, self.end, block.start, block.end)
    }
}

/// Planned blocks that a candidate would overlap, skipping `exclude_id`
pub fn conflicts<'a>(
    blocks: &'a [ScheduledBlock],
    candidate: &Candidate,
    exclude_id: Option<&str>,
) -> Vec<&'a ScheduledBlock> {
    blocks
        .iter()
        .filter(|b| Some(b.id.as_str()) != exclude_id)
        .filter(|b| candidate.conflicts_with(b))
        .collect()
}

/// Why a drop changes nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Planned items only go to the planned pane, actual to actual
    CrossPane,
    /// Items from the task list can only be planned
    NewItemOnActualPane,
    /// The dragged block or item no longer exists
    SourceMissing,
    /// The block would run past midnight
    PastMidnight,
    /// The user declined to overwrite conflicting blocks
    Declined,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::CrossPane => "cannot move between planned and actual",
            Self::NewItemOnActualPane => "new items can only be planned",
            Self::SourceMissing => "dragged item no longer exists",
            Self::PastMidnight => "block would extend past midnight",
            Self::Declined => "overwrite declined",
        };
        f.write_str(msg)
    }
}

/// Everything needed to place a drop
#[derive(Debug, Clone, Copy)]
pub struct DropRequest<'a> {
    pub payload: &'a DragPayload,
    pub date: NaiveDate,
    pub pane: Pane,
    pub offset: f64,
    pub timeline: Timeline,
}

/// Decision for a drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropPlan {
    Rejected(RejectReason),
    /// Apply these actions (empty when the block did not move)
    Commit(Vec<Action>),
    /// Conflicts exist; apply `actions` only after the user agrees.
    /// `actions` already deletes every conflicting block first.
    NeedsConfirmation {
        conflicts: Vec<String>,
        actions: Vec<Action>,
    },
}

/// Source of explicit yes/no answers for destructive actions
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Check that the payload may land in `pane`
pub fn pane_allowed(payload: &DragPayload, pane: Pane) -> Result<(), RejectReason> {
    match payload.origin {
        DragOrigin::TaskList if pane != Pane::Planned => Err(RejectReason::NewItemOnActualPane),
        DragOrigin::Calendar if payload.pane != Some(pane) => Err(RejectReason::CrossPane),
        _ => Ok(()),
    }
}

/// Decide what a drop does
pub fn plan_drop(data: &AppData, request: &DropRequest<'_>) -> DropPlan {
    let payload = request.payload;
    if let Err(reason) = pane_allowed(payload, request.pane) {
        return DropPlan::Rejected(reason);
    }

    let candidate = Candidate::at(request.offset, request.timeline, payload.duration, request.date);
    let fits = match request.pane {
        Pane::Planned => candidate.fits_in_day(),
        Pane::Actual => candidate.fits_as_log(),
    };
    if !fits {
        return DropPlan::Rejected(RejectReason::PastMidnight);
    }

    match (payload.origin, request.pane) {
        (DragOrigin::TaskList, _) => {
            let Some(kind) = payload.item_type else {
                return DropPlan::Rejected(RejectReason::SourceMissing);
            };
            let item = ItemRef::new(kind, payload.id.clone());
            if !data.contains_item(&item) {
                return DropPlan::Rejected(RejectReason::SourceMissing);
            }
            let block = TimeBlock {
                id: new_id(),
                item,
                start: candidate.start,
                end: candidate.end,
                date: candidate.date,
            };
            with_conflicts(data, &candidate, None, Action::AddScheduledBlock(block))
        }
        (DragOrigin::Calendar, Pane::Planned) => {
            let Some(original) = data.scheduled_block(&payload.id) else {
                return DropPlan::Rejected(RejectReason::SourceMissing);
            };
            let moved = original.moved_to(candidate.start, candidate.end, candidate.date);
            if &moved == original {
                return DropPlan::Commit(Vec::new());
            }
            with_conflicts(
                data,
                &candidate,
                Some(&original.id),
                Action::UpdateScheduledBlock(moved),
            )
        }
        (DragOrigin::Calendar, Pane::Actual) => {
            let Some(original) = data.activity_log(&payload.id) else {
                return DropPlan::Rejected(RejectReason::SourceMissing);
            };
            let moved = original.moved_to(candidate.start, candidate.end, candidate.date);
            if &moved == original {
                return DropPlan::Commit(Vec::new());
            }
            DropPlan::Commit(vec![Action::UpdateActivityLog(moved)])
        }
    }
}

fn with_conflicts(
    data: &AppData,
    candidate: &Candidate,
    exclude_id: Option<&str>,
    placement: Action,
) -> DropPlan {
    let found = conflicts(&data.scheduled_blocks, candidate, exclude_id);
    if found.is_empty() {
        return DropPlan::Commit(vec![placement]);
    }

    let conflicts: Vec<String> = found.iter().map(|b| b.id.clone()).collect();
    let mut actions: Vec<Action> = conflicts
        .iter()
        .map(|id| Action::DeleteScheduledBlock { id: id.clone() })
        .collect();
    actions.push(placement);
    DropPlan::NeedsConfirmation { conflicts, actions }
}

/// Settle a plan synchronously, asking `confirm` when blocks would be
/// overwritten
pub fn resolve(plan: DropPlan, confirm: &mut impl Confirm) -> Result<Vec<Action>, RejectReason> {
    match plan {
        DropPlan::Rejected(reason) => Err(reason),
        DropPlan::Commit(actions) => Ok(actions),
        DropPlan::NeedsConfirmation { conflicts, actions } => {
            let message = overwrite_message(conflicts.len());
            if confirm.confirm(&message) {
                Ok(actions)
            } else {
                Err(RejectReason::Declined)
            }
        }
    }
}

pub fn overwrite_message(count: usize) -> String {
    if count == 1 {
        "This overlaps an existing planned block. Overwrite it?".to_string()
    } else {
        format!("This overlaps {} planned blocks. Overwrite them?", count)
    }
}
