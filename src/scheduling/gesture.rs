//! Pointer gestures over the calendar.
//!
//! A gesture is a single begin/move/end sequence. The terminal adapter
//! turns raw mouse events into `DropTarget`s; everything below is
//! independent of how the pointer is captured.

use super::placement::{self, DropPlan, DropRequest};
use super::resize::{ResizeEdge, ResizeSession};
use crate::domain::{AppData, ItemKind, Pane, PaneVisibility, ScheduledBlock, Timeline, MINUTES_IN_DAY};
use crate::error::PayloadError;
use crate::store::Action;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a drag started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DragOrigin {
    /// An existing block being moved
    Calendar,
    /// A task or subtask dragged in from the task list
    #[default]
    TaskList,
}

impl From<String> for DragOrigin {
    fn from(source: String) -> Self {
        if source == "calendar" {
            Self::Calendar
        } else {
            Self::TaskList
        }
    }
}

impl From<DragOrigin> for String {
    fn from(origin: DragOrigin) -> Self {
        match origin {
            DragOrigin::Calendar => "calendar".to_string(),
            DragOrigin::TaskList => "task_list".to_string(),
        }
    }
}

/// Data carried from drag start to drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    /// Block id for calendar drags, item id for task-list drags
    pub id: String,
    /// Minutes the placed block will span
    pub duration: u32,
    #[serde(rename = "source", default)]
    pub origin: DragOrigin,
    /// Pane the block came from (calendar drags)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pane: Option<Pane>,
    /// Kind of item being planned (task-list drags)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemKind>,
}

impl DragPayload {
    pub fn new_item(kind: ItemKind, id: impl Into<String>, duration: u32) -> Self {
        Self {
            id: id.into(),
            duration,
            origin: DragOrigin::TaskList,
            pane: None,
            item_type: Some(kind),
        }
    }

    pub fn existing_block(pane: Pane, block_id: impl Into<String>, duration: u32) -> Self {
        Self {
            id: block_id.into(),
            duration,
            origin: DragOrigin::Calendar,
            pane: Some(pane),
            item_type: None,
        }
    }

    /// Parse transfer text written by `to_transfer`
    pub fn parse(text: &str) -> Result<Self, PayloadError> {
        let payload: Self = serde_json::from_str(text)?;
        if payload.duration > MINUTES_IN_DAY {
            return Err(PayloadError::TooLong(payload.duration));
        }
        // zero-minute timer sessions are the only blocks without length
        let moving_log = payload.origin == DragOrigin::Calendar && payload.pane == Some(Pane::Actual);
        if payload.duration == 0 && !moving_log {
            return Err(PayloadError::ZeroDuration);
        }
        match payload.origin {
            DragOrigin::Calendar if payload.pane.is_none() => Err(PayloadError::Missing("pane")),
            DragOrigin::TaskList if payload.item_type.is_none() => {
                Err(PayloadError::Missing("item_type"))
            }
            _ => Ok(payload),
        }
    }

    pub fn to_transfer(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Pick the pane under a horizontal pointer position.
/// In single-pane mode the visible pane always wins.
pub fn resolve_pane(x: f64, column_left: f64, column_width: f64, visibility: PaneVisibility) -> Pane {
    if let Some(pane) = visibility.forced() {
        return pane;
    }
    if x < column_left + column_width / 2.0 {
        Pane::Planned
    } else {
        Pane::Actual
    }
}

/// A resolved pointer position over the calendar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropTarget {
    pub date: NaiveDate,
    pub pane: Pane,
    /// Vertical offset into the day timeline
    pub offset: f64,
}

/// In-flight drag
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Raw transfer text; parsed on drop
    pub transfer: String,
    pub hover: Option<DropTarget>,
}

/// The one gesture that may be in progress
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Drag(DragSession),
    Resize(ResizeSession),
}

/// What ending a gesture asks the caller to do
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEnd {
    /// Nothing to apply
    Cancelled,
    /// Apply the plan (which may still need confirmation)
    Drop(DropPlan),
    /// Resize finished; its updates were already applied on move
    ResizeDone,
    /// Resize released off the grid; apply this to restore the block
    ResizeReverted(Action),
}

impl Gesture {
    pub fn begin_drag(payload: &DragPayload) -> Result<Self, PayloadError> {
        Ok(Self::Drag(DragSession {
            transfer: payload.to_transfer()?,
            hover: None,
        }))
    }

    pub fn begin_resize(block: &ScheduledBlock, edge: ResizeEdge) -> Self {
        Self::Resize(ResizeSession::new(block, edge))
    }

    /// Track the pointer. Resizes return the provisional update to apply.
    pub fn pointer_move(
        &mut self,
        data: &AppData,
        target: Option<DropTarget>,
        timeline: Timeline,
    ) -> Option<Action> {
        match self {
            Self::Drag(session) => {
                session.hover = target;
                None
            }
            Self::Resize(session) => {
                let target = target?;
                session.update(data, timeline.minute_at(target.offset))
            }
        }
    }

    /// Release the pointer
    pub fn end(self, data: &AppData, target: Option<DropTarget>, timeline: Timeline) -> GestureEnd {
        match self {
            Self::Drag(session) => {
                let Some(target) = target else {
                    return GestureEnd::Cancelled;
                };
                let payload = match DragPayload::parse(&session.transfer) {
                    Ok(payload) => payload,
                    Err(err) => {
                        tracing::warn!(error = %err, "drop aborted");
                        return GestureEnd::Cancelled;
                    }
                };
                GestureEnd::Drop(placement::plan_drop(
                    data,
                    &DropRequest {
                        payload: &payload,
                        date: target.date,
                        pane: target.pane,
                        offset: target.offset,
                        timeline,
                    },
                ))
            }
            Self::Resize(session) => match (target, session.revert(data)) {
                (None, Some(restore)) => GestureEnd::ResizeReverted(restore),
                (None, None) => GestureEnd::Cancelled,
                (Some(_), _) if session.changed(data) => GestureEnd::ResizeDone,
                (Some(_), _) => GestureEnd::Cancelled,
            },
        }
    }

    /// Payload of a drag gesture, if it parses
    pub fn drag_payload(&self) -> Option<DragPayload> {
        match self {
            Self::Drag(session) => DragPayload::parse(&session.transfer).ok(),
            Self::Resize(_) => None,
        }
    }
}
