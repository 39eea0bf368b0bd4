//! Placing, moving and resizing blocks on the calendar.

pub mod gesture;
pub mod placement;
pub mod resize;

pub use gesture::{resolve_pane, DragOrigin, DragPayload, DragSession, DropTarget, Gesture, GestureEnd};
pub use placement::{plan_drop, resolve, Confirm, DropPlan, DropRequest, RejectReason};
pub use resize::{ResizeEdge, ResizeSession};
