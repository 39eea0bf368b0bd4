pub mod enums;
pub mod lookup;
pub mod model;
pub mod time;
pub mod views;

pub use enums::{ItemKind, ItemRef, Pane, PaneVisibility, ProjectColor, UiMode, ViewMode};
pub use lookup::{
    drag_duration, effective_estimate, item_details, project_items, project_of, ItemDetails,
    UNKNOWN_TITLE,
};
pub use model::{ActiveTimer, ActivityLog, AppData, Project, ScheduledBlock, Subtask, Task, TimeBlock};
pub use time::{Timeline, MINUTES_IN_DAY, MIN_BLOCK_MINUTES, SNAP_MINUTES};
pub use views::{flatten_rows, tree_connector, RowKind, TaskRow};

use uuid::Uuid;

/// Fresh opaque identifier for a new entity
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
