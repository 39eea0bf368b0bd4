use crate::domain::{ActivityLog, AppData, ItemRef, Project, ScheduledBlock, Subtask, Task};
use crate::scheduling::DragPayload;
use chrono::{DateTime, Local};

/// Every mutation the store accepts
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddProject(Project),
    UpdateProject(Project),
    DeleteProject { project_id: String },

    /// A task together with its initial subtasks, added atomically
    AddTask { task: Task, subtasks: Vec<Subtask> },
    UpdateTask(Task),
    DeleteTask { task_id: String },

    AddSubtask(Subtask),
    UpdateSubtask(Subtask),
    DeleteSubtask { subtask_id: String },

    AddScheduledBlock(ScheduledBlock),
    UpdateScheduledBlock(ScheduledBlock),
    DeleteScheduledBlock { id: String },

    UpdateActivityLog(ActivityLog),

    StartTimer { item: ItemRef, at: DateTime<Local> },
    PauseTimer { at: DateTime<Local> },
    ResumeTimer { at: DateTime<Local> },
    StopTimer { end_time: DateTime<Local> },

    /// Wholesale replacement, used when restoring persisted state
    SetState(Box<AppData>),

    DragStart(DragPayload),
    DragEnd,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddProject(_) => "add_project",
            Self::UpdateProject(_) => "update_project",
            Self::DeleteProject { .. } => "delete_project",
            Self::AddTask { .. } => "add_task",
            Self::UpdateTask(_) => "update_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::AddSubtask(_) => "add_subtask",
            Self::UpdateSubtask(_) => "update_subtask",
            Self::DeleteSubtask { .. } => "delete_subtask",
            Self::AddScheduledBlock(_) => "add_scheduled_block",
            Self::UpdateScheduledBlock(_) => "update_scheduled_block",
            Self::DeleteScheduledBlock { .. } => "delete_scheduled_block",
            Self::UpdateActivityLog(_) => "update_activity_log",
            Self::StartTimer { .. } => "start_timer",
            Self::PauseTimer { .. } => "pause_timer",
            Self::ResumeTimer { .. } => "resume_timer",
            Self::StopTimer { .. } => "stop_timer",
            Self::SetState(_) => "set_state",
            Self::DragStart(_) => "drag_start",
            Self::DragEnd => "drag_end",
        }
    }

    /// Whether the action touches data that gets persisted
    pub fn is_durable(&self) -> bool {
        !matches!(self, Self::DragStart(_) | Self::DragEnd)
    }
}
