use super::enums::{ItemRef, ProjectColor};
use super::time::MINUTES_IN_DAY;
use crate::scheduling::DragPayload;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub color: ProjectColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    /// Estimated duration in minutes
    #[serde(default)]
    pub est_duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub task_id: String,
    pub title: String,
    /// Estimated duration in minutes
    #[serde(default)]
    pub est_duration: Option<u32>,
}

/// A time window on one calendar day, attached to a task or subtask.
///
/// Planned blocks and actual logs share this shape; `start` and `end` are
/// minutes from midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: String,
    pub item: ItemRef,
    pub start: u32,
    pub end: u32,
    pub date: NaiveDate,
}

/// Declared intent to work on an item during a window
pub type ScheduledBlock = TimeBlock;

/// Recorded, already-elapsed work interval
pub type ActivityLog = TimeBlock;

impl TimeBlock {
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// True when `0 <= start < end <= 1440`
    pub fn has_valid_range(&self) -> bool {
        self.start < self.end && self.end <= MINUTES_IN_DAY
    }

    /// Logs may be zero-length (`start == end`), planned blocks may not
    pub fn has_valid_log_range(&self) -> bool {
        self.start <= self.end && self.end <= MINUTES_IN_DAY
    }

    /// Same block moved to a new window
    pub fn moved_to(&self, start: u32, end: u32, date: NaiveDate) -> Self {
        Self {
            start,
            end,
            date,
            ..self.clone()
        }
    }
}

/// The single running or paused timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTimer {
    pub item: ItemRef,
    /// Start of the current run segment
    pub start_time: DateTime<Local>,
    /// Time banked from earlier run segments
    pub accumulated_ms: i64,
    pub is_paused: bool,
}

/// Everything the store owns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub scheduled_blocks: Vec<ScheduledBlock>,
    #[serde(default)]
    pub activity_logs: Vec<ActivityLog>,
    #[serde(default)]
    pub active_timer: Option<ActiveTimer>,
    /// In-flight drag, never persisted
    #[serde(skip)]
    pub dragged_item: Option<DragPayload>,
}

impl AppData {
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn subtask(&self, id: &str) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == id)
    }

    pub fn scheduled_block(&self, id: &str) -> Option<&ScheduledBlock> {
        self.scheduled_blocks.iter().find(|b| b.id == id)
    }

    pub fn activity_log(&self, id: &str) -> Option<&ActivityLog> {
        self.activity_logs.iter().find(|l| l.id == id)
    }

    pub fn tasks_of<'a>(&'a self, project_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.project_id == project_id)
    }

    pub fn subtasks_of<'a>(&'a self, task_id: &'a str) -> impl Iterator<Item = &'a Subtask> + 'a {
        self.subtasks.iter().filter(move |s| s.task_id == task_id)
    }

    /// Whether the referenced task or subtask exists
    pub fn contains_item(&self, item: &ItemRef) -> bool {
        match item {
            ItemRef::Task(id) => self.task(id).is_some(),
            ItemRef::Subtask(id) => self.subtask(id).is_some(),
        }
    }
}
