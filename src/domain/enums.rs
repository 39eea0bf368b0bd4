use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of item a block or timer points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Task,
    Subtask,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Subtask => "subtask",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "task" => Some(Self::Task),
            "subtask" => Some(Self::Subtask),
            _ => None,
        }
    }
}

/// Reference to either a task or a subtask
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "item_type", content = "id", rename_all = "snake_case")]
pub enum ItemRef {
    Task(String),
    Subtask(String),
}

impl ItemRef {
    pub fn new(kind: ItemKind, id: impl Into<String>) -> Self {
        match kind {
            ItemKind::Task => Self::Task(id.into()),
            ItemKind::Subtask => Self::Subtask(id.into()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Task(id) | Self::Subtask(id) => id,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Task(_) => ItemKind::Task,
            Self::Subtask(_) => ItemKind::Subtask,
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind().as_str(), self.id())
    }
}

/// Fixed palette a project can be tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectColor {
    Blue,
    Green,
    Purple,
    Yellow,
}

impl ProjectColor {
    pub fn all() -> &'static [ProjectColor] {
        &[Self::Blue, Self::Green, Self::Purple, Self::Yellow]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Yellow => "yellow",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.name() == s.to_lowercase())
    }
}

/// One of the two parallel tracks rendered per calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pane {
    Planned,
    Actual,
}

impl Pane {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::Actual => "ACTUAL",
        }
    }
}

/// Which panes the calendar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneVisibility {
    #[default]
    Both,
    Planned,
    Actual,
}

impl PaneVisibility {
    pub fn shows(&self, pane: Pane) -> bool {
        match self {
            Self::Both => true,
            Self::Planned => pane == Pane::Planned,
            Self::Actual => pane == Pane::Actual,
        }
    }

    /// Pane forced by single-pane mode
    pub fn forced(&self) -> Option<Pane> {
        match self {
            Self::Both => None,
            Self::Planned => Some(Pane::Planned),
            Self::Actual => Some(Pane::Actual),
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Both => Self::Planned,
            Self::Planned => Self::Actual,
            Self::Actual => Self::Both,
        }
    }
}

/// Calendar window shown around the anchor date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Day,
    ThreeDay,
    Week,
    Agenda,
}

impl ViewMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::ThreeDay => "3-Day",
            Self::Week => "Week",
            Self::Agenda => "Agenda",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Day => Self::ThreeDay,
            Self::ThreeDay => Self::Week,
            Self::Week => Self::Agenda,
            Self::Agenda => Self::Day,
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// Moving an item or block with the keyboard cursor
    Placing,
    ConfirmOverwrite,
    EditPlanned,
    ConfirmDelete,
    InputForm,
}
