//! Start/pause/resume/stop for the single active timer.
//!
//! The store keeps the timer as `Option<ActiveTimer>`; the functions here
//! compute the next value and, when a session ends, the activity log it
//! commits. They never read the clock: every instant is passed in.

use crate::domain::{new_id, time::minute_of_day, ActiveTimer, ActivityLog, ItemRef};
use chrono::{DateTime, Local};

const MS_PER_MINUTE: f64 = 60_000.0;

/// Read-only view of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState<'a> {
    Idle,
    Running {
        item: &'a ItemRef,
        started_at: DateTime<Local>,
        accumulated_ms: i64,
    },
    Paused {
        item: &'a ItemRef,
        accumulated_ms: i64,
    },
}

impl<'a> TimerState<'a> {
    pub fn of(timer: Option<&'a ActiveTimer>) -> Self {
        match timer {
            None => Self::Idle,
            Some(t) if t.is_paused => Self::Paused {
                item: &t.item,
                accumulated_ms: t.accumulated_ms,
            },
            Some(t) => Self::Running {
                item: &t.item,
                started_at: t.start_time,
                accumulated_ms: t.accumulated_ms,
            },
        }
    }

    pub fn item(&self) -> Option<&'a ItemRef> {
        match self {
            Self::Idle => None,
            Self::Running { item, .. } | Self::Paused { item, .. } => Some(item),
        }
    }

    /// Banked time plus the current run segment
    pub fn elapsed_ms(&self, now: DateTime<Local>) -> i64 {
        match self {
            Self::Idle => 0,
            Self::Running {
                started_at,
                accumulated_ms,
                ..
            } => accumulated_ms + (now - *started_at).num_milliseconds().max(0),
            Self::Paused { accumulated_ms, .. } => *accumulated_ms,
        }
    }
}

/// Result of a timer transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerStep {
    pub timer: Option<ActiveTimer>,
    pub log: Option<ActivityLog>,
}

/// Begin timing `item`. A timer that is already active is force-stopped
/// first and its session committed as a log ending at `at`.
pub fn start(current: Option<&ActiveTimer>, item: ItemRef, at: DateTime<Local>) -> TimerStep {
    let log = current.map(|timer| commit_log(timer, at));
    TimerStep {
        timer: Some(ActiveTimer {
            item,
            start_time: at,
            accumulated_ms: 0,
            is_paused: false,
        }),
        log,
    }
}

/// Bank the running segment. `None` when idle or already paused.
pub fn pause(current: Option<&ActiveTimer>, at: DateTime<Local>) -> Option<TimerStep> {
    let timer = current.filter(|t| !t.is_paused)?;
    let accumulated_ms = TimerState::of(Some(timer)).elapsed_ms(at);
    Some(TimerStep {
        timer: Some(ActiveTimer {
            accumulated_ms,
            is_paused: true,
            ..timer.clone()
        }),
        log: None,
    })
}

/// Open a new run segment. `None` unless paused.
pub fn resume(current: Option<&ActiveTimer>, at: DateTime<Local>) -> Option<TimerStep> {
    let timer = current.filter(|t| t.is_paused)?;
    Some(TimerStep {
        timer: Some(ActiveTimer {
            start_time: at,
            is_paused: false,
            ..timer.clone()
        }),
        log: None,
    })
}

/// End the session and emit its log. `None` when idle.
pub fn stop(current: Option<&ActiveTimer>, end_time: DateTime<Local>) -> Option<TimerStep> {
    let timer = current?;
    Some(TimerStep {
        timer: None,
        log: Some(commit_log(timer, end_time)),
    })
}

/// Whole minutes a session is worth, rounded to nearest
pub fn duration_minutes(elapsed_ms: i64) -> u32 {
    (elapsed_ms.max(0) as f64 / MS_PER_MINUTE).round() as u32
}

/// Turn a finished session into a log ending at `end_time`.
/// A start before midnight is clamped to 0 rather than wrapping.
pub fn commit_log(timer: &ActiveTimer, end_time: DateTime<Local>) -> ActivityLog {
    let elapsed = TimerState::of(Some(timer)).elapsed_ms(end_time);
    let duration = duration_minutes(elapsed);
    let end = minute_of_day(end_time);

    ActivityLog {
        id: new_id(),
        item: timer.item.clone(),
        start: end.saturating_sub(duration),
        end,
        date: end_time.date_naive(),
    }
}

/// Format elapsed milliseconds as "HH:MM:SS"
pub fn format_elapsed(elapsed_ms: i64) -> String {
    let total_secs = elapsed_ms.max(0) / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}
