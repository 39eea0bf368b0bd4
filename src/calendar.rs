//! Calendar windows, per-day filtering and drop previews.

use crate::domain::{
    project_of, AppData, ItemRef, Pane, ScheduledBlock, TimeBlock, Timeline, ViewMode,
    MINUTES_IN_DAY, SNAP_MINUTES,
};
use crate::scheduling::{placement, DragPayload, DropTarget};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashSet;

/// Direction for stepping the anchor date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
    Today,
}

/// Minutes covered by one terminal row of the day grid
pub const ROW_MINUTES: u32 = SNAP_MINUTES;

/// Rows in a full day grid
pub const DAY_ROWS: u32 = MINUTES_IN_DAY / ROW_MINUTES;

/// Timeline measured in grid rows
pub fn row_timeline() -> Timeline {
    Timeline::new(DAY_ROWS as f64)
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Days shown for a view anchored at `anchor`
pub fn visible_days(mode: ViewMode, anchor: NaiveDate) -> Vec<NaiveDate> {
    match mode {
        ViewMode::Day => vec![anchor],
        ViewMode::ThreeDay => (-1..=1).map(|i| anchor + Duration::days(i)).collect(),
        ViewMode::Week | ViewMode::Agenda => {
            let monday = week_start(anchor);
            (0..7).map(|i| monday + Duration::days(i)).collect()
        }
    }
}

/// Move the anchor one window forward or back
pub fn navigate(mode: ViewMode, anchor: NaiveDate, step: Step, today: NaiveDate) -> NaiveDate {
    let span = match mode {
        ViewMode::Day => 1,
        ViewMode::ThreeDay => 3,
        ViewMode::Week | ViewMode::Agenda => 7,
    };
    match step {
        Step::Prev => anchor - Duration::days(span),
        Step::Next => anchor + Duration::days(span),
        Step::Today => today,
    }
}

/// Header text such as "March 4, 2024" or "March 4 - March 10, 2024"
pub fn range_label(days: &[NaiveDate]) -> String {
    match (days.first(), days.last()) {
        (Some(first), Some(last)) if first == last => first.format("%B %-d, %Y").to_string(),
        (Some(first), Some(last)) => format!(
            "{} - {}",
            first.format("%B %-d"),
            last.format("%B %-d, %Y")
        ),
        _ => String::new(),
    }
}

/// Which projects' blocks are shown. `None` shows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayFilter {
    pub visible_projects: Option<HashSet<String>>,
}

impl DayFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Everything except the hidden projects
    pub fn hiding(data: &AppData, hidden: &[String]) -> Self {
        if hidden.is_empty() {
            return Self::all();
        }
        let visible = data
            .projects
            .iter()
            .filter(|p| !hidden.contains(&p.id))
            .map(|p| p.id.clone())
            .collect();
        Self {
            visible_projects: Some(visible),
        }
    }

    pub fn shows(&self, data: &AppData, item: &ItemRef) -> bool {
        match &self.visible_projects {
            None => true,
            Some(visible) => project_of(data, item)
                .map(|p| visible.contains(&p.id))
                .unwrap_or(false),
        }
    }

    /// Blocks on `date` that pass the filter, in start order
    pub fn blocks_on<'a>(
        &self,
        data: &AppData,
        blocks: &'a [TimeBlock],
        date: NaiveDate,
    ) -> Vec<&'a TimeBlock> {
        let mut day: Vec<&TimeBlock> = blocks
            .iter()
            .filter(|b| b.date == date && self.shows(data, &b.item))
            .collect();
        day.sort_by_key(|b| (b.start, b.end));
        day
    }
}

/// One line of the agenda
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaRow<'a> {
    pub pane: Pane,
    pub block: &'a TimeBlock,
}

/// Planned and actual entries per day, merged and sorted by start.
/// Days with nothing on them are left out.
pub fn agenda_rows<'a>(
    days: &[NaiveDate],
    data: &'a AppData,
    filter: &DayFilter,
) -> Vec<(NaiveDate, Vec<AgendaRow<'a>>)> {
    days.iter()
        .filter_map(|&date| {
            let planned = filter
                .blocks_on(data, &data.scheduled_blocks, date)
                .into_iter()
                .map(|block| AgendaRow {
                    pane: Pane::Planned,
                    block,
                });
            let actual = filter
                .blocks_on(data, &data.activity_logs, date)
                .into_iter()
                .map(|block| AgendaRow {
                    pane: Pane::Actual,
                    block,
                });
            let mut rows: Vec<AgendaRow> = planned.chain(actual).collect();
            // stable: planned stays ahead of actual on equal starts
            rows.sort_by_key(|r| r.block.start);
            (!rows.is_empty()).then_some((date, rows))
        })
        .collect()
}

/// Highlight drawn under the pointer while dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewRect {
    pub date: NaiveDate,
    pub pane: Pane,
    pub start: u32,
    pub end: u32,
    /// False renders the "not allowed" affordance
    pub allowed: bool,
}

/// Preview for the current hover position, or `None` once the pointer
/// has left every drop target
pub fn preview(
    payload: &DragPayload,
    hover: Option<DropTarget>,
    timeline: Timeline,
) -> Option<PreviewRect> {
    let target = hover?;
    let candidate =
        placement::Candidate::at(target.offset, timeline, payload.duration, target.date);
    let allowed = placement::pane_allowed(payload, target.pane).is_ok() && candidate.fits_in_day();
    Some(PreviewRect {
        date: target.date,
        pane: target.pane,
        start: candidate.start,
        end: candidate.end.min(MINUTES_IN_DAY),
        allowed,
    })
}

/// Copy of `block` placed right after it, or `None` past midnight
pub fn duplicate_block(block: &ScheduledBlock, new_id: String) -> Option<ScheduledBlock> {
    let end = block.end + block.duration();
    if end > MINUTES_IN_DAY {
        return None;
    }
    Some(ScheduledBlock {
        id: new_id,
        start: block.end,
        end,
        ..block.clone()
    })
}
