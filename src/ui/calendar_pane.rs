//! Day grid: one column per visible day, split into planned and actual
//! panes, one terminal row per quarter hour.

use crate::app::{AppState, Focus};
use crate::calendar::{self, PreviewRect, DAY_ROWS, ROW_MINUTES};
use crate::domain::time::{format_time, hour_label, minute_of_day};
use crate::domain::{item_details, project_of, Pane, PaneVisibility, TimeBlock};
use crate::scheduling::{placement, resolve_pane, DropTarget, Gesture};
use crate::ui::styles::{
    actual_block_style, block_style, border_style, default_style, focused_border_style, grid_style,
    hint_style, now_style, preview_denied_style, preview_style, title_style, today_style,
};
use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Columns reserved for hour labels
const GUTTER_WIDTH: u16 = 7;

/// Screen span of one day column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub x: u16,
    pub width: u16,
}

/// Where the grid was last drawn, for mapping mouse cells to drop targets
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGeometry {
    pub columns: Vec<DayColumn>,
    /// Screen row of the first grid row
    pub top: u16,
    pub height: u16,
    /// Grid row shown at `top`
    pub scroll: u16,
    pub visibility: PaneVisibility,
}

impl CalendarGeometry {
    /// Drop target under a screen cell; the offset is in grid rows
    pub fn target_at(&self, x: u16, y: u16) -> Option<DropTarget> {
        if y < self.top || y >= self.top + self.height {
            return None;
        }
        let column = self.columns.iter().find(|c| x >= c.x && x < c.x + c.width)?;
        let pane = resolve_pane(x as f64, column.x as f64, column.width as f64, self.visibility);
        Some(DropTarget {
            date: column.date,
            pane,
            offset: (y - self.top + self.scroll) as f64,
        })
    }
}

/// Split `width` evenly across the days; the last column takes the rest
fn day_columns(days: &[NaiveDate], x: u16, width: u16) -> Vec<DayColumn> {
    if days.is_empty() {
        return Vec::new();
    }
    let each = width / days.len() as u16;
    days.iter()
        .enumerate()
        .map(|(i, &date)| {
            let left = x + each * i as u16;
            let w = if i + 1 == days.len() { width - each * i as u16 } else { each };
            DayColumn { date, x: left, width: w }
        })
        .collect()
}

/// Pane sub-columns of a day as `(pane, x, width)`
fn pane_spans(column: &DayColumn, visibility: PaneVisibility) -> Vec<(Pane, u16, u16)> {
    match visibility.forced() {
        Some(pane) => vec![(pane, column.x, column.width)],
        None => {
            let half = column.width / 2;
            vec![
                (Pane::Planned, column.x, half),
                (Pane::Actual, column.x + half, column.width - half),
            ]
        }
    }
}

/// Pad or cut `text` to exactly `width` characters
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

/// Text for grid row `row` of a block: title on the first row, times on the second
fn block_label(block: &TimeBlock, title: &str, row: u32) -> String {
    let first = block.start / ROW_MINUTES;
    if row == first {
        format!(" {}", title)
    } else if row == first + 1 {
        format!(" {} - {}", format_time(block.start), format_time(block.end))
    } else {
        String::new()
    }
}

/// Render the calendar grid
pub fn render_calendar_pane(f: &mut Frame, app: &mut AppState, area: Rect) {
    let days = app.visible_days();
    let title = format!(
        " {} · {} ",
        calendar::range_label(&days),
        app.metadata.view_mode.name()
    );
    let border = if app.focus == Focus::Calendar {
        focused_border_style()
    } else {
        border_style()
    };
    let frame_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title, title_style()));
    let inner = frame_block.inner(area);
    f.render_widget(frame_block, area);

    if inner.height < 2 || inner.width <= GUTTER_WIDTH + 2 {
        app.calendar_geometry = None;
        return;
    }

    let grid_height = inner.height - 1;
    let max_scroll = (DAY_ROWS as u16).saturating_sub(grid_height);
    app.calendar_scroll = app.calendar_scroll.min(max_scroll);

    let geometry = CalendarGeometry {
        columns: day_columns(&days, inner.x + GUTTER_WIDTH, inner.width - GUTTER_WIDTH),
        top: inner.y + 1,
        height: grid_height,
        scroll: app.calendar_scroll,
        visibility: app.metadata.pane_visibility,
    };

    render_header(f, app, &geometry, inner);
    render_gutter(f, &geometry, inner.x);

    let preview = app
        .gesture
        .as_ref()
        .and_then(|gesture| match gesture {
            Gesture::Drag(session) => gesture
                .drag_payload()
                .and_then(|payload| calendar::preview(&payload, session.hover, calendar::row_timeline())),
            Gesture::Resize(_) => None,
        });

    for column in &geometry.columns {
        for (pane, x, width) in pane_spans(column, geometry.visibility) {
            let lines = pane_lines(app, column.date, pane, width, &geometry, preview);
            let rect = Rect::new(x, geometry.top, width, geometry.height);
            f.render_widget(Paragraph::new(lines), rect);
        }
    }

    app.calendar_geometry = Some(geometry);
}

fn render_header(f: &mut Frame, app: &AppState, geometry: &CalendarGeometry, inner: Rect) {
    let today = app.today();
    let mut spans = vec![Span::raw(" ".repeat(GUTTER_WIDTH as usize))];
    for column in &geometry.columns {
        let style = if column.date == today {
            today_style()
        } else {
            default_style()
        };
        let day = column.date.format("%a %-d").to_string();
        for (pane, _, width) in pane_spans(column, geometry.visibility) {
            let label = match (pane, geometry.visibility) {
                (Pane::Planned, PaneVisibility::Both) => format!("{} {}", day, pane.label()),
                (Pane::Actual, PaneVisibility::Both) => pane.label().to_string(),
                _ => format!("{} {}", day, pane.label()),
            };
            spans.push(Span::styled(fit(&label, width as usize), style));
        }
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );
}

fn render_gutter(f: &mut Frame, geometry: &CalendarGeometry, x: u16) {
    let lines: Vec<Line> = (0..geometry.height)
        .map(|i| {
            let row = (geometry.scroll + i) as u32;
            if row % 4 == 0 {
                Line::from(Span::styled(
                    format!("{:>6} ", hour_label(row / 4)),
                    hint_style(),
                ))
            } else {
                Line::raw("")
            }
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines),
        Rect::new(x, geometry.top, GUTTER_WIDTH, geometry.height),
    );
}

/// One styled line per visible grid row of a pane
fn pane_lines(
    app: &AppState,
    date: NaiveDate,
    pane: Pane,
    width: u16,
    geometry: &CalendarGeometry,
    preview: Option<PreviewRect>,
) -> Vec<Line<'static>> {
    let filter = app.day_filter();
    let source = match pane {
        Pane::Planned => &app.data.scheduled_blocks,
        Pane::Actual => &app.data.activity_logs,
    };
    let blocks = filter.blocks_on(&app.data, source, date);

    let now = app.now();
    let now_row = (now.date_naive() == date).then(|| minute_of_day(now) / ROW_MINUTES);
    let cursor = app
        .cursor_target()
        .filter(|t| app.focus == Focus::Calendar && t.date == date && t.pane == pane)
        .map(|_| app.cursor.minute / ROW_MINUTES);
    let preview = preview.filter(|p| p.date == date && p.pane == pane);
    let width = width as usize;

    (0..geometry.height)
        .map(|i| {
            let row = (geometry.scroll + i) as u32;
            let minute = row * ROW_MINUTES;

            let hit = blocks
                .iter()
                .filter(|b| placement::overlaps(b.start, b.end, minute, minute + ROW_MINUTES))
                .last();

            let (text, mut style) = if let Some(p) =
                preview.filter(|p| placement::overlaps(p.start, p.end, minute, minute + ROW_MINUTES))
            {
                let marker = if p.allowed { " +" } else { " ✕" };
                let label = if row == p.start / ROW_MINUTES {
                    format!("{} {}", marker, format_time(p.start))
                } else {
                    String::new()
                };
                let style = if p.allowed {
                    preview_style()
                } else {
                    preview_denied_style()
                };
                (label, style)
            } else if let Some(block) = hit {
                let details = item_details(&app.data, &block.item);
                let color = project_of(&app.data, &block.item).map(|p| p.color);
                let style = match pane {
                    Pane::Planned => block_style(color),
                    Pane::Actual => actual_block_style(color),
                };
                (block_label(block, details.title, row), style)
            } else if now_row == Some(row) {
                ("─".repeat(width), now_style())
            } else if row % 4 == 0 {
                ("┈".repeat(width), grid_style())
            } else {
                (String::new(), Style::default())
            };

            if cursor == Some(row) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(fit(&text, width), style))
        })
        .collect()
}
