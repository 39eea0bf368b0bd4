use crate::app::{AppState, Focus};
use crate::calendar::{self, AgendaRow};
use crate::domain::time::{format_duration, format_time};
use crate::domain::{item_details, project_of, AppData, Pane};
use crate::ui::styles::{
    border_style, focused_border_style, hint_style, project_color, title_style, today_style,
};
use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the agenda: planned and actual entries of the week, day by day
pub fn render_agenda_pane(f: &mut Frame, app: &mut AppState, area: Rect) {
    let days = app.visible_days();
    let rows = calendar::agenda_rows(&days, &app.data, &app.day_filter());
    let today = app.today();

    let mut lines = Vec::new();
    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Nothing planned or recorded this week",
            hint_style(),
        )));
    }
    for (date, entries) in &rows {
        lines.push(day_heading(*date, today));
        for entry in entries {
            lines.push(agenda_line(&app.data, entry));
        }
        lines.push(Line::raw(""));
    }

    // Agenda scrolls by lines rather than grid rows
    let max_scroll = (lines.len() as u16).saturating_sub(area.height.saturating_sub(2));
    app.calendar_scroll = app.calendar_scroll.min(max_scroll);

    let border = if app.focus == Focus::Calendar {
        focused_border_style()
    } else {
        border_style()
    };
    let title = format!(" {} · Agenda ", calendar::range_label(&days));
    let paragraph = Paragraph::new(lines)
        .scroll((app.calendar_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(Span::styled(title, title_style())),
        );
    f.render_widget(paragraph, area);

    app.calendar_geometry = None;
}

fn day_heading(date: NaiveDate, today: NaiveDate) -> Line<'static> {
    let text = date.format(" %A, %B %-d").to_string();
    let style = if date == today { today_style() } else { title_style() };
    Line::from(Span::styled(text, style))
}

fn agenda_line(data: &AppData, entry: &AgendaRow<'_>) -> Line<'static> {
    let block = entry.block;
    let details = item_details(data, &block.item);
    let color = project_color(project_of(data, &block.item).map(|p| p.color));
    let tag = match entry.pane {
        Pane::Planned => "plan  ",
        Pane::Actual => "actual",
    };

    Line::from(vec![
        Span::raw(format!(
            "   {:>8} - {:<8} ",
            format_time(block.start),
            format_time(block.end)
        )),
        Span::styled(format!("{} ", tag), hint_style()),
        Span::styled("▍".to_string(), Style::default().fg(color)),
        Span::raw(format!(" {} ", details.title)),
        Span::styled(
            format!("({}, {})", details.project_name(), format_duration(block.duration())),
            hint_style(),
        ),
    ])
}
