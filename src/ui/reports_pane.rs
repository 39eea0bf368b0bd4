use crate::app::AppState;
use crate::calendar;
use crate::domain::time::format_duration;
use crate::report::stats::{format_hours, Summary};
use crate::report::summary;
use crate::ui::styles::{border_style, hint_style, project_color, title_style};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the longest bar in the per-project chart
const BAR_WIDTH: usize = 24;

fn bar(minutes: u32, max: u32) -> String {
    if max == 0 {
        return String::new();
    }
    let cells = (minutes as f64 / max as f64 * BAR_WIDTH as f64).round() as usize;
    "█".repeat(cells)
}

fn report_lines(totals: &Summary<'_>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("  Total Time Planned  "),
            Span::styled(format_hours(totals.total_planned), title_style()),
        ]),
        Line::from(vec![
            Span::raw("  Total Time Actual   "),
            Span::styled(format_hours(totals.total_actual), title_style()),
        ]),
        Line::from(vec![
            Span::raw("  Plan Adherence      "),
            Span::styled(format!("{:.0}%", totals.adherence_percent()), title_style()),
        ]),
        Line::raw(""),
        Line::from(Span::styled("  Planned vs Actual by Project", title_style())),
    ];

    let max = totals
        .projects
        .iter()
        .map(|p| p.planned.max(p.actual))
        .max()
        .unwrap_or(0);
    for row in &totals.projects {
        let color = Style::default().fg(project_color(Some(row.project.color)));
        lines.push(Line::from(Span::raw(format!("  {}", row.project.name))));
        lines.push(Line::from(vec![
            Span::styled("    plan   ", hint_style()),
            Span::styled(bar(row.planned, max), color),
            Span::raw(format!(" {}", format_duration(row.planned))),
        ]));
        lines.push(Line::from(vec![
            Span::styled("    actual ", hint_style()),
            Span::styled(bar(row.actual, max), color),
            Span::raw(format!(" {}", format_duration(row.actual))),
        ]));
    }

    let slices = totals.pie_slices();
    if !slices.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("  Actual Time by Project", title_style())));
        for slice in slices {
            lines.push(Line::raw(format!(
                "  {:<16} {:>5.1}%  {}",
                slice.name,
                slice.percent,
                format_duration(slice.minutes)
            )));
        }
    }

    lines
}

/// Render planned-vs-actual totals for the visible days
pub fn render_reports_pane(f: &mut Frame, app: &mut AppState, area: Rect) {
    let days = app.visible_days();
    let totals = summary(&app.data, app.report_range());
    let lines = report_lines(&totals);

    let title = format!(" Reports · {} ", calendar::range_label(&days));
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );
    f.render_widget(paragraph, area);

    app.calendar_geometry = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::seed::initial_state;
    use crate::report::DateRange;
    use chrono::NaiveDate;

    #[test]
    fn test_bar_scales_to_largest() {
        assert_eq!(bar(90, 90).chars().count(), BAR_WIDTH);
        assert_eq!(bar(45, 90).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(10, 0), "");
    }

    #[test]
    fn test_report_lines_include_slices() {
        let data = initial_state(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        let totals = summary(&data, DateRange::all());
        let text: Vec<String> = report_lines(&totals)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(text.contains(&"  Plan Adherence      43%".to_string()));
        assert!(text.iter().any(|l| l.starts_with("  Health") && l.contains("100.0%")));
    }
}
