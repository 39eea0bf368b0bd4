use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style, project_color},
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding or editing projects, tasks and subtasks
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = Vec::new();
        let cursor = |field: usize| {
            if form.editing_field == field {
                Span::styled("█", modal_title_style())
            } else {
                Span::raw("")
            }
        };

        // Title field
        lines.push(Line::raw(""));
        let title_label = if form.editing_field == 0 {
            "Title: (editing)"
        } else {
            "Title:"
        };
        lines.push(Line::raw(title_label));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(form.title.as_str(), modal_title_style()),
            cursor(0),
        ]));
        lines.push(Line::raw(""));

        if form.target.is_project() {
            // Color field
            let color_label = if form.editing_field == 1 {
                "Color (←/→ to change): (editing)"
            } else {
                "Color:"
            };
            lines.push(Line::raw(color_label));
            lines.push(Line::from(vec![
                Span::raw("> "),
                Span::styled("● ", Style::default().fg(project_color(Some(form.color)))),
                Span::styled(form.color.name(), modal_title_style()),
            ]));
        } else {
            // Estimate field
            let estimate_label = if form.editing_field == 1 {
                "Estimate in minutes (blank for none): (editing)"
            } else {
                "Estimate in minutes:"
            };
            lines.push(Line::raw(estimate_label));
            lines.push(Line::from(vec![
                Span::raw("> "),
                Span::styled(form.estimate.as_str(), modal_title_style()),
                cursor(1),
            ]));
        }
        lines.push(Line::raw(""));

        // Instructions
        lines.push(Line::raw("Tab to switch fields  ·  Enter to submit  ·  Esc to cancel"));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        format!(" {} ", form.target.heading()),
                        modal_title_style(),
                    ))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
