use crate::app::AppState;
use crate::domain::time::{format_duration, format_time};
use crate::domain::{item_details, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn render_box(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title.to_string(), modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the yes/no prompt for overwrites and deletions
pub fn render_confirm_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(pending) = &app.pending else {
        return;
    };
    let title = if app.ui_mode == UiMode::ConfirmOverwrite {
        " Overwrite? "
    } else {
        " Delete? "
    };

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  {}", pending.message)),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Yes  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" No"),
        ]),
    ];
    render_box(f, area, title, lines);
}

/// Render the editor for a planned block
pub fn render_edit_planned_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(block) = app.editing_block() else {
        return;
    };
    let details = item_details(&app.data, &block.item);

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(format!("  {}", details.title), modal_title_style())),
        Line::raw(format!("  {}", details.project_name())),
        Line::raw(format!(
            "  {}  {} - {}  ({})",
            block.date.format("%a %b %-d"),
            format_time(block.start),
            format_time(block.end),
            format_duration(block.duration())
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [d]", modal_title_style()),
            Span::raw(" Duplicate  "),
            Span::styled("[m]", modal_title_style()),
            Span::raw(" Move  "),
            Span::styled("[x]", modal_title_style()),
            Span::raw(" Delete"),
        ]),
        Line::from(vec![
            Span::styled("  [+/-]", modal_title_style()),
            Span::raw(" End ±15m  "),
            Span::styled("[</>]", modal_title_style()),
            Span::raw(" Start ±15m"),
        ]),
        Line::from(vec![
            Span::styled("  [Esc]", modal_title_style()),
            Span::raw(" Close"),
        ]),
    ];
    render_box(f, area, " Planned Event ", lines);
}
