use crate::app::AppState;
use crate::domain::item_details;
use crate::timer::{format_elapsed, TimerState};
use crate::ui::styles::{border_style, error_style, idle_style, paused_style, running_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the running timer and the latest status message
pub fn render_timer_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(" Timer ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    f.render_widget(Paragraph::new(timer_line(app)), chunks[0]);

    if let Some(status) = &app.status {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(status.clone(), error_style())))
                .alignment(ratatui::layout::Alignment::Right),
            chunks[1],
        );
    }
}

fn timer_line(app: &AppState) -> Line<'static> {
    let state = TimerState::of(app.data.active_timer.as_ref());
    let Some(item) = state.item() else {
        return Line::from(Span::styled(" No timer running", idle_style()));
    };

    let details = item_details(&app.data, item);
    let (badge, style) = match state {
        TimerState::Paused { .. } => ("⏸ PAUSED ", paused_style()),
        _ => ("▶ RUNNING", running_style()),
    };
    Line::from(vec![
        Span::styled(format!(" {} ", badge), style),
        Span::styled(format!("{} ", format_elapsed(state.elapsed_ms(app.now()))), style),
        Span::raw(format!(" {} ({})", details.title, details.project_name())),
    ])
}
