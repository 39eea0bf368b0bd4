pub mod agenda_pane;
pub mod calendar_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod reports_pane;
pub mod styles;
pub mod task_list_pane;
pub mod timer_bar;

use crate::app::AppState;
use crate::domain::{UiMode, ViewMode};
use agenda_pane::render_agenda_pane;
use calendar_pane::render_calendar_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_confirm_modal, render_edit_planned_modal};
use ratatui::Frame;
use reports_pane::render_reports_pane;
use task_list_pane::render_task_list_pane;
use timer_bar::render_timer_bar;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &mut AppState) {
    let size = f.size();
    let layout = create_layout(size);

    // Render keybindings bar
    render_keybindings(f, app, layout.keybindings_area);

    // Render panes
    render_task_list_pane(f, app, layout.task_list_area);
    if app.show_reports {
        render_reports_pane(f, app, layout.calendar_area);
    } else if app.metadata.view_mode == ViewMode::Agenda {
        render_agenda_pane(f, app, layout.calendar_area);
    } else {
        render_calendar_pane(f, app, layout.calendar_area);
    }
    render_timer_bar(f, app, layout.timer_area);

    // Render modal if active
    match app.ui_mode {
        UiMode::ConfirmOverwrite | UiMode::ConfirmDelete => render_confirm_modal(f, app, size),
        UiMode::EditPlanned => render_edit_planned_modal(f, app, size),
        UiMode::InputForm => render_input_form(f, app, size),
        UiMode::Normal | UiMode::Placing => {}
    }
}
