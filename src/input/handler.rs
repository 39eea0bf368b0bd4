use crate::app::{AppState, Focus};
use crate::calendar::Step;
use crate::domain::UiMode;
use crate::scheduling::ResizeEdge;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Rows scrolled per mouse wheel notch
const WHEEL_ROWS: i32 = 3;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // A status message lasts until the next key
    app.status = None;

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Placing => handle_placing_mode(app, key),
        UiMode::ConfirmOverwrite | UiMode::ConfirmDelete => handle_confirm_mode(app, key),
        UiMode::EditPlanned => handle_edit_planned_mode(app, key),
        UiMode::InputForm => handle_input_form_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),

        KeyCode::Tab => app.toggle_focus(),

        // Timer
        KeyCode::Char('s') => app.toggle_timer(),
        KeyCode::Char('S') => app.stop_timer(),

        // Date range and view
        KeyCode::Char('[') => app.navigate(Step::Prev),
        KeyCode::Char(']') => app.navigate(Step::Next),
        KeyCode::Char('t') => app.navigate(Step::Today),
        KeyCode::Char('v') => app.cycle_view_mode(),
        KeyCode::Char('b') => app.cycle_pane_visibility(),
        KeyCode::Char('r') => app.toggle_reports(),
        KeyCode::PageUp => app.scroll_calendar(-WHEEL_ROWS * 4),
        KeyCode::PageDown => app.scroll_calendar(WHEEL_ROWS * 4),

        KeyCode::Char('E') => {
            if let Err(err) = app.export_csv() {
                tracing::error!(error = %err, "export failed");
                app.status = Some(format!("Export failed: {}", err));
            }
        }

        _ => match app.focus {
            Focus::Tasks => handle_task_keys(app, key),
            Focus::Calendar => handle_calendar_keys(app, key),
        },
    }
    Ok(false)
}

fn handle_task_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        KeyCode::Right | KeyCode::Char('l') => app.toggle_focus(),

        KeyCode::Char('p') => app.begin_placing_selected(),
        KeyCode::Char('h') => app.toggle_selected_project_visibility(),

        // Add and edit
        KeyCode::Char('n') => app.start_add_project(),
        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Char('A') => app.start_add_subtask(),
        KeyCode::Char('e') => app.start_edit_selected(),
        KeyCode::Char('x') | KeyCode::Delete => app.request_delete_selected(),
        _ => {}
    }
}

fn handle_calendar_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor_time(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor_time(1),
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor_column(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor_column(1),
        KeyCode::Enter => app.edit_block_at_cursor(),
        KeyCode::Char('m') => app.begin_moving_at_cursor(),
        _ => {}
    }
}

/// The cursor carries an item or block; arrows hover, Enter drops
fn handle_placing_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor_time(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor_time(1),
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor_column(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor_column(1),
        KeyCode::Char('[') => app.navigate(Step::Prev),
        KeyCode::Char(']') => app.navigate(Step::Next),
        KeyCode::Enter => app.finish_placing(),
        KeyCode::Esc => app.cancel_placing(),
        _ => {}
    }
    Ok(false)
}

fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_pending(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.decline_pending(),
        _ => {}
    }
    Ok(false)
}

fn handle_edit_planned_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('d') => app.duplicate_editing_block(),
        KeyCode::Char('m') => app.move_editing_block(),
        KeyCode::Char('x') | KeyCode::Delete => app.request_delete_editing_block(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.resize_editing_block(ResizeEdge::Bottom, 1),
        KeyCode::Char('-') => app.resize_editing_block(ResizeEdge::Bottom, -1),
        KeyCode::Char('<') | KeyCode::Char(',') => app.resize_editing_block(ResizeEdge::Top, -1),
        KeyCode::Char('>') | KeyCode::Char('.') => app.resize_editing_block(ResizeEdge::Top, 1),
        KeyCode::Esc | KeyCode::Enter => app.close_block_editor(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in input form mode
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Tab | KeyCode::BackTab => app.input_form_toggle_field(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Left => app.input_form_cycle_color(false),
        KeyCode::Right => app.input_form_cycle_color(true),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle mouse events: left button drags, the wheel scrolls the day grid
pub fn handle_mouse(app: &mut AppState, event: MouseEvent) {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => app.mouse_down(event.column, event.row),
        MouseEventKind::Drag(MouseButton::Left) => app.mouse_drag(event.column, event.row),
        MouseEventKind::Up(MouseButton::Left) => app.mouse_up(event.column, event.row),
        MouseEventKind::ScrollUp => app.scroll_calendar(-WHEEL_ROWS),
        MouseEventKind::ScrollDown => app.scroll_calendar(WHEEL_ROWS),
        _ => {}
    }
}
