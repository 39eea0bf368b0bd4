use crate::app::{AppState, Focus};
use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hints for the current mode and focus
pub fn hints(app: &AppState) -> &'static str {
    match app.ui_mode {
        UiMode::Placing => " ↑/↓ time   ←/→ day/pane   Enter drop   Esc cancel",
        UiMode::ConfirmOverwrite | UiMode::ConfirmDelete => " y yes   n/Esc no",
        UiMode::EditPlanned => " d duplicate   m move   +/- end   </> start   x delete   Esc close",
        UiMode::InputForm => " Tab field   Enter submit   Esc cancel",
        UiMode::Normal => match app.focus {
            Focus::Tasks => {
                " ↑/↓ select   s start/pause   S stop   p place   n/a/A add   e edit   x delete   h hide   Tab calendar   [/]/t dates   v view   b panes   r reports   E export   q quit"
            }
            Focus::Calendar => {
                " ↑/↓/←/→ move   Enter edit   m move block   Tab tasks   [/]/t dates   v view   b panes   r reports   E export   q quit"
            }
        },
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let paragraph = Paragraph::new(Line::raw(hints(app))).style(hint_style());
    f.render_widget(paragraph, area);
}
