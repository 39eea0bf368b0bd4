use crate::domain::ProjectColor;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Running timer badge style
pub fn running_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Paused timer badge style
pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Idle timer style
pub fn idle_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Tree connector style (for subtasks)
pub fn tree_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Border of the pane that has keyboard focus
pub fn focused_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Terminal color for a project; gray when the reference dangles
pub fn project_color(color: Option<ProjectColor>) -> Color {
    match color {
        Some(ProjectColor::Blue) => Color::Blue,
        Some(ProjectColor::Green) => Color::Green,
        Some(ProjectColor::Purple) => Color::Magenta,
        Some(ProjectColor::Yellow) => Color::Yellow,
        None => Color::DarkGray,
    }
}

/// Filled calendar block
pub fn block_style(color: Option<ProjectColor>) -> Style {
    Style::default().fg(Color::Black).bg(project_color(color))
}

/// Recorded activity, dimmer than a planned block
pub fn actual_block_style(color: Option<ProjectColor>) -> Style {
    Style::default()
        .fg(project_color(color))
        .bg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

/// Drop preview where the drop would be accepted
pub fn preview_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::LightGreen)
}

/// Drop preview where the drop would be refused
pub fn preview_denied_style() -> Style {
    Style::default().fg(Color::White).bg(Color::Red)
}

/// Faint hour rule in the day grid
pub fn grid_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Current time marker
pub fn now_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

/// Today's column header
pub fn today_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_color_fallback() {
        assert_eq!(project_color(Some(ProjectColor::Purple)), Color::Magenta);
        assert_eq!(project_color(None), Color::DarkGray);
    }
}
