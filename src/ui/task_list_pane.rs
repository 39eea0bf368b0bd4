use crate::app::{AppState, Focus};
use crate::domain::time::format_duration;
use crate::domain::{item_details, tree_connector, AppData, RowKind, TaskRow};
use crate::timer::TimerState;
use crate::ui::styles::{
    border_style, default_style, focused_border_style, hint_style, paused_style, project_color,
    running_style, selected_style, title_style, tree_style,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Screen rectangle the list rows occupy, for mouse hit tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListGeometry {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    /// Index of the first visible row
    pub offset: usize,
}

impl ListGeometry {
    /// Row index under a screen cell
    pub fn row_at(&self, x: u16, y: u16) -> Option<usize> {
        let inside = x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height;
        inside.then(|| self.offset + (y - self.y) as usize)
    }
}

/// Render the projects/tasks/subtasks tree
pub fn render_task_list_pane(f: &mut Frame, app: &mut AppState, area: Rect) {
    let flat_rows = app.rows();
    let visible_height = area.height.saturating_sub(2) as usize;

    // Keep the selection on screen
    if app.selected_index < app.task_scroll {
        app.task_scroll = app.selected_index;
    } else if visible_height > 0 && app.selected_index >= app.task_scroll + visible_height {
        app.task_scroll = app.selected_index + 1 - visible_height;
    }

    let timer = TimerState::of(app.data.active_timer.as_ref());
    let items: Vec<ListItem> = flat_rows
        .iter()
        .enumerate()
        .skip(app.task_scroll)
        .take(visible_height)
        .map(|(idx, row)| {
            let line = create_row_line(&app.data, row, timer, &app.metadata.hidden_projects);
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let border = if app.focus == Focus::Tasks {
        focused_border_style()
    } else {
        border_style()
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(" Projects ", title_style())),
    );
    f.render_widget(list, area);

    app.task_list_geometry = Some(ListGeometry {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: visible_height as u16,
        offset: app.task_scroll,
    });
}

/// Create a single line for a project, task or subtask
/// Format: ├─ Write proposal  1h 30m ▶
fn create_row_line(data: &AppData, row: &TaskRow, timer: TimerState<'_>, hidden: &[String]) -> Line<'static> {
    let mut spans = Vec::new();

    match &row.kind {
        RowKind::Project(project_id) => {
            let project = data.project(project_id);
            let color = project_color(project.map(|p| p.color));
            spans.push(Span::styled("● ".to_string(), Style::default().fg(color)));
            spans.push(Span::raw(project.map(|p| p.name.clone()).unwrap_or_default()));
            if hidden.contains(project_id) {
                spans.push(Span::styled("  (hidden)".to_string(), hint_style()));
            }
        }
        RowKind::Item(item) => {
            // Indentation and tree connector
            let indent = if row.depth > 1 { "    │  " } else { " " };
            spans.push(Span::styled(indent.to_string(), tree_style()));
            spans.push(Span::styled(tree_connector(row.is_last).to_string(), tree_style()));
            spans.push(Span::raw(" ".to_string()));

            let details = item_details(data, item);
            spans.push(Span::raw(details.title.to_string()));

            if let Some(est) = details.est_duration {
                spans.push(Span::styled(format!("  {}", format_duration(est)), tree_style()));
            }

            match timer {
                TimerState::Running { item: current, .. } if current == item => {
                    spans.push(Span::styled(" ▶".to_string(), running_style()));
                }
                TimerState::Paused { item: current, .. } if current == item => {
                    spans.push(Span::styled(" ⏸".to_string(), paused_style()));
                }
                _ => {}
            }
        }
    }

    Line::from(spans)
}
