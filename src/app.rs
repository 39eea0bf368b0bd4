use crate::calendar::{self, DayFilter, Step, DAY_ROWS, ROW_MINUTES};
use crate::clock::Clock;
use crate::config::Settings;
use crate::domain::time::minute_of_day;
use crate::domain::{
    drag_duration, flatten_rows, item_details, new_id, AppData, ItemRef, Pane, Project,
    ProjectColor, RowKind, Subtask, Task, TaskRow, TimeBlock, UiMode, ViewMode, MINUTES_IN_DAY,
};
use crate::persistence::{self, load_metadata, load_state, save_metadata, save_state, AppMetadata, KeyValueStore};
use crate::report::{self, DateRange};
use crate::scheduling::{
    placement, DragPayload, DropPlan, DropTarget, Gesture, GestureEnd, ResizeEdge, ResizeSession,
};
use crate::store::{self, Action, Transition};
use crate::timer::TimerState;
use crate::ui::calendar_pane::CalendarGeometry;
use crate::ui::task_list_pane::ListGeometry;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use std::path::PathBuf;

/// Which side of the screen receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Tasks,
    Calendar,
}

/// A destructive change waiting for a yes/no answer
#[derive(Debug, Clone)]
pub struct PendingConfirm {
    pub message: String,
    pub actions: Vec<Action>,
}

/// What the input form creates or edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    NewProject,
    NewTask { project_id: String },
    NewSubtask { task_id: String },
    EditProject { project_id: String },
    EditTask { task_id: String },
    EditSubtask { subtask_id: String },
}

impl FormTarget {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::NewProject => "New Project",
            Self::NewTask { .. } => "New Task",
            Self::NewSubtask { .. } => "New Subtask",
            Self::EditProject { .. } => "Edit Project",
            Self::EditTask { .. } => "Edit Task",
            Self::EditSubtask { .. } => "Edit Subtask",
        }
    }

    pub fn is_project(&self) -> bool {
        matches!(self, Self::NewProject | Self::EditProject { .. })
    }
}

/// Longest estimate the form accepts, one week
pub const MAX_ESTIMATE_MINUTES: u32 = 7 * MINUTES_IN_DAY;

/// Input form state for adding or editing projects, tasks and subtasks
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub target: FormTarget,
    pub title: String,
    /// Estimate in minutes, digits only
    pub estimate: String,
    pub color: ProjectColor,
    pub editing_field: usize, // 0 = title, 1 = estimate or color
}

impl InputFormState {
    fn new(target: FormTarget) -> Self {
        Self {
            target,
            title: String::new(),
            estimate: String::new(),
            color: ProjectColor::Blue,
            editing_field: 0,
        }
    }

    /// Parsed estimate; blank or zero means none
    pub fn estimate_minutes(&self) -> Option<u32> {
        self.estimate
            .parse::<u32>()
            .ok()
            .filter(|m| *m > 0)
            .map(|m| m.min(MAX_ESTIMATE_MINUTES))
    }
}

/// Keyboard cursor over the calendar grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    /// Index into the visible days
    pub day: usize,
    pub pane: Pane,
    /// Start of the highlighted row
    pub minute: u32,
}

/// Where the left button went down, to tell clicks from drags
#[derive(Debug, Clone, PartialEq, Eq)]
struct PointerPress {
    x: u16,
    y: u16,
    block: Option<(Pane, String)>,
}

/// Main application state
pub struct AppState {
    pub data: AppData,
    pub settings: Settings,
    pub metadata: AppMetadata,
    pub anchor: NaiveDate,
    pub focus: Focus,
    pub selected_index: usize,
    pub cursor: CalendarCursor,
    pub ui_mode: UiMode,
    pub gesture: Option<Gesture>,
    pub pending: Option<PendingConfirm>,
    pub editing_block: Option<String>,
    pub input_form: Option<InputFormState>,
    pub status: Option<String>,
    pub show_reports: bool,
    pub needs_save: bool,
    pub meta_needs_save: bool,

    // Set while rendering; used for mouse hit tests and scrolling
    pub calendar_scroll: u16,
    pub task_scroll: usize,
    pub calendar_geometry: Option<CalendarGeometry>,
    pub task_list_geometry: Option<ListGeometry>,

    press: Option<PointerPress>,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    data_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        settings: Settings,
        data_dir: Option<PathBuf>,
    ) -> Self {
        let now = clock.now();
        let data = load_state(store.as_ref(), now.date_naive());

        let metadata = data_dir
            .as_deref()
            .and_then(|dir| match load_metadata(persistence::meta_file(dir)) {
                Ok(metadata) => metadata,
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring unreadable metadata");
                    None
                }
            })
            .unwrap_or_else(|| AppMetadata {
                view_mode: settings.default_view,
                pane_visibility: settings.default_pane_visibility,
                hidden_projects: Vec::new(),
            });

        let minute = placement::snap(minute_of_day(now)).min(MINUTES_IN_DAY - ROW_MINUTES);

        let mut app = Self {
            data,
            settings,
            metadata,
            anchor: now.date_naive(),
            focus: Focus::Tasks,
            selected_index: 0,
            cursor: CalendarCursor {
                day: 0,
                pane: Pane::Planned,
                minute,
            },
            ui_mode: UiMode::Normal,
            gesture: None,
            pending: None,
            editing_block: None,
            input_form: None,
            status: None,
            show_reports: false,
            needs_save: false,
            meta_needs_save: false,
            calendar_scroll: (minute / ROW_MINUTES).saturating_sub(4) as u16,
            task_scroll: 0,
            calendar_geometry: None,
            task_list_geometry: None,
            press: None,
            store,
            clock,
            data_dir,
        };
        app.cursor.day = app.today_column();
        app
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Apply one action. Returns whether the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        match store::apply(&self.data, &action) {
            Transition::Unchanged => false,
            Transition::Changed(next) => {
                self.data = next;
                if action.is_durable() {
                    self.needs_save = true;
                    tracing::info!(action = action.name(), "state changed");
                }
                self.clamp_selection();
                true
            }
        }
    }

    /// Apply a batch atomically as far as persistence is concerned
    pub fn dispatch_all(&mut self, actions: Vec<Action>) -> bool {
        match store::apply_all(&self.data, &actions) {
            Transition::Unchanged => false,
            Transition::Changed(next) => {
                self.data = next;
                if actions.iter().any(Action::is_durable) {
                    self.needs_save = true;
                    tracing::info!(count = actions.len(), "batch applied");
                }
                self.clamp_selection();
                true
            }
        }
    }

    /// Save state and metadata if they changed
    pub fn save(&mut self) -> Result<()> {
        if self.needs_save {
            save_state(self.store.as_mut(), &self.data)?;
            self.needs_save = false;
        }
        if self.meta_needs_save {
            if let Some(dir) = &self.data_dir {
                save_metadata(persistence::meta_file(dir), &self.metadata)?;
            }
            self.meta_needs_save = false;
        }
        Ok(())
    }

    // Task list

    pub fn rows(&self) -> Vec<TaskRow> {
        flatten_rows(&self.data)
    }

    pub fn selected_row(&self) -> Option<TaskRow> {
        self.rows().into_iter().nth(self.selected_index)
    }

    pub fn selected_item(&self) -> Option<ItemRef> {
        self.selected_row().and_then(|row| row.item().cloned())
    }

    /// Project of the selected row, whatever its depth
    pub fn selected_project_id(&self) -> Option<String> {
        match self.selected_row()?.kind {
            RowKind::Project(id) => Some(id),
            RowKind::Item(item) => item_details(&self.data, &item).project.map(|p| p.id.clone()),
        }
    }

    /// Task of the selected row: the task itself, or a subtask's parent
    pub fn selected_task_id(&self) -> Option<String> {
        match self.selected_row()?.kind {
            RowKind::Item(ItemRef::Task(id)) => Some(id),
            RowKind::Item(ItemRef::Subtask(id)) => self.data.subtask(&id).map(|s| s.task_id.clone()),
            RowKind::Project(_) => None,
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        let flat_rows = self.rows();
        if self.selected_index + 1 < flat_rows.len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Tasks => Focus::Calendar,
            Focus::Calendar => Focus::Tasks,
        };
    }

    // Timer

    /// Start, pause or resume the timer on the selected item.
    /// Starting while another item runs stops and logs that one first.
    pub fn toggle_timer(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        let at = self.now();
        let action = match TimerState::of(self.data.active_timer.as_ref()) {
            TimerState::Running { item: current, .. } if *current == item => Action::PauseTimer { at },
            TimerState::Paused { item: current, .. } if *current == item => Action::ResumeTimer { at },
            _ => Action::StartTimer { item, at },
        };
        self.dispatch(action);
    }

    /// Stop the timer and log the session
    pub fn stop_timer(&mut self) {
        let logs_before = self.data.activity_logs.len();
        if self.dispatch(Action::StopTimer { end_time: self.now() }) {
            if let Some(log) = self.data.activity_logs.get(logs_before) {
                let details = item_details(&self.data, &log.item);
                self.status = Some(format!(
                    "Logged {} on {}",
                    crate::domain::time::format_duration(log.duration()),
                    details.title
                ));
            }
        }
    }

    // Calendar window

    pub fn visible_days(&self) -> Vec<NaiveDate> {
        calendar::visible_days(self.metadata.view_mode, self.anchor)
    }

    pub fn day_filter(&self) -> DayFilter {
        DayFilter::hiding(&self.data, &self.metadata.hidden_projects)
    }

    /// Range the reports view aggregates over
    pub fn report_range(&self) -> DateRange {
        let days = self.visible_days();
        match (days.first(), days.last()) {
            (Some(&from), Some(&to)) => DateRange::between(from, to),
            _ => DateRange::all(),
        }
    }

    fn today_column(&self) -> usize {
        let today = self.today();
        self.visible_days().iter().position(|d| *d == today).unwrap_or(0)
    }

    pub fn navigate(&mut self, step: Step) {
        self.anchor = calendar::navigate(self.metadata.view_mode, self.anchor, step, self.today());
        self.cursor.day = if step == Step::Today {
            self.today_column()
        } else {
            self.cursor.day.min(self.visible_days().len().saturating_sub(1))
        };
        self.hover_cursor();
    }

    pub fn cycle_view_mode(&mut self) {
        self.metadata.view_mode = self.metadata.view_mode.next();
        self.meta_needs_save = true;
        self.cursor.day = self.cursor.day.min(self.visible_days().len().saturating_sub(1));
    }

    pub fn cycle_pane_visibility(&mut self) {
        self.metadata.pane_visibility = self.metadata.pane_visibility.next();
        self.meta_needs_save = true;
        if let Some(pane) = self.metadata.pane_visibility.forced() {
            self.cursor.pane = pane;
        }
        self.hover_cursor();
    }

    /// Hide or show the selected project's blocks on the calendar
    pub fn toggle_selected_project_visibility(&mut self) {
        let Some(project_id) = self.selected_project_id() else {
            return;
        };
        self.metadata.toggle_project(&project_id);
        self.meta_needs_save = true;
    }

    pub fn toggle_reports(&mut self) {
        self.show_reports = !self.show_reports;
    }

    // Calendar cursor

    /// Drop target under the keyboard cursor
    pub fn cursor_target(&self) -> Option<DropTarget> {
        let days = self.visible_days();
        let date = *days.get(self.cursor.day.min(days.len().saturating_sub(1)))?;
        let pane = self.metadata.pane_visibility.forced().unwrap_or(self.cursor.pane);
        Some(DropTarget {
            date,
            pane,
            offset: calendar::row_timeline().offset_of(self.cursor.minute),
        })
    }

    pub fn move_cursor_time(&mut self, rows: i32) {
        let max = (MINUTES_IN_DAY - ROW_MINUTES) as i64;
        let minute = self.cursor.minute as i64 + rows as i64 * ROW_MINUTES as i64;
        self.cursor.minute = minute.clamp(0, max) as u32;
        self.scroll_to_cursor();
        self.hover_cursor();
    }

    /// Step left or right. With both panes shown this walks
    /// planned, actual, next day planned, and so on.
    pub fn move_cursor_column(&mut self, delta: i32) {
        let days = self.visible_days().len() as i32;
        if self.metadata.pane_visibility.forced().is_some() {
            self.cursor.day = (self.cursor.day as i32 + delta).clamp(0, days - 1) as usize;
        } else {
            let pane_index = match self.cursor.pane {
                Pane::Planned => 0,
                Pane::Actual => 1,
            };
            let slot = (self.cursor.day as i32 * 2 + pane_index + delta).clamp(0, days * 2 - 1);
            self.cursor.day = (slot / 2) as usize;
            self.cursor.pane = if slot % 2 == 0 { Pane::Planned } else { Pane::Actual };
        }
        self.hover_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        let row = (self.cursor.minute / ROW_MINUTES) as u16;
        let height = self.calendar_geometry.as_ref().map(|g| g.height).unwrap_or(1).max(1);
        if row < self.calendar_scroll {
            self.calendar_scroll = row;
        } else if row >= self.calendar_scroll + height {
            self.calendar_scroll = row + 1 - height;
        }
    }

    pub fn scroll_calendar(&mut self, rows: i32) {
        let scroll = (self.calendar_scroll as i32 + rows).clamp(0, DAY_ROWS as i32 - 1);
        self.calendar_scroll = scroll as u16;
    }

    /// Topmost visible block under a target, with the pane it lives in
    pub fn block_at(&self, target: &DropTarget) -> Option<(Pane, TimeBlock)> {
        let minute = calendar::row_timeline().minute_at(target.offset.floor());
        let blocks = match target.pane {
            Pane::Planned => &self.data.scheduled_blocks,
            Pane::Actual => &self.data.activity_logs,
        };
        let filter = self.day_filter();
        blocks
            .iter()
            .filter(|b| {
                b.date == target.date
                    && placement::overlaps(b.start, b.end, minute, minute + ROW_MINUTES)
                    && filter.shows(&self.data, &b.item)
            })
            .last()
            .map(|b| (target.pane, b.clone()))
    }

    pub fn block_at_cursor(&self) -> Option<(Pane, TimeBlock)> {
        self.cursor_target().and_then(|target| self.block_at(&target))
    }

    // Placement

    fn placing_allowed(&mut self) -> bool {
        if self.metadata.view_mode == ViewMode::Agenda {
            self.status = Some("Switch to a day or week view to place items".to_string());
            return false;
        }
        true
    }

    fn begin_drag(&mut self, payload: DragPayload) -> bool {
        match Gesture::begin_drag(&payload) {
            Ok(gesture) => {
                self.dispatch(Action::DragStart(payload));
                self.gesture = Some(gesture);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not start drag");
                false
            }
        }
    }

    /// Pick up the selected task or subtask and place it with the cursor
    pub fn begin_placing_selected(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        if !self.placing_allowed() {
            return;
        }
        let duration = drag_duration(&self.data, &item, self.settings.drag_minutes());
        self.cursor.pane = Pane::Planned;
        if self.begin_drag(DragPayload::new_item(item.kind(), item.id(), duration)) {
            self.ui_mode = UiMode::Placing;
            self.focus = Focus::Calendar;
            self.hover_cursor();
        }
    }

    /// Pick up the block under the cursor to move it
    pub fn begin_moving_at_cursor(&mut self) {
        let Some((pane, block)) = self.block_at_cursor() else {
            return;
        };
        if !self.placing_allowed() {
            return;
        }
        if self.begin_drag(DragPayload::existing_block(pane, &block.id, block.duration())) {
            self.ui_mode = UiMode::Placing;
            self.hover_cursor();
        }
    }

    fn hover(&mut self, target: Option<DropTarget>) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        if let Some(action) = gesture.pointer_move(&self.data, target, calendar::row_timeline()) {
            self.dispatch(action);
        }
    }

    fn hover_cursor(&mut self) {
        if self.ui_mode == UiMode::Placing {
            let target = self.cursor_target();
            self.hover(target);
        }
    }

    /// Drop at the cursor
    pub fn finish_placing(&mut self) {
        let target = self.cursor_target();
        self.finish_gesture(target);
    }

    pub fn cancel_placing(&mut self) {
        self.finish_gesture(None);
    }

    /// End the current gesture at `target` (`None` cancels a drag)
    pub fn finish_gesture(&mut self, target: Option<DropTarget>) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        let was_drag = matches!(gesture, Gesture::Drag(_));
        let end = gesture.end(&self.data, target, calendar::row_timeline());
        if was_drag {
            self.dispatch(Action::DragEnd);
        }
        if self.ui_mode == UiMode::Placing {
            self.ui_mode = UiMode::Normal;
        }

        match end {
            GestureEnd::Cancelled => {}
            GestureEnd::ResizeDone => tracing::info!("block resized"),
            GestureEnd::ResizeReverted(restore) => {
                tracing::info!("resize cancelled");
                self.dispatch(restore);
            }
            GestureEnd::Drop(plan) => self.apply_plan(plan),
        }
    }

    fn apply_plan(&mut self, plan: DropPlan) {
        match plan {
            DropPlan::Rejected(reason) => {
                tracing::debug!(%reason, "drop rejected");
                self.status = Some(reason.to_string());
            }
            DropPlan::Commit(actions) => {
                self.dispatch_all(actions);
            }
            DropPlan::NeedsConfirmation { conflicts, actions } => {
                self.pending = Some(PendingConfirm {
                    message: placement::overwrite_message(conflicts.len()),
                    actions,
                });
                self.ui_mode = UiMode::ConfirmOverwrite;
            }
        }
    }

    // Confirmation

    pub fn confirm_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.dispatch_all(pending.actions);
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn decline_pending(&mut self) {
        if self.pending.take().is_some() && self.ui_mode == UiMode::ConfirmOverwrite {
            self.status = Some(placement::RejectReason::Declined.to_string());
        }
        self.ui_mode = UiMode::Normal;
    }

    /// Ask before deleting the selected project, task or subtask
    pub fn request_delete_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let (message, action) = match row.kind {
            RowKind::Project(project_id) => {
                let name = self.data.project(&project_id).map(|p| p.name.clone()).unwrap_or_default();
                (
                    format!(
                        "Delete the project \"{}\" and all its tasks? This cannot be undone.",
                        name
                    ),
                    Action::DeleteProject { project_id },
                )
            }
            RowKind::Item(item) => {
                let title = item_details(&self.data, &item).title.to_string();
                match item {
                    ItemRef::Task(task_id) => (
                        format!("Delete \"{}\" and all its subtasks? This cannot be undone.", title),
                        Action::DeleteTask { task_id },
                    ),
                    ItemRef::Subtask(subtask_id) => (
                        format!("Delete \"{}\"?", title),
                        Action::DeleteSubtask { subtask_id },
                    ),
                }
            }
        };
        self.pending = Some(PendingConfirm {
            message,
            actions: vec![action],
        });
        self.ui_mode = UiMode::ConfirmDelete;
    }

    // Planned block editor

    pub fn open_block_editor(&mut self, block_id: &str) {
        if self.data.scheduled_block(block_id).is_some() {
            self.editing_block = Some(block_id.to_string());
            self.ui_mode = UiMode::EditPlanned;
        }
    }

    /// Open the editor for the planned block under the cursor
    pub fn edit_block_at_cursor(&mut self) {
        if let Some((Pane::Planned, block)) = self.block_at_cursor() {
            self.open_block_editor(&block.id);
        }
    }

    pub fn editing_block(&self) -> Option<&TimeBlock> {
        self.editing_block.as_deref().and_then(|id| self.data.scheduled_block(id))
    }

    pub fn close_block_editor(&mut self) {
        self.editing_block = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Copy the block into the slot right after it
    pub fn duplicate_editing_block(&mut self) {
        let Some(block) = self.editing_block().cloned() else {
            return;
        };
        match calendar::duplicate_block(&block, new_id()) {
            Some(copy) => {
                self.dispatch(Action::AddScheduledBlock(copy));
                self.close_block_editor();
            }
            None => {
                self.status = Some("Cannot duplicate: it would extend past midnight".to_string());
            }
        }
    }

    /// Nudge one edge by whole grid rows
    pub fn resize_editing_block(&mut self, edge: ResizeEdge, rows: i32) {
        let Some(block) = self.editing_block().cloned() else {
            return;
        };
        let current = match edge {
            ResizeEdge::Top => block.start,
            ResizeEdge::Bottom => block.end,
        };
        let minute = (current as i64 + rows as i64 * ROW_MINUTES as i64).clamp(0, MINUTES_IN_DAY as i64);
        if let Some(action) = ResizeSession::new(&block, edge).update(&self.data, minute as u32) {
            self.dispatch(action);
        }
    }

    /// Leave the editor and pick the block up with the cursor
    pub fn move_editing_block(&mut self) {
        let Some(block) = self.editing_block().cloned() else {
            return;
        };
        self.close_block_editor();
        if let Some(day) = self.visible_days().iter().position(|d| *d == block.date) {
            self.cursor.day = day;
        }
        self.cursor.pane = Pane::Planned;
        self.cursor.minute = block.start.min(MINUTES_IN_DAY - ROW_MINUTES);
        self.focus = Focus::Calendar;
        self.scroll_to_cursor();
        self.begin_moving_at_cursor();
    }

    pub fn request_delete_editing_block(&mut self) {
        let Some(id) = self.editing_block.take() else {
            return;
        };
        self.pending = Some(PendingConfirm {
            message: "Are you sure you want to delete this planned event?".to_string(),
            actions: vec![Action::DeleteScheduledBlock { id }],
        });
        self.ui_mode = UiMode::ConfirmDelete;
    }

    // Mouse

    fn target_at(&self, x: u16, y: u16) -> Option<DropTarget> {
        self.calendar_geometry.as_ref()?.target_at(x, y)
    }

    /// Target for the current gesture. Bottom-edge resizes follow the
    /// lower border of the row under the pointer.
    fn gesture_target(&self, x: u16, y: u16) -> Option<DropTarget> {
        let mut target = self.target_at(x, y)?;
        if let Some(Gesture::Resize(session)) = &self.gesture {
            if session.edge == ResizeEdge::Bottom {
                target.offset += 1.0;
            }
        }
        Some(target)
    }

    pub fn mouse_down(&mut self, x: u16, y: u16) {
        if self.ui_mode != UiMode::Normal || self.gesture.is_some() {
            return;
        }
        self.press = None;

        if let Some(index) = self.task_list_geometry.as_ref().and_then(|g| g.row_at(x, y)) {
            if index >= self.rows().len() {
                return;
            }
            self.focus = Focus::Tasks;
            self.selected_index = index;
            let Some(item) = self.selected_item() else {
                return;
            };
            if self.metadata.view_mode == ViewMode::Agenda {
                return;
            }
            let duration = drag_duration(&self.data, &item, self.settings.drag_minutes());
            if self.begin_drag(DragPayload::new_item(item.kind(), item.id(), duration)) {
                self.press = Some(PointerPress { x, y, block: None });
            }
            return;
        }

        let Some(target) = self.target_at(x, y) else {
            return;
        };
        self.focus = Focus::Calendar;
        if let Some(day) = self.visible_days().iter().position(|d| *d == target.date) {
            self.cursor.day = day;
        }
        self.cursor.pane = target.pane;
        self.cursor.minute = (target.offset as u32 * ROW_MINUTES).min(MINUTES_IN_DAY - ROW_MINUTES);

        let Some((pane, block)) = self.block_at(&target) else {
            return;
        };
        let row = target.offset as u32;
        let first = block.start / ROW_MINUTES;
        let last = block.end.saturating_sub(1) / ROW_MINUTES;

        let started = if pane == Pane::Planned && last > first && row == last {
            self.gesture = Some(Gesture::begin_resize(&block, ResizeEdge::Bottom));
            true
        } else if pane == Pane::Planned && last >= first + 2 && row == first {
            self.gesture = Some(Gesture::begin_resize(&block, ResizeEdge::Top));
            true
        } else {
            self.begin_drag(DragPayload::existing_block(pane, &block.id, block.duration()))
        };
        if started {
            self.press = Some(PointerPress {
                x,
                y,
                block: Some((pane, block.id)),
            });
        }
    }

    pub fn mouse_drag(&mut self, x: u16, y: u16) {
        if self.gesture.is_none() {
            return;
        }
        let target = self.gesture_target(x, y);
        self.hover(target);
    }

    pub fn mouse_up(&mut self, x: u16, y: u16) {
        let press = self.press.take();
        if self.gesture.is_none() {
            return;
        }

        let clicked = press.as_ref().map(|p| p.x == x && p.y == y).unwrap_or(false);
        if clicked {
            // a click never changes the block, even if the pointer wandered
            self.finish_gesture(None);
            if let Some(PointerPress {
                block: Some((Pane::Planned, id)),
                ..
            }) = press
            {
                self.open_block_editor(&id);
            }
            return;
        }

        let target = self.gesture_target(x, y);
        self.finish_gesture(target);
    }

    // Input form

    fn open_form(&mut self, form: InputFormState) {
        self.input_form = Some(form);
        self.ui_mode = UiMode::InputForm;
    }

    pub fn start_add_project(&mut self) {
        self.open_form(InputFormState::new(FormTarget::NewProject));
    }

    /// New task in the selected row's project
    pub fn start_add_task(&mut self) {
        if let Some(project_id) = self.selected_project_id() {
            self.open_form(InputFormState::new(FormTarget::NewTask { project_id }));
        }
    }

    /// New subtask under the selected task
    pub fn start_add_subtask(&mut self) {
        if let Some(task_id) = self.selected_task_id() {
            self.open_form(InputFormState::new(FormTarget::NewSubtask { task_id }));
        }
    }

    /// Edit the selected row in place
    pub fn start_edit_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let form = match row.kind {
            RowKind::Project(project_id) => {
                let Some(project) = self.data.project(&project_id) else {
                    return;
                };
                InputFormState {
                    title: project.name.clone(),
                    color: project.color,
                    ..InputFormState::new(FormTarget::EditProject { project_id })
                }
            }
            RowKind::Item(ItemRef::Task(task_id)) => {
                let Some(task) = self.data.task(&task_id) else {
                    return;
                };
                InputFormState {
                    title: task.title.clone(),
                    estimate: task.est_duration.map(|m| m.to_string()).unwrap_or_default(),
                    ..InputFormState::new(FormTarget::EditTask { task_id })
                }
            }
            RowKind::Item(ItemRef::Subtask(subtask_id)) => {
                let Some(subtask) = self.data.subtask(&subtask_id) else {
                    return;
                };
                InputFormState {
                    title: subtask.title.clone(),
                    estimate: subtask.est_duration.map(|m| m.to_string()).unwrap_or_default(),
                    ..InputFormState::new(FormTarget::EditSubtask { subtask_id })
                }
            }
        };
        self.open_form(form);
    }

    /// Toggle between editing fields in input form (title -> estimate/color)
    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % 2;
        }
    }

    /// Add character to input form (current field)
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.title.push(c),
                1 if !form.target.is_project() && c.is_ascii_digit() => {
                    form.estimate.push(c);
                    if form.estimate.parse::<u32>().map_or(true, |m| m > MAX_ESTIMATE_MINUTES) {
                        form.estimate.pop();
                    }
                }
                _ => {}
            }
        }
    }

    /// Backspace in input form (current field)
    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => {
                    form.title.pop();
                }
                1 => {
                    form.estimate.pop();
                }
                _ => {}
            }
        }
    }

    /// Step through the palette on the color field
    pub fn input_form_cycle_color(&mut self, forward: bool) {
        if let Some(form) = &mut self.input_form {
            if !form.target.is_project() || form.editing_field != 1 {
                return;
            }
            let palette = ProjectColor::all();
            let pos = palette.iter().position(|c| *c == form.color).unwrap_or(0);
            let next = if forward {
                (pos + 1) % palette.len()
            } else {
                (pos + palette.len() - 1) % palette.len()
            };
            form.color = palette[next];
        }
    }

    /// Submit input form and create or update the entity
    pub fn submit_input_form(&mut self) {
        if let Some(form) = self.input_form.take() {
            let title = form.title.trim().to_string();
            if !title.is_empty() {
                if let Some(action) = self.form_action(&form, title) {
                    self.dispatch(action);
                }
            }
            self.ui_mode = UiMode::Normal;
        }
    }

    fn form_action(&self, form: &InputFormState, title: String) -> Option<Action> {
        let est_duration = form.estimate_minutes();
        let action = match &form.target {
            FormTarget::NewProject => Action::AddProject(Project {
                id: new_id(),
                name: title,
                color: form.color,
            }),
            FormTarget::NewTask { project_id } => Action::AddTask {
                task: Task {
                    id: new_id(),
                    project_id: project_id.clone(),
                    title,
                    est_duration,
                },
                subtasks: Vec::new(),
            },
            FormTarget::NewSubtask { task_id } => Action::AddSubtask(Subtask {
                id: new_id(),
                task_id: task_id.clone(),
                title,
                est_duration,
            }),
            FormTarget::EditProject { project_id } => Action::UpdateProject(Project {
                name: title,
                color: form.color,
                ..self.data.project(project_id)?.clone()
            }),
            FormTarget::EditTask { task_id } => Action::UpdateTask(Task {
                title,
                est_duration,
                ..self.data.task(task_id)?.clone()
            }),
            FormTarget::EditSubtask { subtask_id } => Action::UpdateSubtask(Subtask {
                title,
                est_duration,
                ..self.data.subtask(subtask_id)?.clone()
            }),
        };
        Some(action)
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // Export

    /// Write every activity log as CSV into the data directory
    pub fn export_csv(&mut self) -> Result<Option<PathBuf>> {
        let Some(csv) = report::to_csv(&self.data)? else {
            self.status = Some("No activity to export".to_string());
            return Ok(None);
        };
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let path = dir.join(report::default_filename(self.today()));
        persistence::atomic_write(&path, &csv)?;
        tracing::info!(path = %path.display(), "activity exported");
        self.status = Some(format!("Exported {}", path.display()));
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::FixedClock;
    use crate::domain::{ActiveTimer, PaneVisibility};
    use crate::persistence::{MemoryStore, APP_STATE_KEY};
    use crate::ui::calendar_pane::DayColumn;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    const WORKOUT_ROW: usize = 6;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn nine_am() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    fn create_test_app() -> AppState {
        AppState::new(
            Box::new(MemoryStore::default()),
            Box::new(FixedClock::at(nine_am())),
            Settings::default(),
            None,
        )
    }

    /// One day column at x 10..50, grid rows starting at y 2
    fn geometry(scroll: u16) -> CalendarGeometry {
        CalendarGeometry {
            columns: vec![DayColumn {
                date: day(),
                x: 10,
                width: 40,
            }],
            top: 2,
            height: 40,
            scroll,
            visibility: PaneVisibility::Both,
        }
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert_eq!(app.data.projects.len(), 4);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.anchor, day());
        assert_eq!(app.cursor.minute, 540);
        assert!(!app.needs_save);
    }

    #[test]
    fn test_move_selection() {
        let mut app = create_test_app();

        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        app.move_selection_up();
        assert_eq!(app.selected_index, 0);

        // Can't go below 0
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_save_writes_store_once() {
        let mut app = create_test_app();
        app.selected_index = WORKOUT_ROW;
        app.toggle_timer();
        assert!(app.needs_save);

        app.save().unwrap();
        assert!(!app.needs_save);
        let stored = app.store.get(APP_STATE_KEY).unwrap().unwrap();
        let loaded: AppData = serde_json::from_str(&stored).unwrap();
        assert_eq!(loaded.active_timer, app.data.active_timer);
    }

    #[test]
    fn test_timer_toggle_cycle_and_stop() {
        let mut app = create_test_app();
        app.selected_index = WORKOUT_ROW;

        app.toggle_timer();
        assert!(matches!(
            TimerState::of(app.data.active_timer.as_ref()),
            TimerState::Running { .. }
        ));

        app.toggle_timer();
        assert!(matches!(
            TimerState::of(app.data.active_timer.as_ref()),
            TimerState::Paused { .. }
        ));

        app.toggle_timer();
        app.stop_timer();
        assert_eq!(app.data.active_timer, None);
        assert_eq!(app.data.activity_logs.len(), 2);
        assert!(app.status.as_deref().unwrap_or_default().contains("Workout"));
    }

    #[test]
    fn test_starting_other_item_commits_running_session() {
        let mut app = create_test_app();
        app.data.active_timer = Some(ActiveTimer {
            item: ItemRef::Task("t1".into()),
            start_time: nine_am() - chrono::Duration::minutes(30),
            accumulated_ms: 0,
            is_paused: false,
        });
        app.selected_index = WORKOUT_ROW;
        app.toggle_timer();

        let timer = app.data.active_timer.as_ref().unwrap();
        assert_eq!(timer.item, ItemRef::Task("t3".into()));
        let log = app.data.activity_logs.last().unwrap();
        assert_eq!(log.item, ItemRef::Task("t1".into()));
        assert_eq!((log.start, log.end), (510, 540));
    }

    #[test]
    fn test_stop_without_timer_is_noop() {
        let mut app = create_test_app();
        app.stop_timer();
        assert!(!app.needs_save);
        assert_eq!(app.status, None);
    }

    #[test]
    fn test_keyboard_placement_commits_without_conflict() {
        let mut app = create_test_app();
        app.selected_index = WORKOUT_ROW;
        app.begin_placing_selected();
        assert_eq!(app.ui_mode, UiMode::Placing);
        assert!(app.data.dragged_item.is_some());

        // 9:00 -> 15:00
        app.move_cursor_time(24);
        app.finish_placing();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.data.dragged_item, None);
        let placed = app.data.scheduled_blocks.last().unwrap();
        assert_eq!((placed.start, placed.end), (900, 960));
        assert_eq!(placed.item, ItemRef::Task("t3".into()));
    }

    #[test]
    fn test_overlapping_placement_asks_first() {
        let mut app = create_test_app();
        app.selected_index = WORKOUT_ROW;
        app.begin_placing_selected();
        // 10:00, on top of the slides block
        app.move_cursor_time(4);
        app.finish_placing();

        assert_eq!(app.ui_mode, UiMode::ConfirmOverwrite);
        assert_eq!(app.data.scheduled_blocks.len(), 2);

        app.confirm_pending();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.data.scheduled_block("sb2").is_none());
        assert_eq!(app.data.scheduled_blocks.len(), 2);
    }

    #[test]
    fn test_declined_overwrite_changes_nothing() {
        let mut app = create_test_app();
        app.selected_index = WORKOUT_ROW;
        app.begin_placing_selected();
        app.move_cursor_time(4);
        app.finish_placing();
        let before = app.data.clone();

        app.decline_pending();
        assert_eq!(app.data, before);
        assert_eq!(app.status.as_deref(), Some("overwrite declined"));
    }

    #[test]
    fn test_new_item_on_actual_pane_is_rejected() {
        let mut app = create_test_app();
        app.selected_index = WORKOUT_ROW;
        app.begin_placing_selected();
        app.move_cursor_column(1);
        assert_eq!(app.cursor.pane, Pane::Actual);
        app.finish_placing();

        assert_eq!(app.data.scheduled_blocks.len(), 2);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_cancel_placing_clears_drag() {
        let mut app = create_test_app();
        app.selected_index = WORKOUT_ROW;
        app.begin_placing_selected();
        app.cancel_placing();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.data.dragged_item, None);
        assert!(app.gesture.is_none());
    }

    #[test]
    fn test_placing_refused_in_agenda() {
        let mut app = create_test_app();
        app.metadata.view_mode = ViewMode::Agenda;
        app.selected_index = WORKOUT_ROW;
        app.begin_placing_selected();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.gesture.is_none());
    }

    #[test]
    fn test_editor_duplicate_and_delete() {
        let mut app = create_test_app();
        app.open_block_editor("sb1");
        assert_eq!(app.ui_mode, UiMode::EditPlanned);

        app.duplicate_editing_block();
        let copy = app.data.scheduled_blocks.last().unwrap();
        assert_eq!((copy.start, copy.end), (480, 540));
        assert_eq!(app.ui_mode, UiMode::Normal);

        app.open_block_editor("sb1");
        app.request_delete_editing_block();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        app.confirm_pending();
        assert!(app.data.scheduled_block("sb1").is_none());
    }

    #[test]
    fn test_duplicate_past_midnight_is_refused() {
        let mut app = create_test_app();
        app.data.scheduled_blocks[0].start = 1320;
        app.data.scheduled_blocks[0].end = 1440;
        app.open_block_editor("sb1");
        app.duplicate_editing_block();

        assert_eq!(app.data.scheduled_blocks.len(), 2);
        assert_eq!(app.ui_mode, UiMode::EditPlanned);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_editor_resize_keeps_minimum() {
        let mut app = create_test_app();
        app.open_block_editor("sb1");
        app.resize_editing_block(ResizeEdge::Bottom, 2);
        assert_eq!(app.data.scheduled_block("sb1").unwrap().end, 510);

        app.resize_editing_block(ResizeEdge::Bottom, -10);
        let block = app.data.scheduled_block("sb1").unwrap();
        assert_eq!((block.start, block.end), (420, 435));
    }

    #[test]
    fn test_delete_project_asks_then_cascades() {
        let mut app = create_test_app();
        app.selected_index = 5;
        app.request_delete_selected();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        assert!(app.pending.as_ref().unwrap().message.contains("Health"));

        app.confirm_pending();
        assert!(app.data.project("p2").is_none());
        assert!(app.data.task("t3").is_none());
        assert!(app.data.scheduled_block("sb1").is_none());
    }

    #[test]
    fn test_input_form_adds_task_to_selected_project() {
        let mut app = create_test_app();
        app.selected_index = WORKOUT_ROW;
        app.start_add_task();
        assert_eq!(app.ui_mode, UiMode::InputForm);

        for c in "Stretch".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_toggle_field();
        for c in "2x0".chars() {
            app.input_form_add_char(c);
        }
        app.submit_input_form();

        let task = app.data.tasks.last().unwrap();
        assert_eq!(task.title, "Stretch");
        assert_eq!(task.project_id, "p2");
        assert_eq!(task.est_duration, Some(20));
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_input_form_estimate_stops_at_one_week() {
        let mut app = create_test_app();
        app.selected_index = WORKOUT_ROW;
        app.start_add_task();
        app.input_form_add_char('X');
        app.input_form_toggle_field();
        for c in "99999999999".chars() {
            app.input_form_add_char(c);
        }
        assert_eq!(app.input_form.as_ref().unwrap().estimate, "9999");

        app.input_form.as_mut().unwrap().estimate = "4294967295".to_string();
        assert_eq!(app.input_form.as_ref().unwrap().estimate_minutes(), Some(MAX_ESTIMATE_MINUTES));
        app.submit_input_form();
        assert_eq!(app.data.tasks.last().unwrap().est_duration, Some(MAX_ESTIMATE_MINUTES));
    }

    #[test]
    fn test_input_form_blank_title_creates_nothing() {
        let mut app = create_test_app();
        app.start_add_project();
        app.input_form_add_char(' ');
        app.submit_input_form();
        assert_eq!(app.data.projects.len(), 4);
        assert!(!app.needs_save);
    }

    #[test]
    fn test_edit_project_name_and_color() {
        let mut app = create_test_app();
        app.start_edit_selected();
        app.input_form_backspace();
        app.input_form_toggle_field();
        app.input_form_cycle_color(true);
        app.submit_input_form();

        let project = app.data.project("p1").unwrap();
        assert_eq!(project.name, "Busines");
        assert_eq!(project.color, ProjectColor::Green);
    }

    #[test]
    fn test_hidden_project_blocks_are_not_hit() {
        let mut app = create_test_app();
        let target = DropTarget {
            date: day(),
            pane: Pane::Planned,
            offset: 28.0,
        };
        assert_eq!(app.block_at(&target).map(|(_, b)| b.id), Some("sb1".to_string()));

        app.selected_index = 5;
        app.toggle_selected_project_visibility();
        assert!(app.meta_needs_save);
        assert_eq!(app.block_at(&target), None);
    }

    #[test]
    fn test_navigation_and_view_cycle() {
        let mut app = create_test_app();
        app.navigate(Step::Next);
        assert_eq!(app.anchor, day() + chrono::Duration::days(1));
        app.navigate(Step::Today);
        assert_eq!(app.anchor, day());

        app.cycle_view_mode();
        assert_eq!(app.metadata.view_mode, ViewMode::ThreeDay);
        assert_eq!(app.visible_days().len(), 3);
        app.cycle_pane_visibility();
        assert_eq!(app.metadata.pane_visibility, PaneVisibility::Planned);
    }

    #[test]
    fn test_mouse_drag_moves_planned_block() {
        let mut app = create_test_app();
        app.calendar_geometry = Some(geometry(20));

        // sb1 spans rows 28..31; row 29 is its middle, y = 2 + (29 - 20)
        app.mouse_down(15, 11);
        assert!(matches!(app.gesture, Some(Gesture::Drag(_))));
        app.mouse_drag(15, 22);
        app.mouse_up(15, 22);

        // row 40 -> 10:00, which overlaps the slides block
        assert_eq!(app.ui_mode, UiMode::ConfirmOverwrite);
        app.confirm_pending();
        let moved = app.data.scheduled_block("sb1").unwrap();
        assert_eq!((moved.start, moved.end), (600, 660));
        assert_eq!(app.data.dragged_item, None);
    }

    #[test]
    fn test_mouse_click_opens_editor() {
        let mut app = create_test_app();
        app.calendar_geometry = Some(geometry(20));
        app.mouse_down(15, 11);
        app.mouse_up(15, 11);
        assert_eq!(app.ui_mode, UiMode::EditPlanned);
        assert_eq!(app.editing_block.as_deref(), Some("sb1"));
        assert_eq!(app.data.dragged_item, None);
    }

    #[test]
    fn test_mouse_bottom_edge_resizes() {
        let mut app = create_test_app();
        app.calendar_geometry = Some(geometry(20));

        // last row of sb1 is row 31
        app.mouse_down(15, 13);
        assert!(matches!(app.gesture, Some(Gesture::Resize(_))));
        // drag to row 33: end follows the row's lower border, 8:30
        app.mouse_drag(15, 15);
        assert_eq!(app.data.scheduled_block("sb1").unwrap().end, 510);
        app.mouse_up(15, 15);
        assert!(app.gesture.is_none());
        assert!(app.needs_save);
    }

    #[test]
    fn test_mouse_resize_released_off_grid_is_undone() {
        let mut app = create_test_app();
        app.calendar_geometry = Some(geometry(20));

        app.mouse_down(15, 13);
        app.mouse_drag(15, 15);
        assert_eq!(app.data.scheduled_block("sb1").unwrap().end, 510);

        // released over the gutter, below the grid
        app.mouse_up(100, 60);
        let block = app.data.scheduled_block("sb1").unwrap();
        assert_eq!((block.start, block.end), (420, 480));
        assert!(app.gesture.is_none());
    }

    #[test]
    fn test_mouse_resize_back_to_press_cell_restores_window() {
        let mut app = create_test_app();
        app.calendar_geometry = Some(geometry(20));
        if let Some(block) = app.data.scheduled_blocks.iter_mut().find(|b| b.id == "sb1") {
            block.end = 485;
        }

        // last row of sb1 is now row 32
        app.mouse_down(15, 14);
        assert!(matches!(app.gesture, Some(Gesture::Resize(_))));
        app.mouse_drag(15, 16);
        assert_eq!(app.data.scheduled_block("sb1").unwrap().end, 525);
        // coming back lands on the grid line, not the original odd minute
        app.mouse_drag(15, 14);
        assert_eq!(app.data.scheduled_block("sb1").unwrap().end, 495);

        app.mouse_up(15, 14);
        assert_eq!(app.data.scheduled_block("sb1").unwrap().end, 485);
        assert!(app.gesture.is_none());
        assert_eq!(app.ui_mode, UiMode::EditPlanned);
    }

    #[test]
    fn test_actual_log_cannot_cross_panes() {
        let mut app = create_test_app();
        app.calendar_geometry = Some(geometry(20));

        // al1 on the actual half, row 29
        app.mouse_down(40, 11);
        app.mouse_up(15, 14);
        assert_eq!(app.data.activity_log("al1").unwrap().start, 425);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_export_without_activity() {
        let mut app = create_test_app();
        app.data.activity_logs.clear();
        assert_eq!(app.export_csv().unwrap(), None);
        assert_eq!(app.status.as_deref(), Some("No activity to export"));
    }

    #[test]
    fn test_export_writes_into_data_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = AppState::new(
            Box::new(MemoryStore::default()),
            Box::new(FixedClock::at(nine_am())),
            Settings::default(),
            Some(temp_dir.path().to_path_buf()),
        );
        let path = app.export_csv().unwrap().unwrap();
        assert_eq!(path, temp_dir.path().join("lifeos_activity_export_2024-03-04.csv"));
        assert!(path.exists());
    }

    #[test]
    fn test_metadata_saved_to_data_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = AppState::new(
            Box::new(MemoryStore::default()),
            Box::new(FixedClock::at(nine_am())),
            Settings::default(),
            Some(temp_dir.path().to_path_buf()),
        );
        app.cycle_view_mode();
        app.save().unwrap();

        let saved = load_metadata(persistence::meta_file(temp_dir.path())).unwrap().unwrap();
        assert_eq!(saved.view_mode, ViewMode::ThreeDay);
    }
}
