use super::action::Action;
use crate::domain::{ActivityLog, AppData, ItemRef, ScheduledBlock, TimeBlock};
use crate::timer::{self, TimerStep};
use std::collections::HashSet;

/// Outcome of applying an action
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The action had no effect; the caller keeps its current state
    Unchanged,
    Changed(AppData),
}

impl Transition {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    /// The state after the transition, given the state before it
    pub fn resolve(self, before: AppData) -> AppData {
        match self {
            Self::Unchanged => before,
            Self::Changed(after) => after,
        }
    }
}

/// Compute the next state. Never mutates `state`.
pub fn apply(state: &AppData, action: &Action) -> Transition {
    let transition = reduce(state, action);
    if !transition.is_changed() {
        tracing::debug!(action = action.name(), "action had no effect");
    }
    transition
}

/// Apply a batch in order. Unchanged only if every action was a no-op.
pub fn apply_all(state: &AppData, actions: &[Action]) -> Transition {
    let mut current: Option<AppData> = None;
    for action in actions {
        let base = current.as_ref().unwrap_or(state);
        if let Transition::Changed(next) = apply(base, action) {
            current = Some(next);
        }
    }
    match current {
        Some(next) => Transition::Changed(next),
        None => Transition::Unchanged,
    }
}

fn reduce(state: &AppData, action: &Action) -> Transition {
    match action {
        Action::AddProject(project) => {
            if state.project(&project.id).is_some() {
                return Transition::Unchanged;
            }
            let mut next = state.clone();
            next.projects.push(project.clone());
            Transition::Changed(next)
        }
        Action::UpdateProject(project) => {
            let Some(pos) = state.projects.iter().position(|p| p.id == project.id) else {
                return Transition::Unchanged;
            };
            let mut next = state.clone();
            next.projects[pos] = project.clone();
            Transition::Changed(next)
        }
        Action::DeleteProject { project_id } => {
            if state.project(project_id).is_none() {
                return Transition::Unchanged;
            }
            let task_ids: HashSet<&str> = state.tasks_of(project_id).map(|t| t.id.as_str()).collect();
            let mut next = cascade(state, &task_ids, &HashSet::new());
            next.projects.retain(|p| &p.id != project_id);
            Transition::Changed(next)
        }

        Action::AddTask { task, subtasks } => {
            if state.task(&task.id).is_some()
                || state.project(&task.project_id).is_none()
                || subtasks.iter().any(|s| s.task_id != task.id || state.subtask(&s.id).is_some())
            {
                return Transition::Unchanged;
            }
            let mut next = state.clone();
            next.tasks.push(task.clone());
            next.subtasks.extend(subtasks.iter().cloned());
            Transition::Changed(next)
        }
        Action::UpdateTask(task) => {
            let Some(pos) = state.tasks.iter().position(|t| t.id == task.id) else {
                return Transition::Unchanged;
            };
            if state.project(&task.project_id).is_none() {
                return Transition::Unchanged;
            }
            let mut next = state.clone();
            next.tasks[pos] = task.clone();
            Transition::Changed(next)
        }
        Action::DeleteTask { task_id } => {
            if state.task(task_id).is_none() {
                return Transition::Unchanged;
            }
            let task_ids = HashSet::from([task_id.as_str()]);
            Transition::Changed(cascade(state, &task_ids, &HashSet::new()))
        }

        Action::AddSubtask(subtask) => {
            if state.subtask(&subtask.id).is_some() || state.task(&subtask.task_id).is_none() {
                return Transition::Unchanged;
            }
            let mut next = state.clone();
            next.subtasks.push(subtask.clone());
            Transition::Changed(next)
        }
        Action::UpdateSubtask(subtask) => {
            let Some(pos) = state.subtasks.iter().position(|s| s.id == subtask.id) else {
                return Transition::Unchanged;
            };
            if state.task(&subtask.task_id).is_none() {
                return Transition::Unchanged;
            }
            let mut next = state.clone();
            next.subtasks[pos] = subtask.clone();
            Transition::Changed(next)
        }
        Action::DeleteSubtask { subtask_id } => {
            if state.subtask(subtask_id).is_none() {
                return Transition::Unchanged;
            }
            let subtask_ids = HashSet::from([subtask_id.as_str()]);
            Transition::Changed(cascade(state, &HashSet::new(), &subtask_ids))
        }

        Action::AddScheduledBlock(block) => {
            if !insertable(state, block) || state.scheduled_block(&block.id).is_some() {
                return Transition::Unchanged;
            }
            let mut next = state.clone();
            next.scheduled_blocks.push(block.clone());
            Transition::Changed(next)
        }
        Action::UpdateScheduledBlock(block) => {
            match replace_block(&state.scheduled_blocks, state, block, TimeBlock::has_valid_range) {
                Some(blocks) => Transition::Changed(AppData {
                    scheduled_blocks: blocks,
                    ..state.clone()
                }),
                None => Transition::Unchanged,
            }
        }
        Action::DeleteScheduledBlock { id } => {
            if state.scheduled_block(id).is_none() {
                return Transition::Unchanged;
            }
            let mut next = state.clone();
            next.scheduled_blocks.retain(|b| &b.id != id);
            Transition::Changed(next)
        }

        Action::UpdateActivityLog(log) => match replace_block(
            &state.activity_logs,
            state,
            log,
            TimeBlock::has_valid_log_range,
        ) {
            Some(logs) => Transition::Changed(AppData {
                activity_logs: logs,
                ..state.clone()
            }),
            None => Transition::Unchanged,
        },

        Action::StartTimer { item, at } => {
            if !state.contains_item(item) {
                return Transition::Unchanged;
            }
            apply_timer_step(state, timer::start(state.active_timer.as_ref(), item.clone(), *at))
        }
        Action::PauseTimer { at } => match timer::pause(state.active_timer.as_ref(), *at) {
            Some(step) => apply_timer_step(state, step),
            None => Transition::Unchanged,
        },
        Action::ResumeTimer { at } => match timer::resume(state.active_timer.as_ref(), *at) {
            Some(step) => apply_timer_step(state, step),
            None => Transition::Unchanged,
        },
        Action::StopTimer { end_time } => match timer::stop(state.active_timer.as_ref(), *end_time) {
            Some(step) => apply_timer_step(state, step),
            None => Transition::Unchanged,
        },

        Action::SetState(data) => Transition::Changed(data.as_ref().clone()),

        Action::DragStart(payload) => Transition::Changed(AppData {
            dragged_item: Some(payload.clone()),
            ..state.clone()
        }),
        Action::DragEnd => {
            if state.dragged_item.is_none() {
                return Transition::Unchanged;
            }
            Transition::Changed(AppData {
                dragged_item: None,
                ..state.clone()
            })
        }
    }
}

/// A block may enter the store only with a valid range and a live item
fn insertable(state: &AppData, block: &TimeBlock) -> bool {
    block.has_valid_range() && state.contains_item(&block.item)
}

fn replace_block(
    blocks: &[TimeBlock],
    state: &AppData,
    block: &TimeBlock,
    valid_range: fn(&TimeBlock) -> bool,
) -> Option<Vec<TimeBlock>> {
    let pos = blocks.iter().position(|b| b.id == block.id)?;
    if !valid_range(block) || !state.contains_item(&block.item) {
        return None;
    }
    let mut next = blocks.to_vec();
    next[pos] = block.clone();
    Some(next)
}

fn apply_timer_step(state: &AppData, step: TimerStep) -> Transition {
    let mut next = state.clone();
    next.active_timer = step.timer;
    if let Some(log) = step.log {
        tracing::info!(item = %log.item, start = log.start, end = log.end, "activity logged");
        next.activity_logs.push(log);
    }
    Transition::Changed(next)
}

/// Remove the given tasks and subtasks plus everything that points at
/// them: subtasks of removed tasks, planned blocks, logs and the timer.
/// Builds the whole next state in one pass so no partial cascade exists.
fn cascade(state: &AppData, task_ids: &HashSet<&str>, subtask_ids: &HashSet<&str>) -> AppData {
    let removed_subtasks: HashSet<&str> = state
        .subtasks
        .iter()
        .filter(|s| task_ids.contains(s.task_id.as_str()) || subtask_ids.contains(s.id.as_str()))
        .map(|s| s.id.as_str())
        .collect();

    let is_removed = |item: &ItemRef| match item {
        ItemRef::Task(id) => task_ids.contains(id.as_str()),
        ItemRef::Subtask(id) => removed_subtasks.contains(id.as_str()),
    };

    let scheduled_blocks: Vec<ScheduledBlock> = state
        .scheduled_blocks
        .iter()
        .filter(|b| !is_removed(&b.item))
        .cloned()
        .collect();
    let activity_logs: Vec<ActivityLog> = state
        .activity_logs
        .iter()
        .filter(|l| !is_removed(&l.item))
        .cloned()
        .collect();
    let active_timer = state.active_timer.clone().filter(|t| !is_removed(&t.item));

    tracing::info!(
        tasks = task_ids.len(),
        subtasks = removed_subtasks.len(),
        blocks = state.scheduled_blocks.len() - scheduled_blocks.len(),
        logs = state.activity_logs.len() - activity_logs.len(),
        timer_cleared = state.active_timer.is_some() && active_timer.is_none(),
        "cascade delete"
    );

    AppData {
        projects: state.projects.clone(),
        tasks: state
            .tasks
            .iter()
            .filter(|t| !task_ids.contains(t.id.as_str()))
            .cloned()
            .collect(),
        subtasks: state
            .subtasks
            .iter()
            .filter(|s| !removed_subtasks.contains(s.id.as_str()))
            .cloned()
            .collect(),
        scheduled_blocks,
        activity_logs,
        active_timer,
        dragged_item: state.dragged_item.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActiveTimer, Project, ProjectColor, Subtask, Task};
    use crate::scheduling::{DragOrigin, DragPayload};
    use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            name: format!("Project {}", id),
            color: ProjectColor::Green,
        }
    }

    fn task(id: &str, project_id: &str) -> Task {
        Task {
            id: id.to_string(),
            project_id: project_id.to_string(),
            title: format!("Task {}", id),
            est_duration: Some(60),
        }
    }

    fn subtask(id: &str, task_id: &str) -> Subtask {
        Subtask {
            id: id.to_string(),
            task_id: task_id.to_string(),
            title: format!("Subtask {}", id),
            est_duration: Some(30),
        }
    }

    fn block(id: &str, item: ItemRef, start: u32, end: u32) -> TimeBlock {
        TimeBlock {
            id: id.to_string(),
            item,
            start,
            end,
            date: day(),
        }
    }

    /// Two projects; p1 has t1 (with s1, s2) and t2; p2 has t3
    fn fixture() -> AppData {
        AppData {
            projects: vec![project("p1"), project("p2")],
            tasks: vec![task("t1", "p1"), task("t2", "p1"), task("t3", "p2")],
            subtasks: vec![subtask("s1", "t1"), subtask("s2", "t1")],
            scheduled_blocks: vec![
                block("b1", ItemRef::Task("t1".into()), 420, 480),
                block("b2", ItemRef::Subtask("s2".into()), 600, 690),
                block("b3", ItemRef::Task("t2".into()), 700, 760),
                block("b4", ItemRef::Task("t3".into()), 800, 860),
            ],
            activity_logs: vec![block("l1", ItemRef::Subtask("s1".into()), 425, 490)],
            active_timer: None,
            dragged_item: None,
        }
    }

    fn changed(transition: Transition) -> AppData {
        match transition {
            Transition::Changed(data) => data,
            Transition::Unchanged => panic!("expected a state change"),
        }
    }

    /// Every block, log and timer points at a live item
    fn assert_no_dangling(data: &AppData) {
        for b in data.scheduled_blocks.iter().chain(data.activity_logs.iter()) {
            assert!(data.contains_item(&b.item), "dangling block {}", b.id);
        }
        if let Some(timer) = &data.active_timer {
            assert!(data.contains_item(&timer.item));
        }
        for s in &data.subtasks {
            assert!(data.task(&s.task_id).is_some(), "orphan subtask {}", s.id);
        }
    }

    #[test]
    fn test_delete_project_cascades_in_one_transition() {
        let state = fixture();
        let next = changed(apply(&state, &Action::DeleteProject { project_id: "p1".into() }));

        assert_eq!(next.projects, vec![project("p2")]);
        assert_eq!(next.tasks, vec![task("t3", "p2")]);
        assert!(next.subtasks.is_empty());
        let ids: Vec<&str> = next.scheduled_blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b4"]);
        assert!(next.activity_logs.is_empty());
        assert_no_dangling(&next);

        // input untouched
        assert_eq!(state, fixture());
    }

    #[test]
    fn test_delete_project_clears_timer_on_removed_item() {
        let mut state = fixture();
        state.active_timer = Some(ActiveTimer {
            item: ItemRef::Subtask("s2".into()),
            start_time: t0(),
            accumulated_ms: 0,
            is_paused: false,
        });
        let next = changed(apply(&state, &Action::DeleteProject { project_id: "p1".into() }));
        assert!(next.active_timer.is_none());
    }

    #[test]
    fn test_delete_task_cascades_to_subtasks_and_timer() {
        let mut state = fixture();
        state.active_timer = Some(ActiveTimer {
            item: ItemRef::Task("t1".into()),
            start_time: t0(),
            accumulated_ms: 0,
            is_paused: true,
        });
        let next = changed(apply(&state, &Action::DeleteTask { task_id: "t1".into() }));

        assert!(next.task("t1").is_none());
        assert!(next.subtasks.is_empty());
        assert!(next.scheduled_block("b1").is_none());
        assert!(next.scheduled_block("b2").is_none());
        assert!(next.scheduled_block("b3").is_some());
        assert!(next.activity_logs.is_empty());
        assert!(next.active_timer.is_none());
        assert_no_dangling(&next);
    }

    #[test]
    fn test_delete_subtask_only_touches_its_references() {
        let state = fixture();
        let next = changed(apply(&state, &Action::DeleteSubtask { subtask_id: "s2".into() }));
        assert!(next.subtask("s2").is_none());
        assert!(next.subtask("s1").is_some());
        assert!(next.scheduled_block("b2").is_none());
        assert_eq!(next.scheduled_blocks.len(), 3);
        assert_eq!(next.activity_logs.len(), 1);
    }

    #[test]
    fn test_delete_unknown_is_unchanged() {
        let state = fixture();
        assert_eq!(apply(&state, &Action::DeleteProject { project_id: "nope".into() }), Transition::Unchanged);
        assert_eq!(apply(&state, &Action::DeleteTask { task_id: "nope".into() }), Transition::Unchanged);
        assert_eq!(apply(&state, &Action::DeleteScheduledBlock { id: "nope".into() }), Transition::Unchanged);
    }

    #[test]
    fn test_apply_all_batches_in_order() {
        let state = fixture();
        let actions = vec![
            Action::DeleteScheduledBlock { id: "b1".into() },
            Action::DeleteScheduledBlock { id: "nope".into() },
            Action::AddScheduledBlock(block("b5", ItemRef::Task("t1".into()), 420, 450)),
        ];
        let next = changed(apply_all(&state, &actions));
        let ids: Vec<&str> = next.scheduled_blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b2", "b3", "b4", "b5"]);

        let noops = vec![Action::DeleteTask { task_id: "nope".into() }, Action::DragEnd];
        assert_eq!(apply_all(&state, &noops), Transition::Unchanged);
    }

    #[test]
    fn test_add_task_with_subtasks_is_atomic() {
        let state = fixture();
        let action = Action::AddTask {
            task: task("t9", "p2"),
            subtasks: vec![subtask("s9", "t9"), subtask("s10", "t9")],
        };
        let next = changed(apply(&state, &action));
        assert!(next.task("t9").is_some());
        assert_eq!(next.subtasks_of("t9").count(), 2);

        // a subtask pointing elsewhere rejects the whole action
        let bad = Action::AddTask {
            task: task("t10", "p2"),
            subtasks: vec![subtask("s11", "t10"), subtask("s12", "t1")],
        };
        assert_eq!(apply(&state, &bad), Transition::Unchanged);
    }

    #[test]
    fn test_add_block_requires_live_item_and_valid_range() {
        let state = fixture();
        let ghost = block("b9", ItemRef::Task("ghost".into()), 60, 120);
        assert_eq!(apply(&state, &Action::AddScheduledBlock(ghost)), Transition::Unchanged);

        let inverted = block("b9", ItemRef::Task("t1".into()), 120, 60);
        assert_eq!(apply(&state, &Action::AddScheduledBlock(inverted)), Transition::Unchanged);

        let late = block("b9", ItemRef::Task("t1".into()), 1410, 1470);
        assert_eq!(apply(&state, &Action::AddScheduledBlock(late)), Transition::Unchanged);

        let ok = block("b9", ItemRef::Task("t1".into()), 60, 120);
        let next = changed(apply(&state, &Action::AddScheduledBlock(ok)));
        assert_eq!(next.scheduled_blocks.len(), 5);
    }

    #[test]
    fn test_update_activity_log_repositions() {
        let state = fixture();
        let moved = state.activity_logs[0].moved_to(500, 565, day());
        let next = changed(apply(&state, &Action::UpdateActivityLog(moved.clone())));
        assert_eq!(next.activity_logs, vec![moved]);
    }

    #[test]
    fn test_zero_length_log_can_be_moved_but_not_inverted() {
        let mut state = fixture();
        state.activity_logs[0] = state.activity_logs[0].moved_to(425, 425, day());

        let moved = state.activity_logs[0].moved_to(600, 600, day());
        let next = changed(apply(&state, &Action::UpdateActivityLog(moved.clone())));
        assert_eq!(next.activity_logs, vec![moved]);

        let inverted = state.activity_logs[0].moved_to(600, 590, day());
        assert_eq!(apply(&state, &Action::UpdateActivityLog(inverted)), Transition::Unchanged);

        // planned blocks still need a positive span
        let flat = state.scheduled_blocks[0].moved_to(420, 420, day());
        assert_eq!(apply(&state, &Action::UpdateScheduledBlock(flat)), Transition::Unchanged);
    }

    #[test]
    fn test_timer_scenario_through_reducer() {
        let state = fixture();
        let item = ItemRef::Task("t2".into());
        let s = changed(apply(&state, &Action::StartTimer { item, at: t0() }));
        let s = changed(apply(&s, &Action::PauseTimer { at: t0() + Duration::minutes(10) }));
        assert_eq!(apply(&s, &Action::PauseTimer { at: t0() + Duration::minutes(12) }), Transition::Unchanged);
        let s = changed(apply(&s, &Action::ResumeTimer { at: t0() + Duration::minutes(15) }));
        assert_eq!(apply(&s, &Action::ResumeTimer { at: t0() + Duration::minutes(16) }), Transition::Unchanged);
        let s = changed(apply(&s, &Action::StopTimer { end_time: t0() + Duration::minutes(25) }));

        assert!(s.active_timer.is_none());
        let log = s.activity_logs.last().unwrap();
        assert_eq!(log.duration(), 20);
        assert_eq!(log.item, ItemRef::Task("t2".into()));
        assert_eq!(apply(&s, &Action::StopTimer { end_time: t0() }), Transition::Unchanged);
    }

    #[test]
    fn test_start_timer_on_missing_item_is_unchanged() {
        let state = fixture();
        let action = Action::StartTimer {
            item: ItemRef::Subtask("ghost".into()),
            at: t0(),
        };
        assert_eq!(apply(&state, &action), Transition::Unchanged);
    }

    #[test]
    fn test_drag_signals_round_trip() {
        let state = fixture();
        let payload = DragPayload {
            id: "t1".into(),
            duration: 60,
            origin: DragOrigin::TaskList,
            pane: None,
            item_type: Some(crate::domain::ItemKind::Task),
        };
        let dragging = changed(apply(&state, &Action::DragStart(payload.clone())));
        assert_eq!(dragging.dragged_item, Some(payload));
        let done = changed(apply(&dragging, &Action::DragEnd));
        assert!(done.dragged_item.is_none());
        assert_eq!(apply(&done, &Action::DragEnd), Transition::Unchanged);
    }

    #[test]
    fn test_set_state_replaces_everything() {
        let state = fixture();
        let next = changed(apply(&state, &Action::SetState(Box::new(AppData::default()))));
        assert_eq!(next, AppData::default());
    }

    #[test]
    fn test_random_add_delete_sequences_keep_references_live() {
        // Deterministic pseudo-random walk over add/delete actions
        let mut state = fixture();
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next_rand = move |n: u64| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed % n
        };

        for step in 0..400 {
            let task_ids: Vec<String> = state.tasks.iter().map(|t| t.id.clone()).collect();
            let subtask_ids: Vec<String> = state.subtasks.iter().map(|s| s.id.clone()).collect();
            let project_ids: Vec<String> = state.projects.iter().map(|p| p.id.clone()).collect();

            let action = match next_rand(8) {
                0 => Action::AddProject(project(&format!("p{}", step))),
                1 if !project_ids.is_empty() => {
                    let p = &project_ids[next_rand(project_ids.len() as u64) as usize];
                    let id = format!("t{}", step);
                    Action::AddTask {
                        task: task(&id, p),
                        subtasks: vec![subtask(&format!("s{}", step), &id)],
                    }
                }
                2 if !task_ids.is_empty() => {
                    let t = &task_ids[next_rand(task_ids.len() as u64) as usize];
                    let start = (next_rand(90) * 15) as u32;
                    Action::AddScheduledBlock(block(&format!("b{}", step), ItemRef::Task(t.clone()), start, start + 30))
                }
                3 if !subtask_ids.is_empty() => {
                    let s = &subtask_ids[next_rand(subtask_ids.len() as u64) as usize];
                    Action::StartTimer {
                        item: ItemRef::Subtask(s.clone()),
                        at: t0() + Duration::minutes(step),
                    }
                }
                4 if !project_ids.is_empty() => Action::DeleteProject {
                    project_id: project_ids[next_rand(project_ids.len() as u64) as usize].clone(),
                },
                5 if !task_ids.is_empty() => Action::DeleteTask {
                    task_id: task_ids[next_rand(task_ids.len() as u64) as usize].clone(),
                },
                6 if !subtask_ids.is_empty() => Action::DeleteSubtask {
                    subtask_id: subtask_ids[next_rand(subtask_ids.len() as u64) as usize].clone(),
                },
                _ => Action::StopTimer {
                    end_time: t0() + Duration::minutes(step),
                },
            };

            state = apply(&state, &action).resolve(state.clone());
            assert_no_dangling(&state);
        }
    }
}
