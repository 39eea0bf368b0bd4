use super::enums::ItemRef;
use super::model::{AppData, Project, Task};
use std::collections::HashSet;

/// Placeholder shown for references that no longer resolve
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Display details for a task or subtask reference
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails<'a> {
    pub title: &'a str,
    pub project: Option<&'a Project>,
    pub est_duration: Option<u32>,
}

impl ItemDetails<'_> {
    pub fn project_name(&self) -> &str {
        self.project.map(|p| p.name.as_str()).unwrap_or(UNKNOWN_TITLE)
    }
}

/// Resolve title, owning project and estimate for an item.
/// Dangling references fall back to "Unknown" instead of failing.
pub fn item_details<'a>(data: &'a AppData, item: &ItemRef) -> ItemDetails<'a> {
    match item {
        ItemRef::Task(id) => match data.task(id) {
            Some(task) => ItemDetails {
                title: &task.title,
                project: data.project(&task.project_id),
                est_duration: effective_estimate(data, task),
            },
            None => unknown(),
        },
        ItemRef::Subtask(id) => match data.subtask(id) {
            Some(subtask) => ItemDetails {
                title: &subtask.title,
                project: data
                    .task(&subtask.task_id)
                    .and_then(|task| data.project(&task.project_id)),
                est_duration: subtask.est_duration,
            },
            None => unknown(),
        },
    }
}

fn unknown<'a>() -> ItemDetails<'a> {
    ItemDetails {
        title: UNKNOWN_TITLE,
        project: None,
        est_duration: None,
    }
}

/// Estimate used for display and aggregation.
/// A task with subtasks reports the sum of its subtasks and ignores its own.
pub fn effective_estimate(data: &AppData, task: &Task) -> Option<u32> {
    let mut has_subtasks = false;
    let mut any_estimate = false;
    let mut total: u32 = 0;

    for subtask in data.subtasks_of(&task.id) {
        has_subtasks = true;
        if let Some(est) = subtask.est_duration {
            any_estimate = true;
            total = total.saturating_add(est);
        }
    }

    if !has_subtasks {
        task.est_duration
    } else if any_estimate {
        Some(total)
    } else {
        None
    }
}

/// Minutes carried by a drag that starts from the task list
pub fn drag_duration(data: &AppData, item: &ItemRef, default_minutes: u32) -> u32 {
    item_details(data, item)
        .est_duration
        .filter(|m| *m > 0)
        .unwrap_or(default_minutes)
}

/// Project that owns an item, if the reference chain is intact
pub fn project_of<'a>(data: &'a AppData, item: &ItemRef) -> Option<&'a Project> {
    item_details(data, item).project
}

/// Every task and subtask reference belonging to a project
pub fn project_items(data: &AppData, project_id: &str) -> HashSet<ItemRef> {
    let mut items = HashSet::new();
    for task in data.tasks_of(project_id) {
        items.insert(ItemRef::Task(task.id.clone()));
        for subtask in data.subtasks_of(&task.id) {
            items.insert(ItemRef::Subtask(subtask.id.clone()));
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectColor, Subtask};

    fn sample() -> AppData {
        AppData {
            projects: vec![Project {
                id: "p1".to_string(),
                name: "Business".to_string(),
                color: ProjectColor::Blue,
            }],
            tasks: vec![
                Task {
                    id: "t1".to_string(),
                    project_id: "p1".to_string(),
                    title: "Develop new feature".to_string(),
                    est_duration: Some(180),
                },
                Task {
                    id: "t2".to_string(),
                    project_id: "p1".to_string(),
                    title: "Client meeting prep".to_string(),
                    est_duration: Some(15),
                },
            ],
            subtasks: vec![
                Subtask {
                    id: "s1".to_string(),
                    task_id: "t2".to_string(),
                    title: "Research".to_string(),
                    est_duration: Some(30),
                },
                Subtask {
                    id: "s2".to_string(),
                    task_id: "t2".to_string(),
                    title: "Slides".to_string(),
                    est_duration: Some(90),
                },
            ],
            ..AppData::default()
        }
    }

    #[test]
    fn test_item_details_task() {
        let data = sample();
        let details = item_details(&data, &ItemRef::Task("t1".to_string()));
        assert_eq!(details.title, "Develop new feature");
        assert_eq!(details.project_name(), "Business");
        assert_eq!(details.est_duration, Some(180));
    }

    #[test]
    fn test_item_details_subtask_resolves_project() {
        let data = sample();
        let details = item_details(&data, &ItemRef::Subtask("s2".to_string()));
        assert_eq!(details.title, "Slides");
        assert_eq!(details.project_name(), "Business");
        assert_eq!(details.est_duration, Some(90));
    }

    #[test]
    fn test_item_details_dangling_falls_back() {
        let data = sample();
        let details = item_details(&data, &ItemRef::Task("gone".to_string()));
        assert_eq!(details.title, UNKNOWN_TITLE);
        assert_eq!(details.project_name(), UNKNOWN_TITLE);
        assert_eq!(details.est_duration, None);
    }

    #[test]
    fn test_effective_estimate_ignores_task_with_subtasks() {
        let data = sample();
        let task = data.task("t2").unwrap();
        assert_eq!(effective_estimate(&data, task), Some(120));
        let plain = data.task("t1").unwrap();
        assert_eq!(effective_estimate(&data, plain), Some(180));
    }

    #[test]
    fn test_effective_estimate_saturates_on_huge_subtasks() {
        let mut data = sample();
        for subtask in &mut data.subtasks {
            subtask.est_duration = Some(4_000_000_000);
        }
        let task = data.task("t2").unwrap();
        assert_eq!(effective_estimate(&data, task), Some(u32::MAX));
    }

    #[test]
    fn test_drag_duration_defaults() {
        let mut data = sample();
        data.tasks[0].est_duration = None;
        assert_eq!(drag_duration(&data, &ItemRef::Task("t1".to_string()), 60), 60);
        assert_eq!(drag_duration(&data, &ItemRef::Subtask("s1".to_string()), 60), 30);
    }

    #[test]
    fn test_project_items() {
        let data = sample();
        let items = project_items(&data, "p1");
        assert_eq!(items.len(), 4);
        assert!(items.contains(&ItemRef::Subtask("s1".to_string())));
    }
}
