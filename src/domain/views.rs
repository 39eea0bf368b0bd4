use super::enums::ItemRef;
use super::model::AppData;

/// What a row of the task list points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Project(String),
    Item(ItemRef),
}

/// A flattened row for rendering the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// 0 = project, 1 = task, 2 = subtask
    pub depth: usize,
    /// Whether this is the last child of its parent
    pub is_last: bool,
    pub kind: RowKind,
}

impl TaskRow {
    pub fn item(&self) -> Option<&ItemRef> {
        match &self.kind {
            RowKind::Item(item) => Some(item),
            RowKind::Project(_) => None,
        }
    }
}

/// Flatten projects, tasks and subtasks into one list, in store order
pub fn flatten_rows(data: &AppData) -> Vec<TaskRow> {
    let mut rows = Vec::new();

    for project in &data.projects {
        rows.push(TaskRow {
            depth: 0,
            is_last: false,
            kind: RowKind::Project(project.id.clone()),
        });

        let tasks: Vec<_> = data.tasks_of(&project.id).collect();
        for (task_idx, task) in tasks.iter().enumerate() {
            rows.push(TaskRow {
                depth: 1,
                is_last: task_idx + 1 == tasks.len(),
                kind: RowKind::Item(ItemRef::Task(task.id.clone())),
            });

            let subtasks: Vec<_> = data.subtasks_of(&task.id).collect();
            for (st_idx, subtask) in subtasks.iter().enumerate() {
                rows.push(TaskRow {
                    depth: 2,
                    is_last: st_idx + 1 == subtasks.len(),
                    kind: RowKind::Item(ItemRef::Subtask(subtask.id.clone())),
                });
            }
        }
    }

    rows
}

/// Get tree connector for nested rows
pub fn tree_connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::seed::initial_state;
    use chrono::NaiveDate;

    #[test]
    fn test_flatten_seed() {
        let data = initial_state(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        let rows = flatten_rows(&data);

        // 4 projects + 6 tasks + 2 subtasks
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].kind, RowKind::Project("p1".into()));
        assert_eq!(rows[1].item(), Some(&ItemRef::Task("t1".into())));
        assert_eq!(rows[2].item(), Some(&ItemRef::Task("t2".into())));
        assert!(rows[2].is_last);
        assert_eq!(rows[3].depth, 2);
        assert!(!rows[3].is_last);
        assert!(rows[4].is_last);
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten_rows(&AppData::default()).is_empty());
    }

    #[test]
    fn test_tree_connector() {
        assert_eq!(tree_connector(true), "└─");
        assert_eq!(tree_connector(false), "├─");
    }
}
