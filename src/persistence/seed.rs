use crate::domain::{AppData, ItemRef, Project, ProjectColor, Subtask, Task, TimeBlock};
use chrono::NaiveDate;

fn project(id: &str, name: &str, color: ProjectColor) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        color,
    }
}

fn task(id: &str, project_id: &str, title: &str, est_duration: Option<u32>) -> Task {
    Task {
        id: id.to_string(),
        project_id: project_id.to_string(),
        title: title.to_string(),
        est_duration,
    }
}

fn subtask(id: &str, task_id: &str, title: &str, est_duration: u32) -> Subtask {
    Subtask {
        id: id.to_string(),
        task_id: task_id.to_string(),
        title: title.to_string(),
        est_duration: Some(est_duration),
    }
}

fn block(id: &str, item: ItemRef, start: u32, end: u32, date: NaiveDate) -> TimeBlock {
    TimeBlock {
        id: id.to_string(),
        item,
        start,
        end,
        date,
    }
}

/// Starter dataset used on first launch or when stored state is unreadable
pub fn initial_state(today: NaiveDate) -> AppData {
    AppData {
        projects: vec![
            project("p1", "Business", ProjectColor::Blue),
            project("p2", "Health", ProjectColor::Green),
            project("p3", "Looksmaxxing", ProjectColor::Purple),
            project("p4", "Reflection", ProjectColor::Yellow),
        ],
        tasks: vec![
            task("t1", "p1", "Develop new feature", Some(180)),
            task("t2", "p1", "Client meeting prep", None),
            task("t3", "p2", "Workout", Some(60)),
            task("t4", "p2", "Meal Prep", Some(45)),
            task("t5", "p3", "Skincare routine", Some(15)),
            task("t6", "p4", "Journaling", Some(30)),
        ],
        subtasks: vec![
            subtask("s1", "t2", "Research client background", 30),
            subtask("s2", "t2", "Prepare presentation slides", 90),
        ],
        scheduled_blocks: vec![
            // 7:00 - 8:00
            block("sb1", ItemRef::Task("t3".into()), 420, 480, today),
            // 10:00 - 11:30
            block("sb2", ItemRef::Subtask("s2".into()), 600, 690, today),
        ],
        // 7:05 - 8:10
        activity_logs: vec![block("al1", ItemRef::Task("t3".into()), 425, 490, today)],
        active_timer: None,
        dragged_item: None,
    }
}
