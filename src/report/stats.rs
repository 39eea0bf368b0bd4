use crate::domain::{project_items, AppData, ItemRef, Project, TimeBlock};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Inclusive day range; `None` on either side is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Planned and actual minutes for one project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectTotals<'a> {
    pub project: &'a Project,
    pub planned: u32,
    pub actual: u32,
}

/// Slice of the "actual time by project" chart
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice<'a> {
    pub name: &'a str,
    pub minutes: u32,
    /// Share of all actual time, 0-100
    pub percent: f64,
}

/// Headline numbers for the reports view
#[derive(Debug, Clone, PartialEq)]
pub struct Summary<'a> {
    pub projects: Vec<ProjectTotals<'a>>,
    pub total_planned: u32,
    pub total_actual: u32,
}

impl Summary<'_> {
    /// Actual as a percentage of planned; 0 when nothing was planned
    pub fn adherence_percent(&self) -> f64 {
        if self.total_planned == 0 {
            0.0
        } else {
            self.total_actual as f64 / self.total_planned as f64 * 100.0
        }
    }

    /// Projects with recorded time, in project order
    pub fn pie_slices(&self) -> Vec<PieSlice<'_>> {
        self.projects
            .iter()
            .filter(|p| p.actual > 0)
            .map(|p| PieSlice {
                name: &p.project.name,
                minutes: p.actual,
                percent: if self.total_actual == 0 {
                    0.0
                } else {
                    p.actual as f64 / self.total_actual as f64 * 100.0
                },
            })
            .collect()
    }
}

fn minutes_for(blocks: &[TimeBlock], items: &HashSet<ItemRef>, range: DateRange) -> u32 {
    blocks
        .iter()
        .filter(|b| range.contains(b.date) && items.contains(&b.item))
        .map(TimeBlock::duration)
        .sum()
}

/// Planned and actual minutes per project, in project order
pub fn project_totals(data: &AppData, range: DateRange) -> Vec<ProjectTotals<'_>> {
    data.projects
        .iter()
        .map(|project| {
            let items = project_items(data, &project.id);
            ProjectTotals {
                project,
                planned: minutes_for(&data.scheduled_blocks, &items, range),
                actual: minutes_for(&data.activity_logs, &items, range),
            }
        })
        .collect()
}

pub fn summary(data: &AppData, range: DateRange) -> Summary<'_> {
    let projects = project_totals(data, range);
    let total_planned = projects.iter().map(|p| p.planned).sum();
    let total_actual = projects.iter().map(|p| p.actual).sum();
    Summary {
        projects,
        total_planned,
        total_actual,
    }
}

/// Minutes as hours with one decimal, e.g. "1.5 hrs"
pub fn format_hours(minutes: u32) -> String {
    format!("{:.1} hrs", minutes as f64 / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::seed::initial_state;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    #[test]
    fn test_project_totals_on_seed_data() {
        let data = initial_state(day());
        let totals = project_totals(&data, DateRange::all());
        let rows: Vec<(&str, u32, u32)> = totals
            .iter()
            .map(|t| (t.project.name.as_str(), t.planned, t.actual))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Business", 90, 0),
                ("Health", 60, 65),
                ("Looksmaxxing", 0, 0),
                ("Reflection", 0, 0),
            ]
        );
    }

    #[test]
    fn test_summary_and_adherence() {
        let data = initial_state(day());
        let s = summary(&data, DateRange::all());
        assert_eq!(s.total_planned, 150);
        assert_eq!(s.total_actual, 65);
        assert!((s.adherence_percent() - 65.0 / 150.0 * 100.0).abs() < 1e-9);

        let slices = s.pie_slices();
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].name, "Health");
        assert_eq!(slices[0].percent, 100.0);
    }

    #[test]
    fn test_adherence_zero_when_nothing_planned() {
        let mut data = initial_state(day());
        data.scheduled_blocks.clear();
        assert_eq!(summary(&data, DateRange::all()).adherence_percent(), 0.0);
    }

    #[test]
    fn test_range_excludes_other_days() {
        let data = initial_state(day());
        let next = day().succ_opt().unwrap();
        let s = summary(&data, DateRange::between(next, next));
        assert_eq!((s.total_planned, s.total_actual), (0, 0));
        assert!(DateRange { from: None, to: Some(day()) }.contains(day()));
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(90), "1.5 hrs");
        assert_eq!(format_hours(0), "0.0 hrs");
    }
}
