use crate::domain::time::{format_duration, format_time};
use crate::domain::{item_details, AppData, TimeBlock};
use crate::report::stats::{format_hours, summary, DateRange};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Format percentage with no decimals, as the reports view shows it
fn format_percent(value: f64) -> String {
    format!("{:.0}%", value)
}

fn range_title(from: NaiveDate, to: NaiveDate) -> String {
    if from == to {
        format!("{}", from)
    } else {
        format!("{} to {}", from, to)
    }
}

fn push_entries(report: &mut String, data: &AppData, entries: &[&TimeBlock]) {
    for entry in entries {
        let details = item_details(data, &entry.item);
        report.push_str(&format!(
            "- {} - {} **{}** ({}, {})\n",
            format_time(entry.start),
            format_time(entry.end),
            details.title,
            details.project_name(),
            format_duration(entry.duration())
        ));
    }
}

/// Render the planned-vs-actual Markdown report for `from..=to`
pub fn render_report(data: &AppData, from: NaiveDate, to: NaiveDate) -> String {
    let range = DateRange::between(from, to);
    let totals = summary(data, range);

    let mut report = String::new();
    report.push_str(&format!("# LifeOS Report - {}\n\n", range_title(from, to)));

    // Summary Section
    report.push_str("## Summary\n\n");
    report.push_str(&format!("- **Total Time Planned:** {}\n", format_hours(totals.total_planned)));
    report.push_str(&format!("- **Total Time Actual:** {}\n", format_hours(totals.total_actual)));
    report.push_str(&format!(
        "- **Plan Adherence:** {}\n\n",
        format_percent(totals.adherence_percent())
    ));

    // Per-project table
    report.push_str("## Planned vs Actual by Project\n\n");
    report.push_str("| Project | Planned | Actual |\n");
    report.push_str("|---|---|---|\n");
    for row in &totals.projects {
        report.push_str(&format!(
            "| {} | {} | {} |\n",
            row.project.name,
            format_duration(row.planned),
            format_duration(row.actual)
        ));
    }
    report.push('\n');

    let slices = totals.pie_slices();
    if !slices.is_empty() {
        report.push_str("## Actual Time by Project\n\n");
        for slice in &slices {
            report.push_str(&format!(
                "- **{}:** {} ({:.1}%)\n",
                slice.name,
                format_duration(slice.minutes),
                slice.percent
            ));
        }
        report.push('\n');
    }

    // Day-by-day breakdown, skipping empty days
    let mut day = from;
    while day <= to {
        let mut planned: Vec<&TimeBlock> =
            data.scheduled_blocks.iter().filter(|b| b.date == day).collect();
        let mut actual: Vec<&TimeBlock> = data.activity_logs.iter().filter(|b| b.date == day).collect();

        if !planned.is_empty() || !actual.is_empty() {
            planned.sort_by_key(|b| b.start);
            actual.sort_by_key(|b| b.start);

            report.push_str(&format!("## {}\n\n", day.format("%A, %B %-d, %Y")));
            if !planned.is_empty() {
                report.push_str("### Planned\n\n");
                push_entries(&mut report, data, &planned);
                report.push('\n');
            }
            if !actual.is_empty() {
                report.push_str("### Actual\n\n");
                push_entries(&mut report, data, &actual);
                report.push('\n');
            }
        }

        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    report
}

/// Write the report for `from..=to` to `output`
pub fn generate_report(data: &AppData, from: NaiveDate, to: NaiveDate, output: &Path) -> Result<PathBuf> {
    if from > to {
        anyhow::bail!("Report range is empty: {} is after {}", from, to);
    }
    let report = render_report(data, from, to);
    fs::write(output, report)
        .with_context(|| format!("Failed to write report: {}", output.display()))?;
    tracing::info!(path = %output.display(), %from, %to, "report generated");
    Ok(output.to_path_buf())
}
