//! CSV export of recorded activity.

use crate::domain::{item_details, time::format_time_24h, AppData};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

const HEADER: &str = "date,project,item_title,item_type,start_time_24h,end_time_24h,duration_minutes,estimated_duration_minutes\r\n";

/// Name of the export file for `today`
pub fn default_filename(today: NaiveDate) -> String {
    format!("lifeos_activity_export_{}.csv", today.format("%Y-%m-%d"))
}

/// Every activity log as one CSV row. `None` when there is nothing to export.
pub fn to_csv(data: &AppData) -> Result<Option<String>> {
    if data.activity_logs.is_empty() {
        return Ok(None);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(Terminator::CRLF)
        .from_writer(HEADER.as_bytes().to_vec());

    for log in &data.activity_logs {
        let details = item_details(data, &log.item);
        let estimate = details.est_duration.map(|m| m.to_string()).unwrap_or_default();
        writer
            .write_record([
                log.date.format("%Y-%m-%d").to_string(),
                details.project_name().to_string(),
                details.title.replace(',', ""),
                log.item.kind().as_str().to_string(),
                format_time_24h(log.start),
                format_time_24h(log.end),
                log.duration().to_string(),
                estimate,
            ])
            .with_context(|| format!("Failed to write CSV row for log {}", log.id))?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    let csv = String::from_utf8(bytes).context("CSV output is not valid UTF-8")?;
    Ok(Some(csv))
}
