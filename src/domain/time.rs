use chrono::{DateTime, Local, Timelike};

/// Minutes in one calendar day
pub const MINUTES_IN_DAY: u32 = 24 * 60;

/// Grid unit that placements snap to
pub const SNAP_MINUTES: u32 = 15;

/// Smallest duration a planned block can be resized to
pub const MIN_BLOCK_MINUTES: u32 = 15;

/// Convert minute-of-day to a percentage of the day
pub fn minutes_to_percent(minutes: u32) -> f64 {
    minutes as f64 / MINUTES_IN_DAY as f64 * 100.0
}

/// Vertical geometry of a day timeline.
///
/// `height` is the full extent of one day in whatever unit the renderer
/// uses (pixels, terminal rows). The mapping is linear over 1440 minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    pub height: f64,
}

impl Timeline {
    pub fn new(height: f64) -> Self {
        Self { height }
    }

    /// Minute under a vertical offset, clamped to the day
    pub fn minute_at(&self, offset: f64) -> u32 {
        if self.height <= 0.0 {
            return 0;
        }
        let minute = (offset / self.height * MINUTES_IN_DAY as f64).round();
        minute.clamp(0.0, MINUTES_IN_DAY as f64) as u32
    }

    /// Vertical offset where a minute starts
    pub fn offset_of(&self, minute: u32) -> f64 {
        minute as f64 / MINUTES_IN_DAY as f64 * self.height
    }
}

/// Minute of day for a wall-clock instant
pub fn minute_of_day(at: DateTime<Local>) -> u32 {
    at.hour() * 60 + at.minute()
}

/// Format minute-of-day as "h:mm AM"
pub fn format_time(minutes: u32) -> String {
    let h = (minutes / 60) % 24;
    let m = minutes % 60;
    let ampm = if h >= 12 { "PM" } else { "AM" };
    let h12 = match h % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", h12, m, ampm)
}

/// Format minute-of-day as 24-hour "HH:MM"
pub fn format_time_24h(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Label for the hour line on the time axis (blank at both midnights)
pub fn hour_label(hour: u32) -> String {
    match hour {
        1..=11 => format!("{} AM", hour),
        12 => "12 PM".to_string(),
        13..=23 => format!("{} PM", hour - 12),
        _ => String::new(),
    }
}

/// Format a minute count as "Xh Ym" (omits 0 values)
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours > 0 && mins > 0 {
        format!("{}h {}m", hours, mins)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", mins)
    }
}
