//! Utilities for date and time formatting
//!
//! Timestamps from the API arrive as `DateTime<Utc>`; lists show them in
//! DD.MM.YYYY HH:MM form.

use chrono::{DateTime, Utc};

/// Format a timestamp as DD.MM.YYYY HH:MM
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%d.%m.%Y %H:%M").to_string()
}

/// Human-readable elapsed time between two instants, e.g. "2m 05s"
pub fn format_duration(from: &DateTime<Utc>, to: &DateTime<Utc>) -> String {
    let secs = (*to - *from).num_seconds().max(0);
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    }
}
