use chrono::NaiveDate;

/// Renders a yt-dlp "YYYYMMDD" date as "YYYY-MM-DD", falling back to the
/// raw string when it does not parse.
pub fn format_upload_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y%m%d") {
        Ok(parsed) => parsed.format("%Y-%m-%d").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Renders a duration in seconds as H:MM:SS, or M:SS under an hour.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Truncates a description to at most `max` characters, appending an
/// ellipsis when anything was cut.
pub fn truncate_description(description: &str, max: usize) -> String {
    if description.chars().count() <= max {
        return description.to_string();
    }
    let truncated: String = description.chars().take(max).collect();
    format!("{truncated}...")
}
