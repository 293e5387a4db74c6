use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Metadata for a single video, one JSON line of yt-dlp output.
///
/// Every field defaults when absent; unknown fields are ignored. Records are
/// ephemeral — built per fetch, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub title: String,
    /// Calendar date as "YYYYMMDD"; may be empty or unparsable.
    #[serde(default)]
    pub upload_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub webpage_url: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub uploader: String,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub duration: Option<u64>,
}

impl Video {
    /// The upload date as a calendar date, if it is a well-formed YYYYMMDD
    /// string.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.upload_date, "%Y%m%d").ok()
    }
}

/// Orders videos newest first. When both dates parse they compare
/// chronologically; otherwise the raw strings compare lexically, which still
/// ranks well-formed YYYYMMDD values correctly.
pub fn sort_newest_first(videos: &mut [Video]) {
    videos.sort_by(compare_newest_first);
}

fn compare_newest_first(a: &Video, b: &Video) -> Ordering {
    match (a.parsed_date(), b.parsed_date()) {
        (Some(da), Some(db)) => db.cmp(&da),
        _ => b.upload_date.cmp(&a.upload_date),
    }
}
