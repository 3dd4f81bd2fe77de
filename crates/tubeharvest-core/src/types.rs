//! Core data types for tubeharvest
//!
//! Contains the search configuration, the exported record and the
//! per-run result builder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default duration ceiling in minutes
pub const DEFAULT_MINUTES_LIMIT: u32 = 90;

/// Default result-count ceiling
pub const DEFAULT_SEARCH_LIMIT: usize = 200;

/// Ordering applied by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Date,
    Rating,
    Relevance,
    Title,
    VideoCount,
    #[default]
    ViewCount,
}

impl SortOrder {
    /// Value of the `order` query parameter
    pub fn as_api_str(&self) -> &'static str {
        match self {
            SortOrder::Date => "date",
            SortOrder::Rating => "rating",
            SortOrder::Relevance => "relevance",
            SortOrder::Title => "title",
            SortOrder::VideoCount => "videoCount",
            SortOrder::ViewCount => "viewCount",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortOrder::Date),
            "rating" => Ok(SortOrder::Rating),
            "relevance" => Ok(SortOrder::Relevance),
            "title" => Ok(SortOrder::Title),
            "videoCount" => Ok(SortOrder::VideoCount),
            "viewCount" => Ok(SortOrder::ViewCount),
            other => Err(format!(
                "unknown sort order '{}' (expected one of: date, rating, relevance, title, videoCount, viewCount)",
                other
            )),
        }
    }
}

/// Settings for one search run
///
/// Immutable once handed to a [`crate::VideoSearcher`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Data API key
    pub api_key: String,
    /// Longest accepted video, in minutes (inclusive)
    pub minutes_limit: u32,
    /// Stop paging once more than this many records were collected
    pub search_limit: usize,
    /// Ordering of search results
    pub order: SortOrder,
}

impl SearchConfig {
    /// Config with the default limits and ordering
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            minutes_limit: DEFAULT_MINUTES_LIMIT,
            search_limit: DEFAULT_SEARCH_LIMIT,
            order: SortOrder::default(),
        }
    }
}

/// One qualifying video, as written to the output file
///
/// Field order is the column order of the exported CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,

    pub video_url: String,

    /// Spreadsheet formula wrapping `video_url`
    pub hyperlink: String,

    #[serde(rename = "publishedAt")]
    pub published_at: String,

    #[serde(rename = "channelId")]
    pub channel_id: String,

    #[serde(rename = "channelTitle")]
    pub channel_title: String,

    pub title: String,

    #[serde(rename = "viewCount")]
    pub view_count: u64,

    #[serde(rename = "likeCount")]
    pub like_count: u64,

    #[serde(rename = "commentCount")]
    pub comment_count: u64,

    /// Length in whole minutes
    pub duration: u32,
}

/// Records accumulated by a single search run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<VideoRecord>,
    pages_fetched: usize,
    rejected: usize,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a qualifying record
    pub fn push(&mut self, record: VideoRecord) {
        self.records.push(record);
    }

    /// Count a video dropped by the duration filter
    pub fn record_rejection(&mut self) {
        self.rejected += 1;
    }

    /// Count a fetched search page
    pub fn record_page(&mut self) {
        self.pages_fetched += 1;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<VideoRecord> {
        self.records
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Number of videos dropped by the duration filter
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(id: &str) -> VideoRecord {
        VideoRecord {
            video_id: id.to_string(),
            video_url: format!("https://www.youtube.com/watch?v={}", id),
            hyperlink: format!("=HYPERLINK(\"https://www.youtube.com/watch?v={}\",)", id),
            published_at: "2023-04-01T10:00:00Z".to_string(),
            channel_id: "UC123".to_string(),
            channel_title: "Channel".to_string(),
            title: "Title".to_string(),
            view_count: 10,
            like_count: 2,
            comment_count: 1,
            duration: 45,
        }
    }

    #[test]
    fn test_sort_order_default_is_view_count() {
        assert_eq!(SortOrder::default(), SortOrder::ViewCount);
        assert_eq!(SortOrder::default().as_api_str(), "viewCount");
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("date".parse::<SortOrder>(), Ok(SortOrder::Date));
        assert_eq!("videoCount".parse::<SortOrder>(), Ok(SortOrder::VideoCount));
        assert_eq!("relevance".parse::<SortOrder>(), Ok(SortOrder::Relevance));
        assert!("views".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_sort_order_display_matches_api() {
        for order in [
            SortOrder::Date,
            SortOrder::Rating,
            SortOrder::Relevance,
            SortOrder::Title,
            SortOrder::VideoCount,
            SortOrder::ViewCount,
        ] {
            assert_eq!(order.to_string().parse::<SortOrder>(), Ok(order));
        }
    }

    #[test]
    fn test_search_config_defaults() {
        let config = SearchConfig::new("key");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.minutes_limit, 90);
        assert_eq!(config.search_limit, 200);
        assert_eq!(config.order, SortOrder::ViewCount);
    }

    #[test]
    fn test_result_set_accumulates_in_order() {
        let mut set = ResultSet::new();
        assert!(set.is_empty());

        set.record_page();
        set.push(sample_record("a"));
        set.record_rejection();
        set.push(sample_record("b"));

        assert_eq!(set.len(), 2);
        assert_eq!(set.pages_fetched(), 1);
        assert_eq!(set.rejected(), 1);
        let ids: Vec<_> = set.records().iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_video_record_serializes_api_column_names() {
        let json = serde_json::to_value(sample_record("v1")).expect("Serialization should succeed");
        assert_eq!(json["publishedAt"], "2023-04-01T10:00:00Z");
        assert_eq!(json["channelTitle"], "Channel");
        assert_eq!(json["viewCount"], 10);
        assert_eq!(json["duration"], 45);
    }
}
