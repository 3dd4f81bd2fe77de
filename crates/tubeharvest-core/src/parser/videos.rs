//! Video detail parser
//!
//! Parses the JSON body of the `videos` endpoint requested with
//! `part=contentDetails,statistics`.

use serde::Deserialize;

use crate::error::{HarvestError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    #[serde(default)]
    content_details: ContentDetails,
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ContentDetails {
    #[serde(default)]
    duration: Option<String>,
}

// Counts arrive as decimal strings; hidden counts are omitted entirely.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    #[serde(default)]
    view_count: Option<String>,
    #[serde(default)]
    like_count: Option<String>,
    #[serde(default)]
    comment_count: Option<String>,
}

/// Duration and statistics of a single video
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoDetails {
    /// Raw duration string, empty if the API omitted it
    pub duration: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}

impl VideoDetails {
    fn from_item(item: VideoItem) -> Self {
        Self {
            duration: item.content_details.duration.unwrap_or_default(),
            view_count: parse_count(item.statistics.view_count.as_deref()),
            like_count: parse_count(item.statistics.like_count.as_deref()),
            comment_count: parse_count(item.statistics.comment_count.as_deref()),
        }
    }
}

/// Parses a video detail response body
///
/// # Returns
/// Details of the first item, `None` if the video was not found
/// (deleted or private videos come back with no items)
///
/// # Errors
/// Returns `ParseError` if the body is not a video list response
pub fn parse_video_details(body: &str) -> Result<Option<VideoDetails>> {
    let response: VideoListResponse = serde_json::from_str(body)
        .map_err(|e| HarvestError::ParseError(format!("videos response: {}", e)))?;

    Ok(response.items.into_iter().next().map(VideoDetails::from_item))
}

fn parse_count(value: Option<&str>) -> u64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}
