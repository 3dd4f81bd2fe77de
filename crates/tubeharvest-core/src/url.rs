//! URL helper functions for the YouTube Data API
//!
//! Provides functions for building search, video detail and watch URLs.

use crate::types::SortOrder;

/// Default Data API root
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Largest page the search endpoint will return
pub const MAX_PAGE_SIZE: u32 = 50;

const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

/// Builds a search page URL
///
/// # Arguments
/// * `base` - API root (e.g., "https://www.googleapis.com/youtube/v3")
/// * `api_key` - Data API key
/// * `query` - Search keyword
/// * `order` - Result ordering
/// * `page_token` - Continuation token from the previous page, if any
///
/// # Example
/// ```
/// use tubeharvest_core::SortOrder;
/// use tubeharvest_core::url::build_search_url;
/// let url = build_search_url("https://api.test", "k", "cat videos", SortOrder::ViewCount, None);
/// assert_eq!(
///     url,
///     "https://api.test/search?part=id,snippet&type=video&q=cat%20videos&maxResults=50&order=viewCount&key=k"
/// );
/// ```
pub fn build_search_url(
    base: &str,
    api_key: &str,
    query: &str,
    order: SortOrder,
    page_token: Option<&str>,
) -> String {
    let mut url = format!(
        "{}/search?part=id,snippet&type=video&q={}&maxResults={}&order={}&key={}",
        base.trim_end_matches('/'),
        urlencoding::encode(query),
        MAX_PAGE_SIZE,
        order.as_api_str(),
        urlencoding::encode(api_key),
    );
    if let Some(token) = page_token {
        url.push_str("&pageToken=");
        url.push_str(&urlencoding::encode(token));
    }
    url
}

/// Builds the detail lookup URL for a single video
///
/// # Example
/// ```
/// use tubeharvest_core::url::build_video_details_url;
/// let url = build_video_details_url("https://api.test", "k", "abc123");
/// assert_eq!(url, "https://api.test/videos?part=contentDetails,statistics&id=abc123&key=k");
/// ```
pub fn build_video_details_url(base: &str, api_key: &str, video_id: &str) -> String {
    format!(
        "{}/videos?part=contentDetails,statistics&id={}&key={}",
        base.trim_end_matches('/'),
        urlencoding::encode(video_id),
        urlencoding::encode(api_key),
    )
}

/// Builds the public watch page URL
///
/// # Example
/// ```
/// use tubeharvest_core::url::build_watch_url;
/// assert_eq!(build_watch_url("dQw4w9WgXcQ"), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
/// ```
pub fn build_watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_BASE, video_id)
}

/// Wraps a URL in a spreadsheet `HYPERLINK` formula
///
/// # Example
/// ```
/// use tubeharvest_core::url::build_hyperlink_formula;
/// assert_eq!(build_hyperlink_formula("https://a.b"), "=HYPERLINK(\"https://a.b\",)");
/// ```
pub fn build_hyperlink_formula(url: &str) -> String {
    format!("=HYPERLINK(\"{}\",)", url)
}
