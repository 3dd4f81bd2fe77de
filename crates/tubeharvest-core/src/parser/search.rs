//! Search page parser
//!
//! Parses the JSON body of the `search` endpoint.

use serde::Deserialize;

use crate::error::{HarvestError, Result};

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<SearchItem>,

    /// Continuation token, `None` on the last page
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub id: SearchItemId,

    #[serde(default)]
    pub snippet: Snippet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Snippet fields copied into the exported record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl SearchItem {
    /// Video id, if the item refers to a video
    pub fn video_id(&self) -> Option<&str> {
        self.id.video_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Parses a search response body
///
/// # Errors
/// Returns `ParseError` if the body is not a search response
pub fn parse_search_page(body: &str) -> Result<SearchPage> {
    let mut page: SearchPage = serde_json::from_str(body)
        .map_err(|e| HarvestError::ParseError(format!("search response: {}", e)))?;

    // An empty token means the same as no token.
    if page.next_page_token.as_deref() == Some("") {
        page.next_page_token = None;
    }

    Ok(page)
}
