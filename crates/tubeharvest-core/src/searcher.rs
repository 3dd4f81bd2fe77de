//! Keyword search accumulator
//!
//! Walks the paged search endpoint, looks up every hit's duration and
//! statistics, and keeps the videos short enough to qualify.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::client::{ClientConfig, YoutubeClient};
use crate::error::{HarvestError, Result};
use crate::export::export_records;
use crate::parser::{
    SearchItem, SearchPage, VideoDetails, VideoDuration, parse_duration, parse_search_page,
    parse_video_details,
};
use crate::types::{ResultSet, SearchConfig, VideoRecord};
use crate::url::{
    build_hyperlink_formula, build_search_url, build_video_details_url, build_watch_url,
};

/// Search accumulator for one API credential
///
/// Each call to [`VideoSearcher::search`] builds its own [`ResultSet`];
/// nothing is carried over between calls.
pub struct VideoSearcher {
    client: YoutubeClient,
    config: SearchConfig,
}

impl VideoSearcher {
    /// Create a searcher with default client configuration
    ///
    /// # Errors
    /// Returns `AuthenticationFailed` if the API key is empty
    pub fn new(config: SearchConfig) -> Result<Self> {
        Self::with_client_config(config, ClientConfig::default())
    }

    /// Create a searcher with custom client configuration
    ///
    /// # Errors
    /// - `AuthenticationFailed` if the API key is empty
    /// - `HttpError` if HTTP client initialization fails
    pub fn with_client_config(config: SearchConfig, client_config: ClientConfig) -> Result<Self> {
        let client = YoutubeClient::with_config(&config.api_key, client_config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for videos matching `keyword`
    ///
    /// Follows continuation tokens until the last page, or until more than
    /// `search_limit` records have been collected. The limit is checked
    /// before each follow-up page, so the final page is kept whole and the
    /// result may exceed the limit by up to one page.
    ///
    /// # Errors
    /// - `InvalidQuery` if keyword is empty or whitespace only
    /// - `AuthenticationFailed` if the API refuses the key
    /// - `HttpError` / `ApiError` on any failed request
    /// - `ParseError` if a response has an unexpected shape
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> tubeharvest_core::Result<()> {
    /// use tubeharvest_core::{SearchConfig, VideoSearcher};
    /// let searcher = VideoSearcher::new(SearchConfig::new("my-api-key"))?;
    /// let results = searcher.search("sourdough").await?;
    /// for video in results.records() {
    ///     println!("{} ({} min): {}", video.title, video.duration, video.video_url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, keyword: &str) -> Result<ResultSet> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(HarvestError::InvalidQuery(
                "Search keyword cannot be empty".to_string(),
            ));
        }

        info!(
            keyword,
            order = %self.config.order,
            minutes_limit = self.config.minutes_limit,
            search_limit = self.config.search_limit,
            "Searching videos"
        );

        let mut results = ResultSet::new();

        let mut page = self.fetch_page(keyword, None).await?;
        self.process_page(&page, &mut results).await?;

        while let Some(token) = page.next_page_token.take() {
            if results.len() > self.config.search_limit {
                debug!(
                    collected = results.len(),
                    search_limit = self.config.search_limit,
                    "Search limit exceeded, not following next page"
                );
                break;
            }

            page = self.fetch_page(keyword, Some(&token)).await?;
            self.process_page(&page, &mut results).await?;
        }

        info!(
            keyword,
            records = results.len(),
            rejected = results.rejected(),
            pages = results.pages_fetched(),
            "Search finished"
        );

        Ok(results)
    }

    /// Search and write the results to `<output_dir>/<keyword>.csv`
    ///
    /// Nothing is written if the search fails.
    ///
    /// # Returns
    /// The result set and the path of the written file
    pub async fn search_and_export(
        &self,
        keyword: &str,
        output_dir: impl AsRef<Path>,
    ) -> Result<(ResultSet, PathBuf)> {
        let results = self.search(keyword).await?;
        let path = export_records(output_dir.as_ref(), keyword.trim(), results.records())?;
        info!(path = %path.display(), records = results.len(), "Exported search results");
        Ok((results, path))
    }

    async fn fetch_page(&self, keyword: &str, page_token: Option<&str>) -> Result<SearchPage> {
        let url = build_search_url(
            self.client.base_url(),
            self.client.api_key(),
            keyword,
            self.config.order,
            page_token,
        );
        let body = self.client.fetch(&url).await?;
        let page = parse_search_page(&body)?;

        debug!(
            items = page.items.len(),
            has_next = page.next_page_token.is_some(),
            "Fetched search page"
        );

        Ok(page)
    }

    async fn fetch_details(&self, video_id: &str) -> Result<Option<VideoDetails>> {
        let url =
            build_video_details_url(self.client.base_url(), self.client.api_key(), video_id);
        let body = self.client.fetch(&url).await?;
        parse_video_details(&body)
    }

    /// Look up every item of `page` and append the qualifying ones
    async fn process_page(&self, page: &SearchPage, results: &mut ResultSet) -> Result<()> {
        results.record_page();

        for item in &page.items {
            let Some(video_id) = item.video_id() else {
                warn!("Search item without a video id, skipping");
                continue;
            };

            let Some(details) = self.fetch_details(video_id).await? else {
                warn!(video_id, "No details returned for video, skipping");
                continue;
            };

            match qualifying_duration(&details.duration, self.config.minutes_limit) {
                Some(duration) => results.push(build_record(item, video_id, &details, duration)),
                None => {
                    debug!(video_id, duration = %details.duration, "Rejected by duration filter");
                    results.record_rejection();
                }
            }
        }

        Ok(())
    }
}

/// Parsed duration of a video that fits under `minutes_limit`
///
/// `None` for day-scale durations and for videos longer than the limit.
pub fn qualifying_duration(raw: &str, minutes_limit: u32) -> Option<VideoDuration> {
    parse_duration(raw).filter(|d| d.total_minutes() <= minutes_limit)
}

/// Map a search hit and its details to the exported record
pub fn build_record(
    item: &SearchItem,
    video_id: &str,
    details: &VideoDetails,
    duration: VideoDuration,
) -> VideoRecord {
    let video_url = build_watch_url(video_id);
    let snippet = &item.snippet;

    VideoRecord {
        video_id: video_id.to_string(),
        hyperlink: build_hyperlink_formula(&video_url),
        video_url,
        published_at: snippet.published_at.clone().unwrap_or_default(),
        channel_id: snippet.channel_id.clone().unwrap_or_default(),
        channel_title: snippet.channel_title.clone().unwrap_or_default(),
        title: snippet.title.clone().unwrap_or_default(),
        view_count: details.view_count,
        like_count: details.like_count,
        comment_count: details.comment_count,
        duration: duration.total_minutes(),
    }
}
