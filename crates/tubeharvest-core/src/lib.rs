//! tubeharvest core library
//!
//! Turns the paged YouTube Data API search into a duration-filtered CSV
//! dataset, and consolidates several such datasets into one.
//!
//! # Overview
//!
//! - Paced HTTP client bound to one API key
//! - Typed parsers for search pages, video details and duration strings
//! - [`VideoSearcher`]: follows continuation tokens up to a result limit,
//!   keeping videos no longer than a minute ceiling
//! - [`merge_directory`]: tags per-keyword files with their keyword and
//!   drops repeated video ids
//!
//! # Example
//!
//! ```no_run
//! use tubeharvest_core::{Result, SearchConfig, VideoSearcher};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let mut config = SearchConfig::new("my-api-key");
//!     config.minutes_limit = 20;
//!
//!     let searcher = VideoSearcher::new(config)?;
//!     let (results, path) = searcher.search_and_export("knife sharpening", "out").await?;
//!     println!("{} videos written to {}", results.len(), path.display());
//!
//!     let summary = tubeharvest_core::merge_directory("out")?;
//!     println!("{} -> {} rows", summary.input_rows, summary.output_rows);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
pub mod export;
pub mod merge;
pub mod parser;
mod searcher;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, RateLimiter, YoutubeClient};

// Re-export error types
pub use error::{HarvestError, Result};

// Re-export parser functions
pub use parser::{VideoDuration, parse_duration, parse_search_page, parse_video_details};

// Re-export main search API
pub use searcher::{VideoSearcher, build_record, qualifying_duration};

// Re-export export and merge entry points
pub use export::{RESULT_COLUMNS, export_records, write_records};
pub use merge::{CONSOLIDATED_FILE_NAME, ConsolidatedDataset, MergeSummary, merge_directory, merge_directory_to};

// Re-export data types
pub use types::{DEFAULT_MINUTES_LIMIT, DEFAULT_SEARCH_LIMIT, ResultSet, SearchConfig, SortOrder, VideoRecord};
