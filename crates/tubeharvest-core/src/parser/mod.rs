//! Parsers for Data API responses
//!
//! Contains typed response models and the duration extractor.

pub mod duration;
pub mod search;
pub mod videos;

pub use duration::{VideoDuration, parse_duration};
pub use search::{SearchItem, SearchPage, Snippet, parse_search_page};
pub use videos::{VideoDetails, parse_video_details};
