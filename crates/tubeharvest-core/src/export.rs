//! CSV export of search results

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::VideoRecord;

/// Column order of a per-keyword results file
pub const RESULT_COLUMNS: [&str; 11] = [
    "video_id",
    "video_url",
    "hyperlink",
    "publishedAt",
    "channelId",
    "channelTitle",
    "title",
    "viewCount",
    "likeCount",
    "commentCount",
    "duration",
];

/// File name for a keyword's results
///
/// Path separators and characters that are invalid in file names on common
/// platforms are replaced with `_`, so the merger recovers the same keyword
/// for ordinary keywords.
///
/// # Example
/// ```
/// use tubeharvest_core::export::export_file_name;
/// assert_eq!(export_file_name("cat videos"), "cat videos.csv");
/// assert_eq!(export_file_name("ac/dc"), "ac_dc.csv");
/// ```
pub fn export_file_name(keyword: &str) -> String {
    let safe: String = keyword
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}.csv", safe)
}

/// Writes records as CSV, header first
///
/// The header is written even when there are no records.
pub fn write_records<W: Write>(writer: W, records: &[VideoRecord]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(RESULT_COLUMNS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Writes `records` to `<dir>/<keyword>.csv`, creating `dir` if needed
///
/// The file is encoded fully in memory first, so an encoding error leaves
/// no file behind.
///
/// # Returns
/// Path of the written file
pub fn export_records(dir: &Path, keyword: &str, records: &[VideoRecord]) -> Result<PathBuf> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, records)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(keyword));
    fs::write(&path, buffer)?;

    Ok(path)
}
