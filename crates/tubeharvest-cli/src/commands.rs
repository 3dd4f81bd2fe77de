//! Subcommand implementations

use anyhow::Context;
use tracing::info;
use tubeharvest_core::{ClientConfig, SearchConfig, VideoRecord, VideoSearcher, merge_directory_to};

use crate::{MergeArgs, SearchArgs};

pub async fn run_search(args: SearchArgs) -> anyhow::Result<()> {
    let config = SearchConfig {
        api_key: args.api_key,
        minutes_limit: args.minutes_limit,
        search_limit: args.search_limit,
        order: args.order,
    };
    let client_config = ClientConfig {
        base_url: args.base_url,
        requests_per_second: args.requests_per_second,
        timeout_secs: args.timeout_secs,
    };

    let searcher = VideoSearcher::with_client_config(config, client_config)
        .context("could not set up the YouTube client")?;

    info!(keyword = %args.keyword, "Scraping");
    let (results, path) = searcher
        .search_and_export(&args.keyword, &args.output_dir)
        .await
        .with_context(|| format!("search for '{}' failed", args.keyword))?;

    println!(
        "Exported {} videos for '{}' to {}",
        results.len(),
        args.keyword.trim(),
        path.display()
    );
    print!("{}", format_preview(results.records(), args.preview));

    Ok(())
}

pub fn run_merge(args: MergeArgs) -> anyhow::Result<()> {
    let summary = merge_directory_to(&args.dir, &args.output)
        .with_context(|| format!("could not merge {}", args.dir.display()))?;

    println!("Input files: {}", summary.files.len());
    println!("Rows before dropping duplicates: {}", summary.input_rows);
    println!("Rows after dropping duplicates: {}", summary.output_rows);
    println!("Written to {}", summary.output_path.display());

    Ok(())
}

/// Short table of the first `limit` records
fn format_preview(records: &[VideoRecord], limit: usize) -> String {
    if limit == 0 || records.is_empty() {
        return String::new();
    }

    let mut out = format!("{:<12} {:>8} {:>12}  {}\n", "video_id", "minutes", "views", "title");
    for record in records.iter().take(limit) {
        out.push_str(&format!(
            "{:<12} {:>8} {:>12}  {}\n",
            record.video_id, record.duration, record.view_count, record.title
        ));
    }
    if records.len() > limit {
        out.push_str(&format!("... {} more\n", records.len() - limit));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> VideoRecord {
        VideoRecord {
            video_id: id.to_string(),
            video_url: String::new(),
            hyperlink: String::new(),
            published_at: String::new(),
            channel_id: String::new(),
            channel_title: String::new(),
            title: format!("Title {}", id),
            view_count: 42,
            like_count: 0,
            comment_count: 0,
            duration: 7,
        }
    }

    #[test]
    fn test_preview_empty() {
        assert_eq!(format_preview(&[], 5), "");
        assert_eq!(format_preview(&[record("a")], 0), "");
    }

    #[test]
    fn test_preview_truncates() {
        let records: Vec<_> = ["a", "b", "c"].into_iter().map(record).collect();
        let preview = format_preview(&records, 2);
        let lines: Vec<&str> = preview.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("video_id"));
        assert!(lines[1].contains("Title a"));
        assert!(lines[2].contains("Title b"));
        assert_eq!(lines[3], "... 1 more");
    }
}
