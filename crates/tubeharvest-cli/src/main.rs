//! Command line front-end for tubeharvest.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tubeharvest_core::{CONSOLIDATED_FILE_NAME, SortOrder, url::DEFAULT_API_BASE};

/// Collect duration-filtered YouTube search results into CSV files.
#[derive(Parser)]
#[command(name = "tubeharvest", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search one keyword and export `<KEYWORD>.csv`.
    Search(SearchArgs),

    /// Consolidate every CSV file in a directory.
    Merge(MergeArgs),
}

#[derive(clap::Args)]
struct SearchArgs {
    /// Keyword to search for.
    keyword: String,

    /// YouTube Data API key.
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Directory the results file is written to.
    #[arg(short, long, env = "TUBEHARVEST_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Longest accepted video, in minutes.
    #[arg(long, env = "TUBEHARVEST_MINUTES_LIMIT", default_value_t = tubeharvest_core::DEFAULT_MINUTES_LIMIT)]
    minutes_limit: u32,

    /// Stop paging once more than this many videos were collected.
    #[arg(long, env = "TUBEHARVEST_SEARCH_LIMIT", default_value_t = tubeharvest_core::DEFAULT_SEARCH_LIMIT)]
    search_limit: usize,

    /// Result ordering: date, rating, relevance, title, videoCount or viewCount.
    #[arg(long, env = "TUBEHARVEST_ORDER", default_value_t = SortOrder::ViewCount)]
    order: SortOrder,

    /// Request pacing; 0 disables it.
    #[arg(long, env = "TUBEHARVEST_REQUESTS_PER_SECOND", default_value_t = 10.0)]
    requests_per_second: f64,

    /// Per-request timeout.
    #[arg(long, env = "TUBEHARVEST_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Data API root.
    #[arg(long, env = "TUBEHARVEST_API_BASE", default_value = DEFAULT_API_BASE)]
    base_url: String,

    /// Rows to print after the export.
    #[arg(long, env = "TUBEHARVEST_PREVIEW", default_value_t = 5)]
    preview: usize,
}

#[derive(clap::Args)]
struct MergeArgs {
    /// Directory holding the per-keyword CSV files.
    dir: PathBuf,

    /// Name of the merged file inside DIR.
    #[arg(short, long, default_value = CONSOLIDATED_FILE_NAME)]
    output: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tubeharvest=info,tubeharvest_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Search(args) => commands::run_search(args).await,
        Command::Merge(args) => commands::run_merge(args),
    }
}
