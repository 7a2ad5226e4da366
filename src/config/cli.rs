use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Username whose public profile gets crawled
    #[arg(long, env = "FILMCRAWL_USERNAME", default_value = "s0wcy")]
    pub username: String,

    /// Path to the SQLite database file
    #[arg(long, default_value = "letterunboxd.db")]
    pub database: PathBuf,

    /// Root of the film site
    #[arg(long, default_value = "https://letterboxd.com")]
    pub base_url: String,

    /// Root of the poster image host
    #[arg(long, default_value = "https://a.ltrbxd.com/resized/film-poster")]
    pub poster_base_url: String,

    /// Request timeout in seconds, 0 waits forever
    #[arg(long, default_value_t = 0)]
    pub timeout_secs: u64,

    /// Skip the following/followers crawl
    #[arg(long)]
    pub skip_social: bool,

    /// Skip the watched/watchlist crawl
    #[arg(long)]
    pub skip_profile: bool,

    /// Compare scraped counts with the counters shown on the profile
    #[arg(long)]
    pub verify_counts: bool,

    /// Write a JSON snapshot of the stored user and films to this path
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
