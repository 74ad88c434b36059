//! Command-line and environment configuration.
//!
//! Environment variables are the primary source; a `.env` file in the
//! working directory is loaded first and never overrides what is already
//! set. Each variable is also accepted as a long flag.

use catalog::{FilterRuleSet, MediaType};
use clap::builder::BoolishValueParser;
use clap::{Parser, ValueEnum};
use clients::omdb::DEFAULT_OMDB_URL;
use curator::{CurateConfig, FeedMode};
use std::time::Duration;

/// reel-curate - request well-rated movies and shows from a Seerr instance
#[derive(Parser, Debug)]
#[command(name = "reel-curate", version)]
#[command(about = "Curate popular movies and shows and request them from Jellyseerr", long_about = None)]
pub struct Cli {
    /// Base URL of the Jellyseerr/Overseerr instance
    #[arg(long, env = "SEERR_URL")]
    pub seerr_url: String,

    /// Local account email
    #[arg(long, env = "SEERR_EMAIL")]
    pub seerr_email: String,

    /// Local account password
    #[arg(long, env = "SEERR_PASSWORD", hide_env_values = true)]
    pub seerr_password: String,

    /// Base URL of the OMDb API
    #[arg(long, env = "OMDB_URL", default_value = DEFAULT_OMDB_URL)]
    pub omdb_url: String,

    #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
    pub omdb_api_key: String,

    /// Minimum IMDb rating, inclusive
    #[arg(long, env = "MIN_RATING", default_value_t = 7.0)]
    pub min_rating: f32,

    /// Required original language (ISO 639-1)
    #[arg(long, env = "TARGET_LANGUAGE", default_value = "en")]
    pub target_language: String,

    /// Comma-separated TMDB genre ids to exclude
    #[arg(
        long,
        env = "EXCLUDED_GENRES",
        value_delimiter = ',',
        value_parser = parse_genre_id,
        default_values_t = [99u32, 10767, 10763, 35, 10764]
    )]
    pub excluded_genres: Vec<u32>,

    /// Comma-separated overview keywords to exclude
    #[arg(
        long,
        env = "EXCLUDED_KEYWORDS",
        value_delimiter = ',',
        default_values = ["wrestling", "soap opera", "soap"]
    )]
    pub excluded_keywords: Vec<String>,

    /// Earliest release year, inclusive
    #[arg(long, env = "MIN_YEAR", default_value_t = 2000)]
    pub min_year: i32,

    /// Items to accept per category
    #[arg(long, env = "TARGET_COUNT", default_value_t = 10)]
    pub target_count: usize,

    /// Last discover page to fetch per category
    #[arg(long, env = "MAX_PAGES", default_value_t = 300)]
    pub max_pages: u32,

    /// Submit requests; false only logs what would be requested
    #[arg(
        long,
        env = "ENABLE_REQUESTS",
        default_value_t = true,
        action = clap::ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub enable_requests: bool,

    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// `category` pages each category's feed, `trending` pages the mixed feed
    #[arg(long, env = "FEED_MODE", default_value = "category")]
    pub feed_mode: FeedMode,

    /// Categories in collection order
    #[arg(
        long,
        env = "CATEGORIES",
        value_delimiter = ',',
        default_values = ["movie", "tv"]
    )]
    pub categories: Vec<MediaType>,

    /// Pause between page fetches, in milliseconds
    #[arg(long, env = "PAGE_DELAY_MS", default_value_t = 0)]
    pub page_delay_ms: u64,

    /// Pause after each submitted request, in milliseconds
    #[arg(long, env = "DISPATCH_DELAY_MS", default_value_t = 0)]
    pub dispatch_delay_ms: u64,

    /// Per-request HTTP timeout, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Info,
    #[value(alias = "debug")]
    Verbose,
}

impl LogLevel {
    /// Default tracing filter when `RUST_LOG` is not set.
    pub fn default_filter(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Verbose => {
                "info,catalog=debug,pipeline=debug,clients=debug,curator=debug,reel_curate=debug"
            }
        }
    }
}

fn parse_genre_id(s: &str) -> Result<u32, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("'{}' is not a genre id", s.trim()))
}

impl Cli {
    pub fn rules(&self) -> FilterRuleSet {
        FilterRuleSet::new(
            self.min_year,
            self.target_language.trim(),
            self.excluded_genres.iter().copied(),
            &self.excluded_keywords,
            self.min_rating,
        )
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Session configuration, validated.
    pub fn curate_config(&self) -> catalog::Result<CurateConfig> {
        CurateConfig {
            rules: self.rules(),
            target_count: self.target_count,
            max_pages: self.max_pages,
            feed_mode: self.feed_mode,
            categories: self.categories.clone(),
            requests_enabled: self.enable_requests,
            page_delay: Duration::from_millis(self.page_delay_ms),
            dispatch_delay: Duration::from_millis(self.dispatch_delay_ms),
        }
        .validated()
    }
}
