//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! ```bash
//! export REDDIT_CLIENT_ID="..."
//! export REDDIT_CLIENT_SECRET="..."
//! export REDDIT_REFRESH_TOKEN="..."
//! ```
//!
//! ## Optional Variables
//!
//! - `REDDIT_USER_AGENT` - User agent sent upstream (default: `linux:dt_redirect:v1.1 (by /u/jenbanim)`)
//! - `COMMUNITY` - Subreddit to search (default: `neoliberal`)
//! - `THREAD_AUTHOR` - Account that posts the thread (default: `jobautomator`)
//! - `THREAD_TITLE` - Title substring to match (default: `Discussion Thread`)
//! - `FALLBACK_URL` - Redirect target when no thread is known (default: the community front page)
//! - `CACHE_TTL_SECONDS` - How long a resolved thread is reused (default: 60)
//! - `RECENCY_WINDOW_HOURS` - Ignore posts older than this (default: 36)
//! - `SEARCH_LIMIT` - Posts requested per search, 1-100 (default: 25)
//! - `UPSTREAM_TIMEOUT_SECONDS` - Reddit request timeout (default: 10)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use chrono::TimeDelta;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::application::services::ResolverSettings;
use crate::infrastructure::reddit::RedditCredentials;

const DEFAULT_USER_AGENT: &str = "linux:dt_redirect:v1.1 (by /u/jenbanim)";

/// One day.
const MAX_CACHE_TTL_SECONDS: u64 = 86_400;
/// One year.
const MAX_RECENCY_WINDOW_HOURS: u64 = 8_760;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Script-app secrets. `Debug` output masks them.
    pub credentials: RedditCredentials,
    pub community: String,
    pub thread_author: String,
    pub thread_title: String,
    pub fallback_url: String,
    pub cache_ttl_seconds: u64,
    pub recency_window_hours: u64,
    /// Number of posts requested per search. Reddit caps this at 100.
    pub search_limit: u32,
    pub upstream_timeout_seconds: u64,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a Reddit secret is missing.
    pub fn from_env() -> Result<Self> {
        let credentials = Self::load_credentials().context("Failed to load Reddit credentials")?;

        let community = env::var("COMMUNITY").unwrap_or_else(|_| "neoliberal".to_string());
        let thread_author =
            env::var("THREAD_AUTHOR").unwrap_or_else(|_| "jobautomator".to_string());
        let thread_title =
            env::var("THREAD_TITLE").unwrap_or_else(|_| "Discussion Thread".to_string());
        let fallback_url = env::var("FALLBACK_URL")
            .unwrap_or_else(|_| format!("https://www.reddit.com/r/{}", community));

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            credentials,
            community,
            thread_author,
            thread_title,
            fallback_url,
            cache_ttl_seconds: parse_or("CACHE_TTL_SECONDS", 60),
            recency_window_hours: parse_or("RECENCY_WINDOW_HOURS", 36),
            search_limit: parse_or("SEARCH_LIMIT", 25),
            upstream_timeout_seconds: parse_or("UPSTREAM_TIMEOUT_SECONDS", 10),
            listen_addr,
            log_level,
            log_format,
        })
    }

    fn load_credentials() -> Result<RedditCredentials> {
        Ok(RedditCredentials {
            client_id: env::var("REDDIT_CLIENT_ID").context("REDDIT_CLIENT_ID must be set")?,
            client_secret: env::var("REDDIT_CLIENT_SECRET")
                .context("REDDIT_CLIENT_SECRET must be set")?,
            refresh_token: env::var("REDDIT_REFRESH_TOKEN")
                .context("REDDIT_REFRESH_TOKEN must be set")?,
            user_agent: env::var("REDDIT_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a Reddit secret or the user agent is empty
    /// - `fallback_url` is not an absolute http(s) URL
    /// - `cache_ttl_seconds`, `recency_window_hours` or `upstream_timeout_seconds` is 0
    /// - `cache_ttl_seconds` exceeds a day or `recency_window_hours` exceeds a year
    /// - `search_limit` is outside 1-100
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    pub fn validate(&self) -> Result<()> {
        let c = &self.credentials;
        for (name, value) in [
            ("REDDIT_CLIENT_ID", &c.client_id),
            ("REDDIT_CLIENT_SECRET", &c.client_secret),
            ("REDDIT_REFRESH_TOKEN", &c.refresh_token),
            ("REDDIT_USER_AGENT", &c.user_agent),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{} must not be empty", name);
            }
        }

        if self.community.is_empty() || self.community.contains('/') {
            anyhow::bail!(
                "COMMUNITY must be a bare community name, got '{}'",
                self.community
            );
        }

        if self.thread_author.is_empty() || self.thread_title.is_empty() {
            anyhow::bail!("THREAD_AUTHOR and THREAD_TITLE must not be empty");
        }

        let fallback = Url::parse(&self.fallback_url)
            .with_context(|| format!("FALLBACK_URL is not a valid URL: '{}'", self.fallback_url))?;
        if !matches!(fallback.scheme(), "http" | "https") {
            anyhow::bail!(
                "FALLBACK_URL must use http or https, got '{}'",
                self.fallback_url
            );
        }

        if self.cache_ttl_seconds == 0 || self.cache_ttl_seconds > MAX_CACHE_TTL_SECONDS {
            anyhow::bail!(
                "CACHE_TTL_SECONDS must be between 1 and {}, got {}",
                MAX_CACHE_TTL_SECONDS,
                self.cache_ttl_seconds
            );
        }

        if self.recency_window_hours == 0 || self.recency_window_hours > MAX_RECENCY_WINDOW_HOURS {
            anyhow::bail!(
                "RECENCY_WINDOW_HOURS must be between 1 and {}, got {}",
                MAX_RECENCY_WINDOW_HOURS,
                self.recency_window_hours
            );
        }

        if self.search_limit == 0 || self.search_limit > 100 {
            anyhow::bail!(
                "SEARCH_LIMIT must be between 1 and 100, got {}",
                self.search_limit
            );
        }

        if self.upstream_timeout_seconds == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        Ok(())
    }

    /// Cache time-to-live, saturating at [`TimeDelta::MAX`].
    pub fn cache_ttl(&self) -> TimeDelta {
        i64::try_from(self.cache_ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Upstream request timeout.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }

    /// Resolver policy derived from this configuration.
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            community: self.community.clone(),
            author: self.thread_author.clone(),
            title: self.thread_title.clone(),
            recency_window: i64::try_from(self.recency_window_hours)
                .ok()
                .and_then(TimeDelta::try_hours)
                .unwrap_or(TimeDelta::MAX),
            search_limit: self.search_limit,
            fallback_url: self.fallback_url.clone(),
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Reddit client id: {}", mask_secret(&self.credentials.client_id));
        tracing::info!("  User agent: {}", self.credentials.user_agent);
        tracing::info!(
            "  Thread: '{}' by u/{} in r/{}",
            self.thread_title,
            self.thread_author,
            self.community
        );
        tracing::info!("  Fallback: {}", self.fallback_url);
        tracing::info!("  Cache TTL: {}s", self.cache_ttl_seconds);
        tracing::info!("  Recency window: {}h", self.recency_window_hours);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads `name` and parses it, falling back to `default` when unset or invalid.
fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Masks all but the first four characters of a secret for logging.
///
/// - `abcd1234efgh` → `abcd***`
/// - `abc` → `***`
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 4 {
        return "***".to_string();
    }

    let prefix: String = secret.chars().take(4).collect();
    format!("{}***", prefix)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
