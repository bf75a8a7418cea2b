//! CLI tool for dt-redirect.
//!
//! Runs the resolver once against the live upstream without starting the
//! server, which is handy for checking credentials and the selection policy.
//!
//! # Usage
//!
//! ```bash
//! # Resolve the current thread
//! cargo run --bin dtctl -- resolve
//!
//! # Resolve and apply a site variant
//! cargo run --bin dtctl -- resolve --path /dt/old
//!
//! # List the candidates the upstream returned
//! cargo run --bin dtctl -- candidates
//!
//! # Show the effective configuration
//! cargo run --bin dtctl -- config
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`dt_redirect::config`].

use dt_redirect::application::services::{ThreadResolver, select_latest};
use dt_redirect::config::{Config, load_from_env, mask_secret};
use dt_redirect::domain::sources::CandidateSource;
use dt_redirect::error::ResolveError;
use dt_redirect::infrastructure::reddit::RedditSource;
use dt_redirect::utils::path_rewrite::rewrite;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for inspecting dt-redirect resolution.
#[derive(Parser)]
#[command(name = "dtctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the current thread once
    Resolve {
        /// Request path whose site variant should be applied (e.g. /dt/old)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// List upstream candidates and whether each passes the filter
    Candidates,

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Resolve { path } => resolve(&config, path).await?,
        Commands::Candidates => candidates(&config).await?,
        Commands::Config => show_config(&config),
    }

    Ok(())
}

fn build_source(config: &Config) -> Result<Arc<RedditSource>> {
    let source = RedditSource::new(config.credentials.clone(), config.upstream_timeout())
        .context("Failed to build Reddit client")?;
    Ok(Arc::new(source))
}

/// Resolves once and prints the URL the server would redirect to when cold.
async fn resolve(config: &Config, path: Option<String>) -> Result<()> {
    let resolver = ThreadResolver::new(build_source(config)?, config.resolver_settings());

    let url = match resolver.try_resolve(Utc::now()).await {
        Ok(url) => {
            println!("{}", "Thread found".green().bold());
            url
        }
        Err(ResolveError::NoMatch { .. }) => {
            println!("{}", "No matching thread, using fallback".yellow().bold());
            config.fallback_url.clone()
        }
        Err(e) => {
            println!("{} {}", "Upstream error:".red().bold(), e);
            config.fallback_url.clone()
        }
    };

    let target = match path {
        Some(p) => rewrite(&url, &p),
        None => url,
    };

    println!("  {}", target.bright_cyan());
    Ok(())
}

/// Prints every candidate with a marker for the one the resolver would pick.
async fn candidates(config: &Config) -> Result<()> {
    let source = build_source(config)?;
    let settings = config.resolver_settings();

    let posts = source
        .search(&settings.community, &settings.title, settings.search_limit)
        .await
        .context("Upstream search failed")?;

    let not_before = settings.not_before(Utc::now());
    let selected = select_latest(&posts, &settings.author, &settings.title, not_before);

    println!(
        "{} {} candidates in r/{}",
        "Found".bright_white().bold(),
        posts.len(),
        settings.community
    );
    println!();

    for post in &posts {
        let marker = if selected.is_some_and(|s| std::ptr::eq(s, post)) {
            "→".green().bold()
        } else {
            " ".normal()
        };
        let author = post.author.as_deref().unwrap_or("[deleted]");
        println!(
            "{} {}  {}  {}",
            marker,
            post.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            author.cyan(),
            post.title
        );
    }

    if selected.is_none() {
        println!();
        println!("{}", "No candidate passes the filter".yellow());
    }

    Ok(())
}

fn show_config(config: &Config) {
    println!("{}", "Configuration".bright_blue().bold());
    println!();
    println!("  Community:      r/{}", config.community.cyan());
    println!("  Author:         u/{}", config.thread_author.cyan());
    println!("  Title contains: {}", config.thread_title.cyan());
    println!("  Fallback:       {}", config.fallback_url);
    println!("  Cache TTL:      {}s", config.cache_ttl_seconds);
    println!("  Recency window: {}h", config.recency_window_hours);
    println!("  Search limit:   {}", config.search_limit);
    println!("  Listen:         {}", config.listen_addr);
    println!(
        "  Client id:      {}",
        mask_secret(&config.credentials.client_id).dimmed()
    );
    println!("  User agent:     {}", config.credentials.user_agent);
}
