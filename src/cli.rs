//! CLI parsing and orchestration. Parses args, runs discovery -> scrape ->
//! CSV + JSONL writers. Maps errors to exit codes.

use crate::config;
use crate::formats::{write_csv, write_jsonl, FormatError};
use crate::scrape::{discover_book_urls, scrape_books, CatalogClient, ScrapeError};
use clap::Parser;
use std::cell::RefCell;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// First listing page of the catalog.
pub const DEFAULT_BASE_URL: &str = "http://books.toscrape.com/";

const CSV_FILE: &str = "results.csv";
const JSONL_FILE: &str = "results.jsonl";

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Scrape(#[from] ScrapeError),

    #[error("{0}")]
    Format(#[from] FormatError),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) => 1,
            CliRunError::Scrape(_) => 2,
            CliRunError::Format(_) => 3,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bookscrape")]
#[command(about = "Scrape the books.toscrape.com catalog and write CSV and JSONL datasets")]
#[command(
    after_help = "Config file keys (output_dir, base_url, user_agent, request_delay_secs, timeout_secs, retry_count, retry_backoff_secs) are documented in the README. CLI flags override config."
)]
pub struct Args {
    /// Catalog root URL (first listing page).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory for results.csv and results.jsonl, created if absent. Default: ./artifacts.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Scrape at most N book pages (applied after discovery).
    #[arg(long)]
    pub limit: Option<usize>,

    /// Suppress progress output (errors only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Print verbose error chain.
    #[arg(long)]
    pub verbose: bool,

    /// HTTP User-Agent (overrides config).
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Delay between requests in seconds (overrides config; default 0).
    #[arg(long)]
    pub delay: Option<u64>,

    /// Request timeout in seconds (overrides config; default 30).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Discover book pages, print the count and output paths, write nothing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    let config = config::load_config().map_err(CliRunError::InvalidInput)?;

    const DEFAULT_DELAY_SECS: u64 = 0;
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_RETRY_COUNT: u32 = 3;

    let base_url = args
        .base_url
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.output_dir.clone()))
        .unwrap_or_else(|| PathBuf::from("artifacts"));
    let delay_secs = args
        .delay
        .or_else(|| config.as_ref().and_then(|c| c.request_delay_secs))
        .unwrap_or(DEFAULT_DELAY_SECS);
    let timeout_secs = args
        .timeout
        .or_else(|| config.as_ref().and_then(|c| c.timeout_secs))
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let retry_count = config
        .as_ref()
        .and_then(|c| c.retry_count)
        .unwrap_or(DEFAULT_RETRY_COUNT)
        .max(1);
    let retry_backoff_secs = config
        .as_ref()
        .and_then(|c| c.retry_backoff_secs.clone())
        .unwrap_or_else(|| vec![1, 2]);
    let user_agent = args
        .user_agent
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.user_agent.clone()));

    let mut builder = CatalogClient::builder()
        .delay_secs(delay_secs)
        .timeout_secs(timeout_secs)
        .retry_count(retry_count)
        .retry_backoff_secs(retry_backoff_secs);
    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }
    let mut client = builder
        .build()
        .map_err(|e| CliRunError::InvalidInput(format!("Failed to create HTTP client: {}", e)))?;

    let mut urls = discover_book_urls(&mut client, &base_url)?;
    if let Some(limit) = args.limit {
        urls.truncate(limit);
    }
    if !args.quiet {
        eprintln!("Discovered {} book page(s)", urls.len());
    }

    let csv_path = output_dir.join(CSV_FILE);
    let jsonl_path = output_dir.join(JSONL_FILE);

    if args.dry_run {
        eprintln!("Output: {}", csv_path.display());
        eprintln!("Output: {}", jsonl_path.display());
        return Ok(());
    }

    let progress_state: RefCell<Option<indicatif::ProgressBar>> = RefCell::new(None);
    let progress_cb = |n: u32, total: u32| {
        if total == 0 {
            return;
        }
        let mut state = progress_state.borrow_mut();
        let pb = state.get_or_insert_with(|| {
            let bar = indicatif::ProgressBar::new(total as u64);
            bar.set_style(
                indicatif::ProgressStyle::default_bar()
                    .template("{spinner} {msg} [{bar:40}] {pos}/{len} ({elapsed})")
                    .unwrap()
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                    .progress_chars("█▉▊▋▌▍▎▏ "),
            );
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });
        pb.set_position(n as u64);
        pb.set_message(format!("Fetching book {}/{}", n, total));
    };
    let progress: Option<&dyn Fn(u32, u32)> = if args.quiet { None } else { Some(&progress_cb) };

    let outcome = scrape_books(&mut client, &urls, progress);

    if let Some(pb) = progress_state.borrow_mut().take() {
        pb.disable_steady_tick();
        pb.finish_and_clear();
    }

    std::fs::create_dir_all(&output_dir).map_err(|e| {
        CliRunError::Format(FormatError::Io {
            path: output_dir.clone(),
            source: e,
        })
    })?;
    write_csv(&outcome.books, &csv_path)?;
    write_jsonl(&outcome.books, &jsonl_path)?;

    if !outcome.failures.is_empty() {
        eprintln!(
            "{} book page(s) skipped due to errors.",
            outcome.failures.len()
        );
    }
    if !args.quiet {
        eprintln!(
            "Wrote {} book(s) to {} and {}",
            outcome.books.len(),
            csv_path.display(),
            jsonl_path.display()
        );
    }
    Ok(())
}
