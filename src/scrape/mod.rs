//! Catalog scraping: shared client, page discovery, book-page parsing, and
//! the per-URL fetch+parse loop.

mod book;
mod catalog;
mod client;
mod error;

pub use book::{extract_price, extract_stock, parse_book, PRICE_ROW, STOCK_ROW, UPC_ROW};
pub use catalog::discover_book_urls;
pub use client::{CatalogClient, CatalogClientBuilder};
pub use error::ScrapeError;

use crate::model::Book;
use scraper::Html;

/// One skipped book page: the URL and the error that stopped its extraction.
#[derive(Debug)]
pub struct ScrapeFailure {
    pub url: String,
    pub error: ScrapeError,
}

/// Result of a scrape run: books in discovery order, plus the pages skipped.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    pub books: Vec<Book>,
    pub failures: Vec<ScrapeFailure>,
}

/// Check response status and read body as UTF-8. Returns body or ScrapeError.
pub(crate) fn check_response(
    response: reqwest::blocking::Response,
    url: &str,
) -> Result<String, ScrapeError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    response.text().map_err(|e| ScrapeError::BodyRead { source: e })
}

/// Fetch one book page and parse it into a [Book].
pub fn scrape_book(client: &mut CatalogClient, url: &str) -> Result<Book, ScrapeError> {
    let response = client.get_with_retry(url).map_err(|e| ScrapeError::Network {
        url: url.to_string(),
        source: e,
    })?;
    let html = check_response(response, url)?;
    let doc = Html::parse_document(&html);
    parse_book(&doc)
}

/// Scrape every URL in order, partitioning per-page results.
///
/// A failing page is reported on stderr with its URL and skipped; it never
/// aborts the run. Successes keep the input order.
pub fn scrape_books(
    client: &mut CatalogClient,
    urls: &[String],
    progress: Option<&dyn Fn(u32, u32)>,
) -> ScrapeOutcome {
    let total = urls.len() as u32;
    let mut outcome = ScrapeOutcome::default();
    for (i, url) in urls.iter().enumerate() {
        if let Some(ref p) = progress {
            p(i as u32 + 1, total);
        }
        match scrape_book(client, url) {
            Ok(book) => outcome.books.push(book),
            Err(error) => {
                eprintln!("Skipping book at {}: {}", url, error);
                outcome.failures.push(ScrapeFailure {
                    url: url.clone(),
                    error,
                });
            }
        }
    }
    outcome
}
