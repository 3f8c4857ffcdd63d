//! Shared error type for catalog scraping: HTTP failures and markup mismatches.

use thiserror::Error;

/// Scrape error covering URL handling, HTTP, and book-page parsing.
///
/// Parsing variants reflect the fixed markup contract of the catalog site:
/// an absent structural anchor or a too-short product table means the page
/// (or the site layout) changed, and that book is skipped.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid URL: {input}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Network error: could not reach {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} when fetching: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body: {source}")]
    BodyRead { source: reqwest::Error },

    #[error("Invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },

    #[error("Element not found: {element}")]
    MissingElement { element: &'static str },

    #[error("Product table has no row {index}; the page layout may have changed")]
    MissingTableRow { index: usize },

    #[error("Invalid numeric literal {text:?} for {field}")]
    InvalidNumber { field: &'static str, text: String },

    #[error("No book links found on listing page: {url}")]
    EmptyCatalog { url: String },
}
