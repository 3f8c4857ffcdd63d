//! bookscrape: CLI scraper for the books.toscrape.com demo catalog, writing
//! the collected books as CSV and JSONL datasets.

pub mod cli;
pub mod config;
pub mod formats;
pub mod model;
pub mod scrape;

// Re-exports for CLI and consumers.
pub use formats::{write_csv, write_jsonl, FormatError};
pub use model::Book;
pub use scrape::{
    discover_book_urls, extract_price, extract_stock, parse_book, scrape_book, scrape_books,
    CatalogClient, CatalogClientBuilder, ScrapeError, ScrapeFailure, ScrapeOutcome,
};
