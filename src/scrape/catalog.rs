//! Catalog discovery: walk the paginated listing and collect every book page URL.

use crate::scrape::check_response;
use crate::scrape::client::CatalogClient;
use crate::scrape::error::ScrapeError;
use reqwest::Url;
use scraper::{Html, Selector};

/// Parse a CSS selector or return a parse error (avoids panics from Selector::parse).
fn parse_selector(sel: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(sel).map_err(|e| ScrapeError::Selector {
        selector: sel.to_string(),
        message: e.to_string(),
    })
}

fn join_href(page_url: &Url, href: &str) -> Result<Url, ScrapeError> {
    page_url.join(href).map_err(|e| ScrapeError::InvalidUrl {
        input: href.to_string(),
        reason: e.to_string(),
    })
}

/// Book links and the next-page link on one listing page, hrefs resolved
/// against the page's own URL.
fn parse_listing(html: &str, page_url: &Url) -> Result<(Vec<String>, Option<Url>), ScrapeError> {
    let doc = Html::parse_document(html);
    let book_sel = parse_selector("article.product_pod h3 a")?;
    let next_sel = parse_selector("li.next a")?;

    let mut books = Vec::new();
    for link in doc.select(&book_sel) {
        let href = link
            .value()
            .attr("href")
            .ok_or(ScrapeError::MissingElement {
                element: "book link href (article.product_pod h3 a)",
            })?;
        books.push(join_href(page_url, href)?.to_string());
    }

    let next = match doc.select(&next_sel).next() {
        Some(link) => {
            let href = link
                .value()
                .attr("href")
                .ok_or(ScrapeError::MissingElement {
                    element: "next page href (li.next a)",
                })?;
            Some(join_href(page_url, href)?)
        }
        None => None,
    };

    Ok((books, next))
}

/// Walk listing pages from `base_url`, following the next-page link until it
/// is absent. Returns every book page URL in discovery order.
///
/// Any fetch or parse failure here is fatal: without the full URL list there
/// is nothing to scrape.
pub fn discover_book_urls(
    client: &mut CatalogClient,
    base_url: &str,
) -> Result<Vec<String>, ScrapeError> {
    let start = Url::parse(base_url).map_err(|e| ScrapeError::InvalidUrl {
        input: base_url.to_string(),
        reason: e.to_string(),
    })?;

    let mut urls = Vec::new();
    let mut next = Some(start);
    while let Some(page_url) = next {
        let page_str = page_url.to_string();
        let response = client
            .get_with_retry(&page_str)
            .map_err(|e| ScrapeError::Network {
                url: page_str.clone(),
                source: e,
            })?;
        let html = check_response(response, &page_str)?;
        let (books, following) = parse_listing(&html, &page_url)?;
        urls.extend(books);
        next = following;
    }

    if urls.is_empty() {
        return Err(ScrapeError::EmptyCatalog {
            url: base_url.to_string(),
        });
    }
    Ok(urls)
}
