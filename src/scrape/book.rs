//! Book page parsing: fixed-markup field extraction into the canonical Book.
//!
//! The markup contract follows books.toscrape.com detail pages: one
//! breadcrumb list, one `div.product_main` with the title heading, one
//! `article.product_page` whose first direct-child paragraph (if any) is the
//! description, and one product information table read by row position.

use crate::model::Book;
use crate::scrape::error::ScrapeError;
use scraper::{ElementRef, Html, Selector};

/// Row positions in the product information table. The indices are a contract
/// with the site's fixed table layout; a shorter table fails the page.
pub const UPC_ROW: usize = 0;
pub const PRICE_ROW: usize = 2;
pub const STOCK_ROW: usize = 5;

/// Parse a CSS selector or return a parse error (avoids panics from Selector::parse).
fn parse_selector(sel: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(sel).map_err(|e| ScrapeError::Selector {
        selector: sel.to_string(),
        message: e.to_string(),
    })
}

/// First match for `sel` in the document, or MissingElement naming the anchor.
fn find_first<'a>(
    doc: &'a Html,
    sel: &str,
    element: &'static str,
) -> Result<ElementRef<'a>, ScrapeError> {
    let selector = parse_selector(sel)?;
    doc.select(&selector)
        .next()
        .ok_or(ScrapeError::MissingElement { element })
}

/// Concatenated text content of an element, trimmed.
fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Parse a currency-formatted string (e.g. "£56.13") as its numeric value.
///
/// Everything but ASCII digits and the decimal point is stripped before
/// parsing; no digits, or more than one point, is an error.
pub fn extract_price(text: &str) -> Result<f64, ScrapeError> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned
        .parse::<f64>()
        .map_err(|_| ScrapeError::InvalidNumber {
            field: "price_gbp",
            text: text.to_string(),
        })
}

/// Parse the count out of a free-text availability string
/// (e.g. "In stock (16 available)").
pub fn extract_stock(text: &str) -> Result<u32, ScrapeError> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits
        .parse::<u32>()
        .map_err(|_| ScrapeError::InvalidNumber {
            field: "stock",
            text: text.to_string(),
        })
}

/// Category is the text of the last breadcrumb link.
fn parse_category(doc: &Html) -> Result<String, ScrapeError> {
    let breadcrumb = find_first(doc, "ul.breadcrumb", "breadcrumb list (ul.breadcrumb)")?;
    let link_sel = parse_selector("a")?;
    let last = breadcrumb
        .select(&link_sel)
        .last()
        .ok_or(ScrapeError::MissingElement {
            element: "breadcrumb link (ul.breadcrumb a)",
        })?;
    Ok(text_of(last))
}

fn parse_title(doc: &Html) -> Result<String, ScrapeError> {
    let main = find_first(doc, "div.product_main", "product region (div.product_main)")?;
    let heading_sel = parse_selector("h1")?;
    let heading = main
        .select(&heading_sel)
        .next()
        .ok_or(ScrapeError::MissingElement {
            element: "product heading (div.product_main h1)",
        })?;
    Ok(text_of(heading))
}

/// Description is the first paragraph that is a direct child of the product
/// article. A page without one is valid: the book simply has no description.
/// A page without the article itself is a parse failure.
fn parse_description(doc: &Html) -> Result<Option<String>, ScrapeError> {
    find_first(
        doc,
        "article.product_page",
        "product article (article.product_page)",
    )?;
    let paragraph_sel = parse_selector("article.product_page > p")?;
    Ok(doc.select(&paragraph_sel).next().map(text_of))
}

/// The three fields read out of the product information table.
struct ProductTable {
    upc: String,
    price_gbp: f64,
    stock: u32,
}

fn parse_product_table(doc: &Html) -> Result<ProductTable, ScrapeError> {
    let table = find_first(doc, "table.table", "product information table (table.table)")?;
    let row_sel = parse_selector("tr")?;
    let cell_sel = parse_selector("td")?;
    let rows: Vec<ElementRef<'_>> = table.select(&row_sel).collect();

    let cell_text = |index: usize| -> Result<String, ScrapeError> {
        let row = rows
            .get(index)
            .ok_or(ScrapeError::MissingTableRow { index })?;
        let cell = row
            .select(&cell_sel)
            .next()
            .ok_or(ScrapeError::MissingElement {
                element: "product table cell (td)",
            })?;
        Ok(text_of(cell))
    };

    Ok(ProductTable {
        upc: cell_text(UPC_ROW)?,
        price_gbp: extract_price(&cell_text(PRICE_ROW)?)?,
        stock: extract_stock(&cell_text(STOCK_ROW)?)?,
    })
}

/// Parse one book detail page into the canonical [Book] record.
///
/// Fails on the first extraction that cannot find its anchor or coerce its
/// number; the caller decides whether that skips the page or aborts the run.
pub fn parse_book(doc: &Html) -> Result<Book, ScrapeError> {
    let table = parse_product_table(doc)?;
    Ok(Book {
        upc: table.upc,
        title: parse_title(doc)?,
        category: parse_category(doc)?,
        description: parse_description(doc)?,
        price_gbp: table.price_gbp,
        stock: table.stock,
    })
}
