//! Canonical data model for scraped catalog entries.
//!
//! The scraper produces this shape; both writers consume it. Field order here
//! is the output column order.

use serde::{Deserialize, Serialize};

/// CSV header and canonical field order for [Book].
pub const FIELD_NAMES: [&str; 6] = [
    "upc",
    "title",
    "category",
    "description",
    "price_gbp",
    "stock",
];

/// One book from the catalog.
///
/// Every serialized record carries all six keys. `description` is `None` for
/// books whose page has no description paragraph; the writers render that as
/// an empty CSV field and a JSON `null`, never as a missing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub upc: String,
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub price_gbp: f64,
    pub stock: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn sample_book() -> Book {
        Book {
            upc: "b5ea0b5dabed25a8".to_string(),
            title: "The Secret of Dreadwillow Carse".to_string(),
            category: "Childrens".to_string(),
            description: Some("In the peaceful kingdom of Monarchy...".to_string()),
            price_gbp: 56.13,
            stock: 16,
        }
    }

    #[test]
    fn book_serializes_with_exactly_the_six_keys() -> Result<(), Box<dyn Error>> {
        let value = serde_json::to_value(sample_book())?;
        let obj = value.as_object().expect("root must be object");
        assert_eq!(obj.len(), FIELD_NAMES.len());
        for key in FIELD_NAMES {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        assert_eq!(obj["upc"].as_str(), Some("b5ea0b5dabed25a8"));
        assert_eq!(obj["price_gbp"].as_f64(), Some(56.13));
        assert_eq!(obj["stock"].as_u64(), Some(16));
        Ok(())
    }

    #[test]
    fn missing_description_serializes_as_null_not_omitted() -> Result<(), Box<dyn Error>> {
        let mut book = sample_book();
        book.description = None;
        let value = serde_json::to_value(&book)?;
        let obj = value.as_object().expect("root must be object");
        assert!(obj.contains_key("description"));
        assert!(obj["description"].is_null());
        Ok(())
    }

    #[test]
    fn book_round_trips_through_json() -> Result<(), Box<dyn Error>> {
        let book = sample_book();
        let json = serde_json::to_string(&book)?;
        let parsed: Book = serde_json::from_str(&json)?;
        assert_eq!(parsed, book);
        Ok(())
    }
}
