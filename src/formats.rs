//! Dataset writers: CSV and JSON Lines, one record per book.
//! Consumes the canonical Book list and writes one file per format.

use crate::model::{Book, FIELD_NAMES};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors from the dataset writers.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Failed to write output: {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

fn create_file(path: &Path) -> Result<BufWriter<File>, FormatError> {
    let file = File::create(path).map_err(|e| FormatError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(BufWriter::new(file))
}

/// Write the header row and one row per book, truncating any existing file.
///
/// The header is written unconditionally so an empty run still produces a
/// valid header-only file. A `None` description becomes an empty field.
pub fn write_csv(books: &[Book], path: &Path) -> Result<(), FormatError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(create_file(path)?);
    writer.write_record(FIELD_NAMES)?;
    for book in books {
        writer.serialize(book)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one JSON object per line, truncating any existing file.
///
/// Every line carries all six keys; a `None` description becomes `null`.
pub fn write_jsonl(books: &[Book], path: &Path) -> Result<(), FormatError> {
    let mut out = create_file(path)?;
    for book in books {
        let line = serde_json::to_string(book)?;
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book(description: Option<&str>) -> Book {
        Book {
            upc: "b5ea0b5dabed25a8".to_string(),
            title: "The Secret of Dreadwillow Carse".to_string(),
            category: "Childrens".to_string(),
            description: description.map(String::from),
            price_gbp: 56.13,
            stock: 16,
        }
    }

    fn read_and_remove(path: &Path) -> String {
        let content = std::fs::read_to_string(path).expect("read output file");
        std::fs::remove_file(path).ok();
        content
    }

    #[test]
    fn empty_csv_is_header_only() {
        let path = std::env::temp_dir().join("bookscrape_test_empty.csv");
        write_csv(&[], &path).expect("write csv");
        let content = read_and_remove(&path);
        assert_eq!(content, "upc,title,category,description,price_gbp,stock\n");
    }

    #[test]
    fn csv_rows_follow_the_header_field_order() {
        let path = std::env::temp_dir().join("bookscrape_test_rows.csv");
        write_csv(&[sample_book(Some("A quiet tale."))], &path).expect("write csv");
        let content = read_and_remove(&path);
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("upc,title,category,description,price_gbp,stock")
        );
        assert_eq!(
            lines.next(),
            Some("b5ea0b5dabed25a8,The Secret of Dreadwillow Carse,Childrens,A quiet tale.,56.13,16")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn csv_missing_description_is_an_empty_field() {
        let path = std::env::temp_dir().join("bookscrape_test_nodesc.csv");
        write_csv(&[sample_book(None)], &path).expect("write csv");
        let content = read_and_remove(&path);
        assert!(content
            .lines()
            .nth(1)
            .expect("record row")
            .contains("Childrens,,56.13"));
    }

    #[test]
    fn csv_quotes_fields_containing_commas() {
        let path = std::env::temp_dir().join("bookscrape_test_quote.csv");
        write_csv(&[sample_book(Some("Dark, and stormy."))], &path).expect("write csv");
        let content = read_and_remove(&path);
        assert!(content.contains("\"Dark, and stormy.\""));
    }

    #[test]
    fn empty_jsonl_is_a_zero_line_file() {
        let path = std::env::temp_dir().join("bookscrape_test_empty.jsonl");
        write_jsonl(&[], &path).expect("write jsonl");
        let content = read_and_remove(&path);
        assert!(content.is_empty());
    }

    #[test]
    fn jsonl_has_one_object_per_line_with_all_keys() {
        let path = std::env::temp_dir().join("bookscrape_test_lines.jsonl");
        let books = [sample_book(Some("A quiet tale.")), sample_book(None)];
        write_jsonl(&books, &path).expect("write jsonl");
        let content = read_and_remove(&path);

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            let value: serde_json::Value = serde_json::from_str(line).expect("valid JSON line");
            let obj = value.as_object().expect("object per line");
            assert_eq!(obj.len(), FIELD_NAMES.len());
        }
        assert!(lines[0].contains("\"description\":\"A quiet tale.\""));
        assert!(lines[1].contains("\"description\":null"));
    }

    #[test]
    fn writers_truncate_existing_files() {
        let path = std::env::temp_dir().join("bookscrape_test_truncate.csv");
        write_csv(&[sample_book(None)], &path).expect("first write");
        write_csv(&[], &path).expect("second write");
        let content = read_and_remove(&path);
        assert_eq!(content, "upc,title,category,description,price_gbp,stock\n");
    }

    #[test]
    fn write_to_missing_directory_is_an_io_error() {
        let path = Path::new("/nonexistent_dir_bookscrape_xyz/results.csv");
        assert!(matches!(
            write_csv(&[], path),
            Err(FormatError::Io { .. })
        ));
    }
}
