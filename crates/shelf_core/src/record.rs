use std::fmt;

use crate::isbn::format_isbn;

/// Placeholder for bibliographic fields the metadata source left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Generic cover image used when the metadata source has no thumbnail.
pub const PLACEHOLDER_COVER_URL: &str = "https://via.placeholder.com/60x90.png?text=No+Cover";

/// Bibliographic metadata for one scanned book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    /// Display form of the ISBN (hyphenated when it has 13 digits).
    pub isbn: String,
    pub title: String,
    pub publisher: String,
    pub year: String,
    pub cover_url: String,
}

impl BookRecord {
    /// Shapes raw metadata fields into a record, substituting placeholders
    /// for missing publisher, year and cover.
    pub fn from_source(
        isbn: &str,
        title: impl Into<String>,
        publisher: Option<&str>,
        published_date: Option<&str>,
        cover_url: Option<&str>,
    ) -> Self {
        Self {
            isbn: format_isbn(isbn),
            title: title.into(),
            publisher: non_empty(publisher).unwrap_or(NOT_AVAILABLE).to_string(),
            year: non_empty(published_date)
                .map(leading_year)
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            cover_url: non_empty(cover_url)
                .unwrap_or(PLACEHOLDER_COVER_URL)
                .to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// publishedDate arrives as "1988", "1988-04" or "1988-04-01".
fn leading_year(date: &str) -> &str {
    match date.char_indices().nth(4) {
        Some((end, _)) => &date[..end],
        None => date,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn from_rising(rising: bool) -> Self {
        if rising {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// New and used price quotes for one ISBN, in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub new_price: u32,
    pub used_price: u32,
    pub trend_new: Trend,
    pub trend_used: Trend,
    pub new_price_link: String,
    pub used_price_link: String,
}

/// One completed scan: metadata paired with a price quote.
///
/// Only constructed once both fetches succeeded; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    book: BookRecord,
    price: PriceQuote,
}

impl CatalogEntry {
    pub fn new(book: BookRecord, price: PriceQuote) -> Self {
        Self { book, price }
    }

    pub fn book(&self) -> &BookRecord {
        &self.book
    }

    pub fn price(&self) -> &PriceQuote {
        &self.price
    }
}
