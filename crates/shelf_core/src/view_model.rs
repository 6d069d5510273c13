use crate::{CatalogEntry, DecoderState};

/// Column titles shared by the renderer and the exporters.
pub const COLUMN_HEADERS: [&str; 11] = [
    "Cover",
    "Title",
    "ISBN",
    "Publisher",
    "Year",
    "New price",
    "New trend",
    "Used price",
    "Used trend",
    "New price link",
    "Used price link",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionView {
    pub decoder: DecoderState,
    pub toggle_label: &'static str,
    pub last_seen: Option<String>,
    pub busy: bool,
    pub status: Option<String>,
    pub rows: Vec<CatalogRowView>,
}

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRowView {
    pub cover_url: String,
    pub title: String,
    pub isbn: String,
    pub publisher: String,
    pub year: String,
    pub new_price: u32,
    pub trend_new: &'static str,
    pub used_price: u32,
    pub trend_used: &'static str,
    pub new_price_link: String,
    pub used_price_link: String,
}

impl CatalogRowView {
    /// Cells in [`COLUMN_HEADERS`] order.
    pub fn cells(&self) -> [String; 11] {
        [
            self.cover_url.clone(),
            self.title.clone(),
            self.isbn.clone(),
            self.publisher.clone(),
            self.year.clone(),
            self.new_price.to_string(),
            self.trend_new.to_string(),
            self.used_price.to_string(),
            self.trend_used.to_string(),
            self.new_price_link.clone(),
            self.used_price_link.clone(),
        ]
    }
}

impl From<&CatalogEntry> for CatalogRowView {
    fn from(entry: &CatalogEntry) -> Self {
        let book = entry.book();
        let price = entry.price();
        Self {
            cover_url: book.cover_url.clone(),
            title: book.title.clone(),
            isbn: book.isbn.clone(),
            publisher: book.publisher.clone(),
            year: book.year.clone(),
            new_price: price.new_price,
            trend_new: price.trend_new.as_str(),
            used_price: price.used_price,
            trend_used: price.trend_used.as_str(),
            new_price_link: price.new_price_link.clone(),
            used_price_link: price.used_price_link.clone(),
        }
    }
}
