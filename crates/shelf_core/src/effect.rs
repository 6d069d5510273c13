use crate::ExportFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch metadata and price for a newly seen ISBN.
    Enrich { isbn: String },
    /// Write the current table in `format`.
    Export { format: ExportFormat },
}
