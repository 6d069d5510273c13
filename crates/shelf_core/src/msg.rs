use std::path::PathBuf;

use crate::{CatalogEntry, ExportFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// User switched the camera off.
    Toggled,
    /// A decode event shut the camera off.
    Detected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub rows: usize,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Capture device acquired and decoder attached.
    DecoderStarted,
    /// Capture device released.
    DecoderStopped { reason: StopReason },
    /// Capture device could not be acquired.
    DecoderFailed { reason: String },
    /// A decoded code handed over for enrichment.
    ScanReceived(String),
    /// Enrichment result for the in-flight ISBN.
    EnrichmentFinished {
        isbn: String,
        result: Result<CatalogEntry, String>,
    },
    /// User asked for an export.
    ExportClicked(ExportFormat),
    /// Export completion.
    ExportFinished {
        format: ExportFormat,
        result: Result<ExportOutcome, String>,
    },
}
