use crate::view_model::{CatalogRowView, SessionView};
use crate::{CatalogEntry, ResultStore, ScanDeduplicator, Snapshot, StatusMessage, StopReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    #[default]
    Idle,
    Streaming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Spreadsheet,
    Document,
}

impl ExportFormat {
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "spreadsheet",
            ExportFormat::Document => "document",
        }
    }
}

/// All mutable state of one scanning session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    decoder: DecoderState,
    last_stop: Option<StopReason>,
    dedup: ScanDeduplicator,
    store: ResultStore,
    last_seen: Option<String>,
    status: Option<StatusMessage>,
    in_flight: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> SessionView {
        let toggle_label = match (self.decoder, self.last_stop) {
            (DecoderState::Streaming, _) => "Deactivate camera",
            (DecoderState::Idle, Some(StopReason::Detected)) => "Activate again",
            (DecoderState::Idle, _) => "Activate camera",
        };

        SessionView {
            decoder: self.decoder,
            toggle_label,
            last_seen: self.last_seen.clone(),
            busy: self.is_busy(),
            status: self.status.as_ref().map(ToString::to_string),
            rows: self.store.snapshot().iter().map(CatalogRowView::from).collect(),
        }
    }

    pub fn decoder(&self) -> DecoderState {
        self.decoder
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn last_seen(&self) -> Option<&str> {
        self.last_seen.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_seen(&self, isbn: &str) -> bool {
        self.dedup.has(isbn)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.store.snapshot()
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_decoder(&mut self, decoder: DecoderState, stop: Option<StopReason>) {
        self.decoder = decoder;
        if stop.is_some() {
            self.last_stop = stop;
        }
        self.mark_dirty();
    }

    pub(crate) fn set_status(&mut self, status: Option<StatusMessage>) {
        self.status = status;
        self.mark_dirty();
    }

    pub(crate) fn set_last_seen(&mut self, isbn: &str) {
        self.last_seen = Some(isbn.to_string());
        self.mark_dirty();
    }

    /// Records `isbn` as seen. Returns false for a repeat.
    pub(crate) fn mark_seen(&mut self, isbn: &str) -> bool {
        self.dedup.add(isbn)
    }

    pub(crate) fn begin_enrichment(&mut self, isbn: &str) {
        self.in_flight = Some(isbn.to_string());
        self.mark_dirty();
    }

    /// Clears the busy marker if `isbn` is the one in flight.
    pub(crate) fn finish_enrichment(&mut self, isbn: &str) -> bool {
        if self.in_flight.as_deref() != Some(isbn) {
            return false;
        }
        self.in_flight = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn commit(&mut self, entry: CatalogEntry) {
        self.store.insert(entry);
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
