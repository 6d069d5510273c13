//! Shelf core: pure scan-session state machine and view-model helpers.
mod dedupe;
mod effect;
mod isbn;
mod msg;
mod record;
mod state;
mod status;
mod store;
mod update;
mod view_model;

pub use dedupe::ScanDeduplicator;
pub use effect::Effect;
pub use isbn::{format_isbn, is_isbn13};
pub use msg::{ExportOutcome, Msg, StopReason};
pub use record::{
    BookRecord, CatalogEntry, PriceQuote, Trend, NOT_AVAILABLE, PLACEHOLDER_COVER_URL,
};
pub use state::{AppState, DecoderState, ExportFormat};
pub use status::StatusMessage;
pub use store::{ResultStore, Snapshot};
pub use update::update;
pub use view_model::{CatalogRowView, SessionView, COLUMN_HEADERS};
