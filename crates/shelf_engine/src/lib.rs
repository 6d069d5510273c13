//! Shelf engine: capture, lookup and export IO around the core session.
mod decoder;
mod engine;
mod export;
mod metadata;
mod orchestrator;
mod persist;
mod price;
mod sink;
mod types;

pub use decoder::{
    Decoder, DecoderConfig, DecoderSession, DetectionReceiver, DetectionSender, FacingMode,
    Symbology,
};
pub use engine::{EngineConfig, EngineHandle, ScanEngine, TimestampFn};
pub use export::{export_snapshot, ExportError, ExportOptions, ExportSummary};
pub use metadata::{GoogleBooksFetcher, MetadataFetcher, MetadataSettings, GOOGLE_BOOKS_VOLUMES_URL};
pub use orchestrator::{dispatch, CommitPolicy, EnrichmentOrchestrator};
pub use persist::{ensure_output_dir, AtomicFileWriter, PendingExport, PersistError};
pub use price::{
    sample_quote, PriceFetcher, PriceSettings, SyntheticPriceFetcher, NEW_PRICE_RANGE,
    USED_PRICE_RANGE,
};
pub use sink::{publish_if_dirty, ChannelViewSink, ViewSink};
pub use types::{DecoderError, EngineEvent, EnrichError, FailureKind, FetchError};
