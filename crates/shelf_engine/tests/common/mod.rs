#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use shelf_core::{BookRecord, PriceQuote, SessionView, Trend};
use shelf_engine::{
    Decoder, DecoderConfig, DecoderError, DetectionSender, EngineEvent, EnrichError,
    MetadataFetcher, PriceFetcher, ViewSink,
};

pub const ISBN: &str = "9780134190440";

pub fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(shelf_logging::initialize_for_tests);
}

#[derive(Default)]
struct FakeDecoderInner {
    fail_with: Option<String>,
    sender: Option<DetectionSender>,
    inits: usize,
    stops: usize,
}

/// Decoder double: codes are pushed in by the test through [`FakeDecoder::emit`].
#[derive(Clone, Default)]
pub struct FakeDecoder {
    inner: Arc<Mutex<FakeDecoderInner>>,
}

impl FakeDecoder {
    pub fn failing(reason: &str) -> Self {
        let decoder = Self::default();
        decoder.inner.lock().unwrap().fail_with = Some(reason.to_string());
        decoder
    }

    /// Publishes `code` if the decoder is started; returns whether it was sent.
    pub fn emit(&self, code: &str) -> bool {
        let inner = self.inner.lock().unwrap();
        match inner.sender.as_ref() {
            Some(tx) => tx.send(code.to_string()).is_ok(),
            None => false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.inner.lock().unwrap().sender.is_some()
    }

    pub fn inits(&self) -> usize {
        self.inner.lock().unwrap().inits
    }

    pub fn stops(&self) -> usize {
        self.inner.lock().unwrap().stops
    }
}

impl Decoder for FakeDecoder {
    fn init(&mut self, _config: &DecoderConfig) -> Result<(), DecoderError> {
        let mut inner = self.inner.lock().unwrap();
        inner.inits += 1;
        match &inner.fail_with {
            Some(reason) => Err(DecoderError::DeviceAcquisitionFailed(reason.clone())),
            None => Ok(()),
        }
    }

    fn start(&mut self, detections: DetectionSender) {
        self.inner.lock().unwrap().sender = Some(detections);
    }

    fn stop(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        inner.sender = None;
        inner.stops += 1;
    }
}

pub fn c_book() -> BookRecord {
    BookRecord::from_source(
        ISBN,
        "The C Programming Language",
        Some("Prentice Hall"),
        Some("1988"),
        None,
    )
}

pub fn fixed_quote() -> PriceQuote {
    PriceQuote {
        new_price: 15000,
        used_price: 8000,
        trend_new: Trend::Up,
        trend_used: Trend::Down,
        new_price_link: "https://books.example/new".to_string(),
        used_price_link: "https://books.example/used".to_string(),
    }
}

/// Metadata double answering with one canned result, optionally after a delay.
pub struct StaticMetadata {
    result: Result<BookRecord, EnrichError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StaticMetadata {
    pub fn ok(book: BookRecord) -> Self {
        Self::new(Ok(book))
    }

    pub fn new(result: Result<BookRecord, EnrichError>) -> Self {
        Self {
            result,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MetadataFetcher for StaticMetadata {
    async fn fetch(&self, _isbn: &str) -> Result<BookRecord, EnrichError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }
}

/// Price double answering with one canned result.
pub struct StaticPrices {
    result: Result<PriceQuote, EnrichError>,
    calls: AtomicUsize,
}

impl StaticPrices {
    pub fn ok(quote: PriceQuote) -> Self {
        Self::new(Ok(quote))
    }

    pub fn new(result: Result<PriceQuote, EnrichError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PriceFetcher for StaticPrices {
    async fn fetch(&self, _isbn: &str) -> Result<PriceQuote, EnrichError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_views(&self) -> Vec<SessionView> {
        self.events
            .lock()
            .unwrap()
            .drain(..)
            .filter_map(|event| match event {
                EngineEvent::ViewChanged(view) => Some(view),
                EngineEvent::Stopped => None,
            })
            .collect()
    }
}

impl ViewSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
