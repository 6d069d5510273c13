use std::time::Duration;

use rand::Rng;
use shelf_core::{PriceQuote, Trend};
use shelf_logging::shelf_debug;

use crate::EnrichError;

/// Half-open ranges the synthetic quotes are drawn from.
pub const NEW_PRICE_RANGE: std::ops::Range<u32> = 10_000..30_000;
pub const USED_PRICE_RANGE: std::ops::Range<u32> = 5_000..20_000;

const ISBN_PLACEHOLDER: &str = "{isbn}";

#[derive(Debug, Clone)]
pub struct PriceSettings {
    pub min_delay: Duration,
    pub max_delay: Duration,
    /// Link templates; `{isbn}` is replaced by the scanned code.
    pub new_price_link_template: String,
    pub used_price_link_template: String,
}

impl Default for PriceSettings {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(3000),
            new_price_link_template:
                "https://books.google.cl/books?vid=ISBN{isbn}&sitesec=buy&hl=es&source=gbs_atb"
                    .to_string(),
            used_price_link_template: "https://www.buscalibre.cl/libros/search/?q={isbn}"
                .to_string(),
        }
    }
}

impl PriceSettings {
    /// No artificial latency; for tests and offline runs.
    pub fn immediate() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Quotes new and used prices for an ISBN.
#[async_trait::async_trait]
pub trait PriceFetcher: Send + Sync {
    async fn fetch(&self, isbn: &str) -> Result<PriceQuote, EnrichError>;
}

/// Stateless random quote generator standing in for a price service.
#[derive(Debug, Clone, Default)]
pub struct SyntheticPriceFetcher {
    settings: PriceSettings,
}

impl SyntheticPriceFetcher {
    pub fn new(settings: PriceSettings) -> Self {
        Self { settings }
    }

    fn pick_delay(&self, rng: &mut impl Rng) -> Duration {
        let PriceSettings {
            min_delay,
            max_delay,
            ..
        } = self.settings;
        if max_delay > min_delay {
            rng.gen_range(min_delay..max_delay)
        } else {
            min_delay
        }
    }
}

#[async_trait::async_trait]
impl PriceFetcher for SyntheticPriceFetcher {
    async fn fetch(&self, isbn: &str) -> Result<PriceQuote, EnrichError> {
        let delay = self.pick_delay(&mut rand::thread_rng());
        shelf_debug!("Quoting prices isbn={} delay_ms={}", isbn, delay.as_millis());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(sample_quote(&mut rand::thread_rng(), isbn, &self.settings))
    }
}

/// Draws one quote: uniform prices in [`NEW_PRICE_RANGE`] / [`USED_PRICE_RANGE`],
/// each trend up with probability one half.
pub fn sample_quote(rng: &mut impl Rng, isbn: &str, settings: &PriceSettings) -> PriceQuote {
    PriceQuote {
        new_price: rng.gen_range(NEW_PRICE_RANGE),
        used_price: rng.gen_range(USED_PRICE_RANGE),
        trend_new: Trend::from_rising(rng.gen_bool(0.5)),
        trend_used: Trend::from_rising(rng.gen_bool(0.5)),
        new_price_link: settings
            .new_price_link_template
            .replace(ISBN_PLACEHOLDER, isbn),
        used_price_link: settings
            .used_price_link_template
            .replace(ISBN_PLACEHOLDER, isbn),
    }
}
