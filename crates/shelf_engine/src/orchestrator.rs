use std::sync::Arc;
use std::time::Duration;

use shelf_core::{update, AppState, CatalogEntry, Effect, Msg};
use shelf_logging::{shelf_debug, shelf_warn};

use crate::sink::{publish_if_dirty, ViewSink};
use crate::{EnrichError, MetadataFetcher, PriceFetcher};

/// What to store when only some lookups succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    /// A catalog entry is stored only when metadata and price both succeed;
    /// a metadata result is discarded if the price lookup fails.
    #[default]
    AllOrNothing,
}

/// Drives a scan from dedup check through both lookups into the result store.
pub struct EnrichmentOrchestrator {
    metadata: Arc<dyn MetadataFetcher>,
    prices: Arc<dyn PriceFetcher>,
    policy: CommitPolicy,
    scan_timeout: Option<Duration>,
}

impl EnrichmentOrchestrator {
    pub fn new(metadata: Arc<dyn MetadataFetcher>, prices: Arc<dyn PriceFetcher>) -> Self {
        Self {
            metadata,
            prices,
            policy: CommitPolicy::default(),
            scan_timeout: None,
        }
    }

    pub fn with_policy(mut self, policy: CommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bounds the combined metadata and price lookup.
    pub fn with_scan_timeout(mut self, scan_timeout: Option<Duration>) -> Self {
        self.scan_timeout = scan_timeout;
        self
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    /// Processes one decoded code against `state`, publishing each visible
    /// change (busy on, result, busy off) to `sink`.
    ///
    /// Enrichment errors end up in the status line and never escape. Effects
    /// other than enrichment are returned to the caller.
    pub async fn handle_scan(
        &self,
        state: &mut AppState,
        isbn: &str,
        sink: &dyn ViewSink,
    ) -> Vec<Effect> {
        if state.has_seen(isbn) {
            shelf_debug!("Skipping already scanned isbn={}", isbn);
        }
        let effects = dispatch(state, Msg::ScanReceived(isbn.to_string()));
        publish_if_dirty(state, sink);

        let mut pending = Vec::new();
        for effect in effects {
            match effect {
                Effect::Enrich { isbn } => {
                    let result = self.enrich(&isbn).await;
                    if let Err(err) = &result {
                        shelf_warn!("Enrichment failed isbn={}: {}", isbn, err);
                    }
                    pending.extend(dispatch(
                        state,
                        Msg::EnrichmentFinished {
                            isbn,
                            result: result.map_err(|err| err.to_string()),
                        },
                    ));
                    publish_if_dirty(state, sink);
                }
                other => pending.push(other),
            }
        }
        pending
    }

    /// Looks up metadata, then price, and pairs them per the commit policy.
    pub async fn enrich(&self, isbn: &str) -> Result<CatalogEntry, EnrichError> {
        match self.scan_timeout {
            Some(after) => tokio::time::timeout(after, self.lookup(isbn))
                .await
                .map_err(|_| EnrichError::TimedOut { after })?,
            None => self.lookup(isbn).await,
        }
    }

    async fn lookup(&self, isbn: &str) -> Result<CatalogEntry, EnrichError> {
        let book = self.metadata.fetch(isbn).await?;
        let price = self.prices.fetch(isbn).await?;
        match self.policy {
            CommitPolicy::AllOrNothing => Ok(CatalogEntry::new(book, price)),
        }
    }
}

/// Applies `msg` to the session in place.
pub fn dispatch(state: &mut AppState, msg: Msg) -> Vec<Effect> {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    effects
}
