use std::fmt;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use shelf_core::{AppState, DecoderState, Effect, ExportFormat, ExportOutcome, Msg, StopReason};
use shelf_logging::{shelf_error, shelf_info, shelf_warn};
use tokio::sync::mpsc as async_mpsc;

use crate::decoder::{Decoder, DecoderConfig, DecoderSession, DetectionReceiver};
use crate::export::{export_snapshot, ExportOptions};
use crate::orchestrator::{dispatch, CommitPolicy, EnrichmentOrchestrator};
use crate::sink::{publish_if_dirty, ChannelViewSink, ViewSink};
use crate::{
    EngineEvent, GoogleBooksFetcher, MetadataFetcher, MetadataSettings, PriceFetcher,
    PriceSettings, SyntheticPriceFetcher,
};

/// Clock used to stamp exported documents.
pub type TimestampFn = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    pub metadata: MetadataSettings,
    pub price: PriceSettings,
    pub decoder: DecoderConfig,
    pub commit_policy: CommitPolicy,
    pub scan_timeout: Option<Duration>,
    pub output_dir: PathBuf,
    pub export: ExportOptions,
    pub generated_utc: TimestampFn,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            metadata: MetadataSettings::default(),
            price: PriceSettings::default(),
            decoder: DecoderConfig::default(),
            commit_policy: CommitPolicy::AllOrNothing,
            scan_timeout: None,
            output_dir,
            export: ExportOptions::default(),
            generated_utc: Arc::new(|| "unknown".to_string()),
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("metadata", &self.metadata)
            .field("price", &self.price)
            .field("decoder", &self.decoder)
            .field("commit_policy", &self.commit_policy)
            .field("scan_timeout", &self.scan_timeout)
            .field("output_dir", &self.output_dir)
            .field("export", &self.export)
            .finish_non_exhaustive()
    }
}

/// One scanning session: decoder lifecycle, enrichment and exports over a
/// single [`AppState`].
pub struct ScanEngine<D: Decoder> {
    session: DecoderSession<D>,
    orchestrator: EnrichmentOrchestrator,
    state: AppState,
    config: EngineConfig,
}

impl<D: Decoder> ScanEngine<D> {
    pub fn new(
        config: EngineConfig,
        decoder: D,
        metadata: Arc<dyn MetadataFetcher>,
        prices: Arc<dyn PriceFetcher>,
    ) -> (Self, DetectionReceiver) {
        let (session, detections) = DecoderSession::new(decoder, config.decoder.clone());
        let orchestrator = EnrichmentOrchestrator::new(metadata, prices)
            .with_policy(config.commit_policy)
            .with_scan_timeout(config.scan_timeout);
        let engine = Self {
            session,
            orchestrator,
            state: AppState::new(),
            config,
        };
        (engine, detections)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn decoder_state(&self) -> DecoderState {
        self.session.state()
    }

    pub fn toggle(&mut self, sink: &dyn ViewSink) {
        let msg = match self.session.toggle() {
            Ok(DecoderState::Streaming) => Msg::DecoderStarted,
            Ok(DecoderState::Idle) => Msg::DecoderStopped {
                reason: StopReason::Toggled,
            },
            Err(err) => Msg::DecoderFailed {
                reason: err.to_string(),
            },
        };
        self.apply(msg, sink);
    }

    /// Handles one decode event to completion.
    pub async fn on_detected(&mut self, code: String, sink: &dyn ViewSink) {
        let Some(isbn) = self.session.on_detected(code) else {
            return;
        };
        // The stop is visible before any enrichment status changes.
        self.apply(
            Msg::DecoderStopped {
                reason: StopReason::Detected,
            },
            sink,
        );

        let effects = self
            .orchestrator
            .handle_scan(&mut self.state, &isbn, sink)
            .await;
        self.run_effects(effects, sink);
    }

    pub fn export(&mut self, format: ExportFormat, sink: &dyn ViewSink) {
        self.apply(Msg::ExportClicked(format), sink);
    }

    fn apply(&mut self, msg: Msg, sink: &dyn ViewSink) {
        let effects = dispatch(&mut self.state, msg);
        publish_if_dirty(&mut self.state, sink);
        self.run_effects(effects, sink);
    }

    fn run_effects(&mut self, effects: Vec<Effect>, sink: &dyn ViewSink) {
        for effect in effects {
            match effect {
                Effect::Export { format } => {
                    let stamp = (self.config.generated_utc)();
                    let result = export_snapshot(
                        self.state.snapshot(),
                        format,
                        &self.config.output_dir,
                        &self.config.export,
                        &stamp,
                    )
                    .map(|summary| ExportOutcome {
                        rows: summary.row_count,
                        path: summary.output_path,
                    })
                    .map_err(|err| {
                        shelf_error!("{} export failed: {}", format.label(), err);
                        err.to_string()
                    });
                    self.apply(Msg::ExportFinished { format, result }, sink);
                }
                Effect::Enrich { isbn } => {
                    shelf_warn!("Ignoring enrichment request outside a scan isbn={}", isbn);
                }
            }
        }
    }
}

enum EngineCommand {
    Toggle,
    Export(ExportFormat),
    Shutdown,
}

/// Runs a [`ScanEngine`] on a background thread with a single-threaded runtime.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: Option<JoinHandle<()>>,
}

impl EngineHandle {
    /// Uses Google Books for metadata and synthetic price quotes.
    pub fn new<D: Decoder + 'static>(config: EngineConfig, decoder: D) -> Self {
        let metadata = Arc::new(GoogleBooksFetcher::new(config.metadata.clone()));
        let prices = Arc::new(SyntheticPriceFetcher::new(config.price.clone()));
        Self::with_fetchers(config, decoder, metadata, prices)
    }

    pub fn with_fetchers<D: Decoder + 'static>(
        config: EngineConfig,
        decoder: D,
        metadata: Arc<dyn MetadataFetcher>,
        prices: Arc<dyn PriceFetcher>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker = thread::spawn(move || {
            let sink = ChannelViewSink::new(event_tx);
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    shelf_error!("Failed to start engine runtime: {}", err);
                    sink.emit(EngineEvent::Stopped);
                    return;
                }
            };
            let (engine, detections) = ScanEngine::new(config, decoder, metadata, prices);
            runtime.block_on(run_loop(engine, cmd_rx, detections, &sink));
            sink.emit(EngineEvent::Stopped);
        });

        Self {
            cmd_tx,
            event_rx,
            worker: Some(worker),
        }
    }

    pub fn toggle(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Toggle);
    }

    pub fn export(&self, format: ExportFormat) {
        let _ = self.cmd_tx.send(EngineCommand::Export(format));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Stops the engine loop and waits for the worker thread.
    pub fn shutdown(mut self) {
        self.stop_worker();
    }

    fn stop_worker(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                shelf_error!("Engine worker panicked");
            }
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.stop_worker();
    }
}

async fn run_loop<D: Decoder>(
    mut engine: ScanEngine<D>,
    mut commands: async_mpsc::UnboundedReceiver<EngineCommand>,
    mut detections: DetectionReceiver,
    sink: &dyn ViewSink,
) {
    sink.emit(EngineEvent::ViewChanged(engine.state().view()));
    loop {
        // One message at a time: a detection is handled to completion before
        // the next command or detection is read.
        tokio::select! {
            command = commands.recv() => match command {
                Some(EngineCommand::Toggle) => engine.toggle(sink),
                Some(EngineCommand::Export(format)) => engine.export(format, sink),
                Some(EngineCommand::Shutdown) | None => break,
            },
            Some(code) = detections.recv() => engine.on_detected(code, sink).await,
        }
    }
    shelf_info!("Engine loop stopped");
}
