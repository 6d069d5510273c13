use shelf_core::DecoderState;
use shelf_logging::{shelf_info, shelf_warn};
use tokio::sync::mpsc;

use crate::DecoderError;

/// Publishing end of the decode-event channel handed to a started decoder.
pub type DetectionSender = mpsc::UnboundedSender<String>;
pub type DetectionReceiver = mpsc::UnboundedReceiver<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    Environment,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    Ean13,
    Ean8,
    UpcA,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    pub width: u32,
    pub height: u32,
    pub facing_mode: FacingMode,
    pub symbologies: Vec<Symbology>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 480,
            facing_mode: FacingMode::Environment,
            symbologies: vec![Symbology::Ean13],
        }
    }
}

/// Capture device plus barcode recognizer.
///
/// Once started, every recognized code is sent on the given channel until
/// [`Decoder::stop`] is called.
pub trait Decoder: Send {
    fn init(&mut self, config: &DecoderConfig) -> Result<(), DecoderError>;
    fn start(&mut self, detections: DetectionSender);
    fn stop(&mut self);
}

/// Owns the decoder and its Idle/Streaming lifecycle.
pub struct DecoderSession<D: Decoder> {
    decoder: D,
    config: DecoderConfig,
    state: DecoderState,
    detections: DetectionSender,
}

impl<D: Decoder> DecoderSession<D> {
    /// Creates an idle session and the receiving end of its decode events.
    pub fn new(decoder: D, config: DecoderConfig) -> (Self, DetectionReceiver) {
        let (detections, rx) = mpsc::unbounded_channel();
        let session = Self {
            decoder,
            config,
            state: DecoderState::Idle,
            detections,
        };
        (session, rx)
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Idle: acquire the device and start streaming. Streaming: release it.
    ///
    /// On acquisition failure the session stays Idle.
    pub fn toggle(&mut self) -> Result<DecoderState, DecoderError> {
        match self.state {
            DecoderState::Idle => {
                if let Err(err) = self.acquire() {
                    shelf_warn!("Decoder acquisition failed: {}", err);
                    return Err(err);
                }
                self.decoder.start(self.detections.clone());
                self.state = DecoderState::Streaming;
                shelf_info!(
                    "Decoder streaming {}x{} facing={:?}",
                    self.config.width,
                    self.config.height,
                    self.config.facing_mode
                );
            }
            DecoderState::Streaming => {
                self.release();
            }
        }
        Ok(self.state)
    }

    /// Stops the decoder before handing `code` on, so at most one detection
    /// is ever processed. Codes arriving while Idle are stale and dropped.
    pub fn on_detected(&mut self, code: String) -> Option<String> {
        if self.state != DecoderState::Streaming {
            shelf_warn!("Dropping stale detection {}", code);
            return None;
        }
        self.release();
        shelf_info!("Detected code {}", code);
        Some(code)
    }

    fn acquire(&mut self) -> Result<(), DecoderError> {
        if self.config.symbologies.is_empty() {
            return Err(DecoderError::DeviceAcquisitionFailed(
                "no symbologies configured".to_string(),
            ));
        }
        self.decoder.init(&self.config)
    }

    fn release(&mut self) {
        self.decoder.stop();
        self.state = DecoderState::Idle;
        shelf_info!("Decoder released");
    }
}

impl<D: Decoder> Drop for DecoderSession<D> {
    fn drop(&mut self) {
        if self.state == DecoderState::Streaming {
            self.release();
        }
    }
}
