//! Keyboard-wedge barcode scanner: the scanner types the code followed by
//! Enter, and stdin lines that look like ISBNs are published as detections.

use std::sync::{Arc, Mutex};

use shelf_engine::{Decoder, DecoderConfig, DecoderError, DetectionSender};
use shelf_logging::{shelf_debug, shelf_info};

#[derive(Debug, Clone, Default)]
pub(crate) struct WedgeDecoder {
    target: Arc<Mutex<Option<DetectionSender>>>,
}

impl WedgeDecoder {
    /// Publishes `code` while started. Returns false when the scanner is off.
    pub(crate) fn publish(&self, code: &str) -> bool {
        let Ok(target) = self.target.lock() else {
            return false;
        };
        match target.as_ref() {
            Some(tx) => tx.send(code.to_string()).is_ok(),
            None => {
                shelf_debug!("Ignoring code {} while scanner is off", code);
                false
            }
        }
    }

    fn set_target(&self, target: Option<DetectionSender>) {
        if let Ok(mut guard) = self.target.lock() {
            *guard = target;
        }
    }
}

impl Decoder for WedgeDecoder {
    fn init(&mut self, config: &DecoderConfig) -> Result<(), DecoderError> {
        if self.target.is_poisoned() {
            return Err(DecoderError::DeviceAcquisitionFailed(
                "scanner input lock poisoned".to_string(),
            ));
        }
        shelf_info!("Keyboard scanner ready for {:?}", config.symbologies);
        Ok(())
    }

    fn start(&mut self, detections: DetectionSender) {
        self.set_target(Some(detections));
    }

    fn stop(&mut self) {
        self.set_target(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::DecoderState;
    use shelf_engine::DecoderSession;

    #[test]
    fn publishes_only_while_streaming() {
        let wedge = WedgeDecoder::default();
        let (mut session, mut rx) = DecoderSession::new(wedge.clone(), DecoderConfig::default());

        assert!(!wedge.publish("9780134190440"));

        assert_eq!(session.toggle(), Ok(DecoderState::Streaming));
        assert!(wedge.publish("9780134190440"));
        assert_eq!(rx.try_recv().ok(), Some("9780134190440".to_string()));

        assert_eq!(session.toggle(), Ok(DecoderState::Idle));
        assert!(!wedge.publish("9780134190440"));
    }
}
