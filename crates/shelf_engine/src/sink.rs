use std::sync::mpsc;

use shelf_core::AppState;

use crate::EngineEvent;

/// Receives engine events as they happen.
pub trait ViewSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelViewSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelViewSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ViewSink for ChannelViewSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Emits a fresh view if `state` changed since the last publish.
pub fn publish_if_dirty(state: &mut AppState, sink: &dyn ViewSink) {
    if state.consume_dirty() {
        sink.emit(EngineEvent::ViewChanged(state.view()));
    }
}
