use crate::{AppState, DecoderState, Effect, ExportOutcome, Msg, StatusMessage};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DecoderStarted => {
            state.set_decoder(DecoderState::Streaming, None);
            Vec::new()
        }
        Msg::DecoderStopped { reason } => {
            state.set_decoder(DecoderState::Idle, Some(reason));
            Vec::new()
        }
        Msg::DecoderFailed { reason } => {
            state.set_decoder(DecoderState::Idle, None);
            state.set_status(Some(StatusMessage::DeviceFailed { reason }));
            Vec::new()
        }
        Msg::ScanReceived(isbn) => {
            // Shown even for repeats.
            state.set_last_seen(&isbn);
            if state.is_busy() {
                // The decoder is stopped before each hand-over, so nothing
                // should arrive while a scan is in flight.
                return (state, Vec::new());
            }
            if !state.mark_seen(&isbn) {
                state.set_status(Some(StatusMessage::AlreadyScanned));
                return (state, Vec::new());
            }
            // Membership is recorded before fetching, so failures are terminal
            // for this ISBN within the session.
            state.begin_enrichment(&isbn);
            state.set_status(None);
            vec![Effect::Enrich { isbn }]
        }
        Msg::EnrichmentFinished { isbn, result } => {
            if !state.finish_enrichment(&isbn) {
                return (state, Vec::new());
            }
            let status = match result {
                Ok(entry) => {
                    let title = entry.book().title.clone();
                    state.commit(entry);
                    StatusMessage::Scanned { title }
                }
                Err(reason) => StatusMessage::EnrichmentFailed { reason },
            };
            state.set_status(Some(status));
            Vec::new()
        }
        Msg::ExportClicked(format) => vec![Effect::Export { format }],
        Msg::ExportFinished { format, result } => {
            let status = match result {
                Ok(ExportOutcome { rows, path }) => StatusMessage::Exported { format, rows, path },
                Err(reason) => StatusMessage::ExportFailed { format, reason },
            };
            state.set_status(Some(status));
            Vec::new()
        }
    };

    (state, effects)
}
