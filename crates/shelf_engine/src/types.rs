use std::fmt;
use std::time::Duration;

use shelf_core::SessionView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Session state changed; re-render.
    ViewChanged(SessionView),
    /// Engine loop exited.
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why a scan produced no catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrichError {
    #[error("no book information found for this ISBN")]
    MetadataNotFound,
    #[error("book data request failed: {0}")]
    MetadataRequestFailed(FetchError),
    #[error("price data request failed: {0}")]
    PriceRequestFailed(String),
    #[error("lookup timed out after {}s", .after.as_secs_f32())]
    TimedOut { after: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecoderError {
    #[error("could not acquire capture device: {0}")]
    DeviceAcquisitionFailed(String),
}
