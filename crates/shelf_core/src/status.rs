use std::fmt;
use std::path::PathBuf;

use crate::ExportFormat;

/// User-facing status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    AlreadyScanned,
    Scanned { title: String },
    EnrichmentFailed { reason: String },
    DeviceFailed { reason: String },
    Exported {
        format: ExportFormat,
        rows: usize,
        path: PathBuf,
    },
    ExportFailed { format: ExportFormat, reason: String },
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::AlreadyScanned => write!(f, "This book has already been scanned."),
            StatusMessage::Scanned { title } => write!(f, "Book scanned successfully: {title}"),
            StatusMessage::EnrichmentFailed { reason } => {
                write!(f, "Error fetching book data: {reason}")
            }
            StatusMessage::DeviceFailed { reason } => {
                write!(f, "Error starting the camera: {reason}")
            }
            StatusMessage::Exported { format, rows, path } => write!(
                f,
                "Exported {rows} row(s) as {} to {}",
                format.label(),
                path.display()
            ),
            StatusMessage::ExportFailed { format, reason } => {
                write!(f, "{} export failed: {reason}", format.label())
            }
        }
    }
}
