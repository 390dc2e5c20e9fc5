use std::time::Duration;

use shared::{domain::PageNumber, error::ProtocolError};
use thiserror::Error;

use crate::types::NoticeLevel;

/// Failure of a single split round trip, before it reaches the controller.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
    #[error("failed to reach split endpoint: {0}")]
    Transport(String),
    #[error("server responded with HTTP {status} and an unreadable body: {reason}")]
    UnexpectedBody { status: u16, reason: String },
    #[error("malformed split response: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("split request timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),
}

impl From<reqwest::Error> for SplitError {
    fn from(err: reqwest::Error) -> Self {
        SplitError::Transport(err.to_string())
    }
}

/// Everything the upload controller can report. None of these leave the
/// controller unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please select a valid PDF file (got '{declared}').")]
    InvalidType { declared: String },
    #[error(
        "File size exceeds {} MB ({size} bytes). Please select a smaller file.",
        .limit / (1024 * 1024)
    )]
    TooLarge { size: u64, limit: u64 },
    #[error("Please select a PDF file first.")]
    NoFileSelected,
    #[error("Error: {0}")]
    RequestFailed(String),
    #[error("Error: {0}")]
    ServerReportedError(String),
    #[error("Error: the split request timed out after {} seconds.", .0.as_secs())]
    RequestTimeout(Duration),
    #[error("Error downloading page {page_number}: {reason}")]
    DownloadDecodeError {
        page_number: PageNumber,
        reason: String,
    },
    #[error("Error copying to clipboard.")]
    ClipboardError { reason: String },
    #[error("A split request is already in progress.")]
    Busy,
    #[error("No split request is in progress.")]
    NoRequestInFlight,
}

impl UploadError {
    pub fn notice_level(&self) -> NoticeLevel {
        match self {
            UploadError::NoFileSelected => NoticeLevel::Warning,
            UploadError::Busy | UploadError::NoRequestInFlight => NoticeLevel::Info,
            _ => NoticeLevel::Danger,
        }
    }
}

impl From<SplitError> for UploadError {
    fn from(err: SplitError) -> Self {
        match err {
            SplitError::Timeout(after) => UploadError::RequestTimeout(after),
            other => UploadError::RequestFailed(other.to_string()),
        }
    }
}
