//! Events posted from the backend worker back to the UI thread.

use client_core::SplitError;
use shared::protocol::SplitResult;

pub enum UiEvent {
    SplitFinished(Result<SplitResult, SplitError>),
    BackendUnavailable(String),
}
