//! Client side of the PDF page splitter: file validation, the split request
//! state machine, and the result-card view model consumed by front ends.

pub mod codec;
pub mod config;
mod controller;
pub mod error;
pub mod sinks;
pub mod transport;
pub mod types;

pub use config::{load_settings, load_settings_from, ClientSettings};
pub use controller::{RequestState, SplitJob, UploadController};
pub use error::{SplitError, UploadError};
pub use sinks::{ClipboardSink, DirectorySink, DownloadSink, SystemClipboard};
pub use transport::{HttpSplitClient, SplitApi};
pub use types::{CardAction, Notice, NoticeLevel, PageCard, ResultsView, SelectedFile};

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod transport_tests;

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
