//! UI layer for the splitter window: app shell, result cards, save dialogs.

pub mod app;
pub mod cards;
pub mod sinks;

pub use app::{SplitterApp, StartupConfig};
