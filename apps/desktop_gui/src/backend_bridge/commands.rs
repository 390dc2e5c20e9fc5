//! Backend commands queued from UI to backend worker.

use client_core::SplitJob;

pub enum BackendCommand {
    Split(SplitJob),
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Split(_) => "split",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
