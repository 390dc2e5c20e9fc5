//! Backend worker: owns the tokio runtime and the HTTP split client.

pub mod commands;
pub mod runtime;
