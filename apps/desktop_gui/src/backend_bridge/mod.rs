//! Worker side of the UI: command queue intake and the tokio runtime that runs requests.

pub mod commands;
pub mod runtime;
