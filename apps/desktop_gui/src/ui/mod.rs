//! UI layer for desktop GUI: app shell plus the chat and dataset views.

pub mod app;
mod chat;
mod dataset;

pub use app::OceanChatApp;
