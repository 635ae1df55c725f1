use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_client_config, ConfigOverrides, Deployment, OceanHttpClient};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::OceanChatApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop client for asking questions about the ocean dataset")]
struct Args {
    /// Backend base url; overrides the config file and environment.
    #[arg(long)]
    base_url: Option<String>,
    /// `development` (local backend) or `hosted`.
    #[arg(long)]
    deployment: Option<Deployment>,
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let config = load_client_config(
        args.config.as_deref(),
        &ConfigOverrides {
            base_url: args.base_url,
            deployment: args.deployment,
        },
    )
    .context("failed to resolve backend configuration")?;
    tracing::info!(
        base_url = config.base_url(),
        deployment = config.deployment().label(),
        "starting desktop gui"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, OceanHttpClient::new(config.clone()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Ocean Data Chatbot")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Ocean Data Chatbot",
        options,
        Box::new(move |_cc| Ok(Box::new(OceanChatApp::new(cmd_tx, ui_rx, config)))),
    )
    .map_err(|err| anyhow!("desktop gui exited with error: {err}"))
}
