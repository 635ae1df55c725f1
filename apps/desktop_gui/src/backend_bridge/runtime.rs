//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{DatasetInfoApi, OceanHttpClient, QueryApi};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, api: OceanHttpClient) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                    "Backend worker failed to start: {err}"
                )));
                return;
            }
        };

        let api = Arc::new(api);
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        // Each command runs as its own task so the two views never wait on each other.
        while let Ok(cmd) = cmd_rx.recv() {
            let api = Arc::clone(&api);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                let event = execute(api.as_ref(), cmd).await;
                publish(&ui_tx, event);
            });
        }
        tracing::debug!("command queue closed; backend worker exiting");
    });
}

pub async fn execute<A>(api: &A, cmd: BackendCommand) -> UiEvent
where
    A: QueryApi + DatasetInfoApi + ?Sized,
{
    match cmd {
        BackendCommand::AskQuestion {
            request_id,
            question,
        } => UiEvent::QueryResolved {
            request_id,
            outcome: api.ask(&question).await,
        },
        BackendCommand::FetchDatasetInfo { request_id } => UiEvent::DatasetInfoResolved {
            request_id,
            outcome: api.dataset_info().await,
        },
    }
}

/// Hands a result to the UI. A full queue blocks this task until the UI
/// drains it; results are never dropped while the UI is alive.
fn publish(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            tracing::debug!(event = event.name(), "ui event queue full; waiting for capacity");
            if tokio::task::block_in_place(|| ui_tx.send(event)).is_err() {
                tracing::debug!("ui event queue closed");
            }
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event queue closed");
        }
    }
}
