//! Command orchestration helpers from UI actions to backend command queue.

use client_core::ClientError;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the worker. A rejected command comes back as a
/// [`ClientError::Dispatch`] so the caller can settle its pending request.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), ClientError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(ClientError::Dispatch(format!(
            "command queue is full; dropped {cmd_name}"
        ))),
        Err(TrySendError::Disconnected(_)) => Err(ClientError::Dispatch(format!(
            "backend command processor disconnected; dropped {cmd_name}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::domain::RequestId;

    use super::*;

    #[test]
    fn queues_command_when_worker_is_listening() {
        let (tx, rx) = bounded(1);
        dispatch_backend_command(
            &tx,
            BackendCommand::FetchDatasetInfo {
                request_id: RequestId(1),
            },
        )
        .expect("queued");
        assert_eq!(
            rx.try_recv().expect("command"),
            BackendCommand::FetchDatasetInfo {
                request_id: RequestId(1)
            }
        );
    }

    #[test]
    fn full_or_disconnected_queue_is_a_dispatch_error() {
        let (tx, rx) = bounded(1);
        let cmd = || BackendCommand::AskQuestion {
            request_id: RequestId(2),
            question: "salinity?".to_string(),
        };
        dispatch_backend_command(&tx, cmd()).expect("first fits");

        let err = dispatch_backend_command(&tx, cmd()).expect_err("queue full");
        assert!(err.to_string().contains("full"), "unexpected error: {err}");

        drop(rx);
        let err = dispatch_backend_command(&tx, cmd()).expect_err("disconnected");
        assert!(
            matches!(&err, ClientError::Dispatch(message) if message.contains("disconnected")),
            "unexpected error: {err}"
        );
    }
}
