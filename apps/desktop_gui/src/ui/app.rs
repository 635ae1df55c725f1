use std::time::Duration;

use arboard::Clipboard;
use chrono::{DateTime, Local};
use client_core::{
    ClientConfig, ClipboardSink, DatasetInfoController, LoadStatus, QueryController,
};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::RequestId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::chat::{show_chat, ChatAction};
use crate::ui::dataset::{show_dataset, DatasetAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Chat,
    Dataset,
}

/// System clipboard via `arboard`; a fresh handle per copy.
struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        Clipboard::new()?.set_text(text)?;
        Ok(())
    }
}

pub struct OceanChatApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    config: ClientConfig,

    view: AppView,
    query: QueryController,
    dataset: DatasetInfoController,
    dataset_fetched_at: Option<DateTime<Local>>,

    status: String,
}

impl OceanChatApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        config: ClientConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            query: QueryController::new(&config),
            dataset: DatasetInfoController::new(&config),
            dataset_fetched_at: None,
            view: AppView::Chat,
            status: "Backend worker starting...".to_string(),
            config,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::WorkerFailed(message) => {
                    tracing::error!("{message}");
                    self.status = message;
                }
                UiEvent::QueryResolved {
                    request_id,
                    outcome,
                } => {
                    self.query.apply_answer(request_id, outcome);
                }
                UiEvent::DatasetInfoResolved {
                    request_id,
                    outcome,
                } => {
                    if self.dataset.apply_fetch(request_id, outcome)
                        && self.dataset.status() == LoadStatus::Loaded
                    {
                        self.dataset_fetched_at = Some(Local::now());
                    }
                }
            }
        }
    }

    fn submit_query(&mut self) {
        let Some(pending) = self.query.submit_query() else {
            return;
        };
        let request_id = pending.request_id;
        if let Err(err) = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::AskQuestion {
                request_id,
                question: pending.question,
            },
        ) {
            self.query.apply_answer(request_id, Err(err));
        }
    }

    fn copy_answer(&mut self) {
        if self.query.copy_answer(&mut SystemClipboard) {
            self.status = "Answer copied to clipboard".to_string();
        }
    }

    fn handle_chat_action(&mut self, action: ChatAction) {
        match action {
            ChatAction::Submit => self.submit_query(),
            ChatAction::SelectSample(index) => {
                self.query.select_sample_query(index);
            }
            ChatAction::Clear => {
                self.query.clear_session();
            }
            ChatAction::CopyAnswer => self.copy_answer(),
        }
    }

    fn switch_view(&mut self, next: AppView) {
        if self.view == next {
            return;
        }
        match next {
            AppView::Dataset => self.mount_dataset_view(),
            AppView::Chat => {
                self.dataset.unmount();
                self.dataset_fetched_at = None;
            }
        }
        self.view = next;
    }

    fn mount_dataset_view(&mut self) {
        let pending = self.dataset.on_mount();
        self.dataset_fetched_at = None;
        self.fetch_dataset_info(pending.request_id);
    }

    fn refresh_dataset(&mut self) {
        if let Some(pending) = self.dataset.refresh() {
            self.fetch_dataset_info(pending.request_id);
        }
    }

    fn fetch_dataset_info(&mut self, request_id: RequestId) {
        if let Err(err) = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchDatasetInfo { request_id },
        ) {
            self.dataset.apply_fetch(request_id, Err(err));
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        let mut next_view = None;
        egui::TopBottomPanel::top("app_top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .selectable_label(self.view == AppView::Chat, "Chat")
                    .clicked()
                {
                    next_view = Some(AppView::Chat);
                }
                if ui
                    .selectable_label(self.view == AppView::Dataset, "Dataset")
                    .clicked()
                {
                    next_view = Some(AppView::Dataset);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!(
                        "{} · {}",
                        self.config.deployment().label(),
                        self.config.base_url()
                    ));
                });
            });
        });
        if let Some(view) = next_view {
            self.switch_view(view);
        }
    }
}

impl eframe::App for OceanChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_top_bar(ctx);

        egui::TopBottomPanel::bottom("app_status_bar").show(ctx, |ui| {
            ui.weak(self.status.as_str());
        });

        let mut chat_action = None;
        let mut dataset_action = None;
        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            AppView::Chat => chat_action = show_chat(ui, &mut self.query),
            AppView::Dataset => {
                dataset_action = show_dataset(ui, &self.dataset, self.dataset_fetched_at)
            }
        });

        if let Some(action) = chat_action {
            self.handle_chat_action(action);
        }
        if let Some(DatasetAction::Refresh) = dataset_action {
            self.refresh_dataset();
        }

        let dataset_loading = self.dataset.is_mounted() && self.dataset.is_loading();
        if self.query.is_loading() || dataset_loading {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

#[cfg(test)]
mod tests {
    use client_core::{Deployment, QueryStatus};
    use crossbeam_channel::bounded;
    use shared::protocol::{DatasetInfo, DatasetInfoReply};

    use super::*;

    fn app() -> (OceanChatApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = OceanChatApp::new(
            cmd_tx,
            ui_rx,
            ClientConfig::for_deployment(Deployment::Development),
        );
        (app, cmd_rx, ui_tx)
    }

    #[test]
    fn submit_with_dead_worker_settles_to_error() {
        let (mut app, cmd_rx, _ui_tx) = app();
        drop(cmd_rx);

        app.query.set_question("max temperature?");
        app.handle_chat_action(ChatAction::Submit);

        assert_eq!(app.query.status(), QueryStatus::Errored);
        assert_eq!(
            app.query.error_message(),
            app.config.backend_unreachable_message()
        );
    }

    #[test]
    fn leaving_dataset_view_discards_late_results() {
        let (mut app, cmd_rx, ui_tx) = app();

        app.switch_view(AppView::Dataset);
        let Ok(BackendCommand::FetchDatasetInfo { request_id }) = cmd_rx.try_recv() else {
            panic!("mount should queue a dataset fetch");
        };

        app.switch_view(AppView::Chat);
        let revision = app.dataset.revision();
        ui_tx
            .try_send(UiEvent::DatasetInfoResolved {
                request_id,
                outcome: Ok(DatasetInfoReply::Snapshot(DatasetInfo::default())),
            })
            .expect("event");
        app.process_ui_events();

        assert_eq!(app.dataset.revision(), revision);
        assert!(app.dataset.snapshot().is_none());
        assert!(app.dataset_fetched_at.is_none());
    }

    #[test]
    fn dataset_result_applies_while_mounted() {
        let (mut app, cmd_rx, ui_tx) = app();

        app.switch_view(AppView::Dataset);
        let Ok(BackendCommand::FetchDatasetInfo { request_id }) = cmd_rx.try_recv() else {
            panic!("mount should queue a dataset fetch");
        };
        ui_tx
            .try_send(UiEvent::DatasetInfoResolved {
                request_id,
                outcome: Ok(DatasetInfoReply::Snapshot(DatasetInfo::default())),
            })
            .expect("event");
        app.process_ui_events();

        assert_eq!(app.dataset.status(), LoadStatus::Loaded);
        assert!(app.dataset_fetched_at.is_some());

        app.refresh_dataset();
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::FetchDatasetInfo { .. })
        ));
        app.refresh_dataset();
        assert!(cmd_rx.try_recv().is_err());
    }
}
