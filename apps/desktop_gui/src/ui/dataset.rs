use chrono::{DateTime, Local};
use client_core::{DatasetInfoController, InfoPanel, LoadStatus, PanelBody};
use shared::domain::EMPTY_PANEL_TEXT;

pub enum DatasetAction {
    Refresh,
}

pub fn show_dataset(
    ui: &mut egui::Ui,
    dataset: &DatasetInfoController,
    fetched_at: Option<DateTime<Local>>,
) -> Option<DatasetAction> {
    let mut action = None;

    ui.heading("Dataset Overview");
    ui.weak("Quick stats about the loaded ocean dataset.");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui
            .add_enabled(dataset.can_refresh(), egui::Button::new("Refresh"))
            .clicked()
        {
            action = Some(DatasetAction::Refresh);
        }
        if let Some(fetched_at) = fetched_at {
            ui.weak(format!("Fetched at {}", fetched_at.format("%H:%M:%S")));
        }
    });
    ui.add_space(8.0);

    match dataset.status() {
        LoadStatus::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading dataset info...");
            });
        }
        LoadStatus::Errored => {
            let color = ui.visuals().error_fg_color;
            ui.colored_label(color, dataset.error_message());
        }
        LoadStatus::Loaded => {
            if let Some(panels) = dataset.panels() {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.columns(2, |columns| {
                        for (index, panel) in panels.iter().enumerate() {
                            show_panel(&mut columns[index % 2], panel);
                        }
                    });
                });
            }
        }
    }

    action
}

fn show_panel(ui: &mut egui::Ui, panel: &InfoPanel) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.strong(panel.title());
        ui.add_space(4.0);
        match &panel.body {
            PanelBody::None => {
                ui.weak(EMPTY_PANEL_TEXT);
            }
            PanelBody::Entries(entries) => {
                egui::Grid::new(panel.title())
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for entry in entries {
                            ui.label(entry.label.as_str());
                            match &entry.value {
                                Some(value) => ui.weak(value.as_str()),
                                None => ui.label(""),
                            };
                            ui.end_row();
                        }
                    });
            }
        }
    });
    ui.add_space(8.0);
}
