use client_core::{QueryController, QueryStatus};

pub enum ChatAction {
    Submit,
    SelectSample(usize),
    Clear,
    CopyAnswer,
}

pub fn show_chat(ui: &mut egui::Ui, query: &mut QueryController) -> Option<ChatAction> {
    let mut action = None;
    let loading = query.is_loading();

    ui.heading("Ocean Data Chatbot");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let input_width = (ui.available_width() - 96.0).max(160.0);
        let input = ui.add_enabled(
            !loading,
            egui::TextEdit::singleline(query.question_mut())
                .hint_text("Ask about ocean data...")
                .desired_width(input_width),
        );
        let enter_pressed =
            input.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));

        let send_label = if loading { "Sending..." } else { "Send" };
        if ui.add_enabled(!loading, egui::Button::new(send_label)).clicked() || enter_pressed {
            action = Some(ChatAction::Submit);
        }
    });

    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui| {
        ui.weak("Try:");
        for (index, sample) in QueryController::sample_queries().iter().enumerate() {
            if ui
                .add_enabled(!loading, egui::Button::new(*sample).small())
                .clicked()
            {
                action = Some(ChatAction::SelectSample(index));
            }
        }
    });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(query.can_clear(), egui::Button::new("Clear"))
            .clicked()
        {
            action = Some(ChatAction::Clear);
        }
        if ui
            .add_enabled(!query.answer_text().is_empty(), egui::Button::new("Copy answer"))
            .clicked()
        {
            action = Some(ChatAction::CopyAnswer);
        }
    });

    ui.separator();
    match query.status() {
        QueryStatus::Idle => {}
        QueryStatus::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Thinking...");
            });
        }
        QueryStatus::Answered => {
            ui.strong("Answer");
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.label(query.answer_text());
                });
            });
        }
        QueryStatus::Errored => {
            let color = ui.visuals().error_fg_color;
            ui.colored_label(color, query.error_message());
        }
    }

    action
}
