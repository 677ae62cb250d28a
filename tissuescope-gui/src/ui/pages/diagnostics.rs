use crate::state::PageDrafts;
use crate::ui::{session_messages, styled_button, PageActions};
use eframe::egui::{self, RichText};
use tissuescope_core::{MessageLevel, SessionContext};

pub(crate) fn render(
    ui: &mut egui::Ui,
    session: &mut SessionContext,
    drafts: &mut PageDrafts,
    actions: &mut PageActions,
) {
    egui::Grid::new("diagnostic_checks")
        .num_columns(3)
        .striped(true)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for check in session.diagnostics() {
                let (mark, color) = if check.ok {
                    ("OK", egui::Color32::from_rgb(80, 170, 90))
                } else {
                    ("!!", ui.visuals().error_fg_color)
                };
                ui.label(RichText::new(mark).color(color).strong());
                ui.label(check.name);
                ui.label(check.detail);
                ui.end_row();
            }
        });

    ui.add_space(6.0);
    egui::Grid::new("diagnostic_paths")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Data directory:");
            ui.label(session.data_dir().display().to_string());
            ui.end_row();
            ui.label("Defaults file:");
            ui.label(session.defaults().defaults_path().display().to_string());
            ui.end_row();
            let (hits, misses) = session.cache().stats();
            ui.label("Tissue cache:");
            ui.label(format!(
                "{} of {} entries, {hits} hits, {misses} misses",
                session.cache().len(),
                session.cache().capacity()
            ));
            ui.end_row();
        });

    ui.separator();
    ui.label(RichText::new("Messages").strong());
    if session.messages().is_empty() {
        ui.label(RichText::new("All datasets loaded without problems.").weak());
    } else {
        session_messages(ui, session, MessageLevel::Info);
    }
    if styled_button(ui, "Reload data").clicked() {
        session.reload_datasets();
        actions.notify("Data", "Datasets reloaded.");
    }

    ui.separator();
    ui.label(RichText::new("Current parameters").strong());
    match session.export_parameters() {
        Ok(json) => {
            let mut text = json;
            ui.add(
                egui::TextEdit::multiline(&mut text)
                    .code_editor()
                    .desired_rows(8)
                    .interactive(false),
            );
        }
        Err(err) => {
            ui.label(RichText::new(err).color(ui.visuals().error_fg_color));
        }
    }

    ui.add_space(6.0);
    ui.label("Apply a JSON patch of parameters (all keys are checked before any is applied):");
    ui.add(
        egui::TextEdit::multiline(&mut drafts.import_text)
            .code_editor()
            .desired_rows(4)
            .hint_text("{\"depth\": 1.5, \"wavelength_range\": [800, 1400]}"),
    );
    if styled_button(ui, "Apply patch").clicked() {
        match session.params.apply_json_patch(&drafts.import_text) {
            Ok(()) => {
                drafts.parameter_error = None;
                drafts.import_text.clear();
                actions.notify("Parameters", "Patch applied.");
            }
            Err(err) => actions.notify("Parameters", format!("Patch rejected: {err}")),
        }
    }
}
