use super::fluorophore_data_missing;
use crate::plots::spectrum_plot;
use crate::state::{FluorophoreDraft, PageDrafts};
use crate::ui::{kv_row_wrapped, styled_button, PageActions};
use crate::utils::format_optional;
use dataset::FluorophoreRecord;
use eframe::egui::{self, RichText};
use tissuescope_core::SessionContext;

pub(crate) fn render(
    ui: &mut egui::Ui,
    session: &mut SessionContext,
    drafts: &mut PageDrafts,
    actions: &mut PageActions,
) {
    if !session.fluorophores_loaded() && drafts.table_edit.is_none() {
        fluorophore_data_missing(ui, session, actions);
        if ui.button("Start an empty table").clicked() {
            drafts.table_edit = Some(Vec::new());
        }
        return;
    }

    ui.horizontal(|ui| {
        ui.label("Filter:");
        ui.text_edit_singleline(&mut drafts.fluorophore_filter);
    });
    ui.add_space(4.0);

    match drafts.table_edit.take() {
        Some(mut rows) => {
            let keep_editing = edit_table(ui, session, drafts, &mut rows, actions);
            if keep_editing {
                drafts.table_edit = Some(rows);
            }
        }
        None => {
            fluorophore_table(ui, &session.fluorophores, &drafts.fluorophore_filter);
            if styled_button(ui, "Edit table").clicked() {
                drafts.table_edit = Some(session.fluorophores.clone());
            }
        }
    }

    ui.separator();
    library_section(ui, session, drafts);
}

fn matches_filter(record: &FluorophoreRecord, filter: &str) -> bool {
    let filter = filter.trim().to_lowercase();
    filter.is_empty()
        || record.name.to_lowercase().contains(&filter)
        || record.reference.to_lowercase().contains(&filter)
}

fn fluorophore_table(ui: &mut egui::Ui, records: &[FluorophoreRecord], filter: &str) {
    egui::Grid::new("fluorophore_table")
        .num_columns(7)
        .striped(true)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for header in [
                "Name",
                "Wavelength (nm)",
                "\u{03c3}2 (GM)",
                "Ex max",
                "Em max",
                "QY",
                "Reference",
            ] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();
            for record in records.iter().filter(|r| matches_filter(r, filter)) {
                ui.label(&record.name);
                ui.label(format!("{:.0}", record.wavelength));
                ui.label(format!("{:.1}", record.cross_section));
                ui.label(format_optional(record.ex_max, 0));
                ui.label(format_optional(record.em_max, 0));
                ui.label(format_optional(record.quantum_yield, 2));
                ui.label(&record.reference);
                ui.end_row();
            }
        });
}

/// Editable working copy of the table. Returns false once the edit is
/// applied or discarded.
fn edit_table(
    ui: &mut egui::Ui,
    session: &mut SessionContext,
    drafts: &mut PageDrafts,
    rows: &mut Vec<FluorophoreRecord>,
    actions: &mut PageActions,
) -> bool {
    let mut remove = None;
    egui::Grid::new("fluorophore_edit_table")
        .num_columns(5)
        .striped(true)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            for header in ["Name", "Wavelength (nm)", "\u{03c3}2 (GM)", "Reference", ""] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();
            for (idx, row) in rows.iter_mut().enumerate() {
                if !matches_filter(row, &drafts.fluorophore_filter) {
                    continue;
                }
                ui.text_edit_singleline(&mut row.name);
                ui.add(egui::DragValue::new(&mut row.wavelength).speed(1.0));
                ui.add(egui::DragValue::new(&mut row.cross_section).speed(0.5));
                ui.text_edit_singleline(&mut row.reference);
                if ui.small_button("Remove").clicked() {
                    remove = Some(idx);
                }
                ui.end_row();
            }
        });
    if let Some(idx) = remove {
        rows.remove(idx);
    }

    ui.add_space(4.0);
    ui.label(RichText::new("Add fluorophore").strong());
    add_row_form(ui, &mut drafts.fluorophore);
    if styled_button(ui, "Add row").clicked() {
        let draft = &drafts.fluorophore;
        let record = FluorophoreRecord::new(
            draft.name.trim(),
            draft.wavelength,
            draft.cross_section,
            draft.reference.trim(),
        );
        match record.check() {
            Ok(()) => {
                rows.push(record);
                drafts.fluorophore = FluorophoreDraft::default();
            }
            Err(err) => actions.notify("Fluorophores", err),
        }
    }

    ui.add_space(6.0);
    let mut keep_editing = true;
    ui.horizontal(|ui| {
        if styled_button(ui, "Apply").clicked() {
            match session.set_fluorophores(rows.clone()) {
                Ok(()) => {
                    actions.notify("Fluorophores", format!("{} rows applied", rows.len()));
                    keep_editing = false;
                }
                Err(err) => actions.notify("Fluorophores", err),
            }
        }
        if styled_button(ui, "Apply and save").clicked() {
            let outcome = session
                .set_fluorophores(rows.clone())
                .and_then(|()| session.save_fluorophores());
            match outcome {
                Ok(path) => {
                    actions.notify("Fluorophores", format!("Saved to {}", path.display()));
                    keep_editing = false;
                }
                Err(err) => actions.notify("Fluorophores", err),
            }
        }
        if styled_button(ui, "Discard").clicked() {
            keep_editing = false;
        }
    });
    keep_editing
}

fn add_row_form(ui: &mut egui::Ui, draft: &mut FluorophoreDraft) {
    let label_w = 140.0;
    kv_row_wrapped(ui, "Name", label_w, |ui| {
        ui.text_edit_singleline(&mut draft.name);
    });
    kv_row_wrapped(ui, "Wavelength (nm)", label_w, |ui| {
        ui.add(egui::DragValue::new(&mut draft.wavelength).speed(1.0));
    });
    kv_row_wrapped(ui, "Cross-section (GM)", label_w, |ui| {
        ui.add(egui::DragValue::new(&mut draft.cross_section).speed(0.5));
    });
    kv_row_wrapped(ui, "Reference", label_w, |ui| {
        ui.text_edit_singleline(&mut draft.reference);
    });
}

fn library_section(ui: &mut egui::Ui, session: &SessionContext, drafts: &mut PageDrafts) {
    ui.label(RichText::new("Cross-section library").strong());
    if session.library.is_empty() {
        ui.label(RichText::new("No cross-section spectra loaded.").weak());
        return;
    }

    let selected = drafts
        .selected_spectrum
        .clone()
        .filter(|name| session.library.iter().any(|s| &s.name == name))
        .or_else(|| session.library.first().map(|s| s.name.clone()));
    let mut choice = selected.clone().unwrap_or_default();
    egui::ComboBox::from_id_source("spectrum_select")
        .selected_text(&choice)
        .show_ui(ui, |ui| {
            for spectrum in &session.library {
                ui.selectable_value(&mut choice, spectrum.name.clone(), &spectrum.name);
            }
        });
    drafts.selected_spectrum = Some(choice.clone());

    if let Some(spectrum) = session.library.iter().find(|s| s.name == choice) {
        spectrum_plot(ui, spectrum);
    }

    egui::Grid::new("library_peaks")
        .num_columns(6)
        .striped(true)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for header in [
                "Fluorophore",
                "Trace",
                "Peak (nm)",
                "Peak \u{03c3}2 (GM)",
                "Mean \u{03c3}2 (GM)",
                "Mean uncertainty",
            ] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();
            for peak in session.library_peaks() {
                ui.label(&peak.fluorophore);
                ui.label(&peak.trace);
                ui.label(format!("{:.0}", peak.peak_wavelength));
                ui.label(format!("{:.1}", peak.peak_cross_section));
                ui.label(format!("{:.1}", peak.mean_cross_section));
                ui.label(format_optional(peak.mean_uncertainty, 1));
                ui.end_row();
            }
        });
}
