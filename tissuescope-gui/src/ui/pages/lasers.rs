use crate::state::{ConfirmAction, LaserDraft, PageDrafts};
use crate::ui::{kv_row_wrapped, styled_button, PageActions};
use crate::utils::{format_optional, hex_to_color32, rgb_to_hex};
use eframe::egui::{self, RichText};
use tissuescope_core::SessionContext;

pub(crate) fn render(
    ui: &mut egui::Ui,
    session: &mut SessionContext,
    drafts: &mut PageDrafts,
    actions: &mut PageActions,
) {
    ui.label("Laser sources shown as overlays on the cross-section and transmission plots.");
    ui.add_space(6.0);

    let mut remove = None;
    egui::Grid::new("laser_table")
        .num_columns(5)
        .striped(true)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Name").strong());
            ui.label(RichText::new("Range (nm)").strong());
            ui.label(RichText::new("Colour").strong());
            ui.label(RichText::new("Power (mW)").strong());
            ui.label("");
            ui.end_row();
            for (idx, laser) in session.lasers.iter().enumerate() {
                ui.label(&laser.name);
                if laser.is_single_line() {
                    ui.label(format!("{:.0}", laser.start_nm));
                } else {
                    ui.label(format!("{:.0} - {:.0}", laser.start_nm, laser.end_nm));
                }
                let (rect, _) = ui.allocate_exact_size(egui::vec2(36.0, 14.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 3.0, hex_to_color32(&laser.color));
                ui.label(format_optional(laser.power_mw, 0));
                if ui.small_button("Remove").clicked() {
                    remove = Some(idx);
                }
                ui.end_row();
            }
        });
    if let Some(idx) = remove {
        match session.remove_laser(idx) {
            Ok(laser) => actions.notify("Lasers", format!("Removed {}", laser.name)),
            Err(err) => actions.notify("Lasers", err),
        }
    }

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if styled_button(ui, "Save lasers").clicked() {
            match session.save_lasers() {
                Ok(path) => actions.notify("Lasers", format!("Saved to {}", path.display())),
                Err(err) => actions.notify("Lasers", err),
            }
        }
        if styled_button(ui, "Default lasers").clicked() {
            actions.confirm = Some(ConfirmAction::RestoreDefaultLasers);
        }
    });

    ui.separator();
    ui.label(RichText::new("Add laser").strong());
    add_laser_form(ui, &mut drafts.laser);
    if styled_button(ui, "Add").clicked() {
        let draft = &drafts.laser;
        let power = draft.has_power.then_some(draft.power_mw);
        match session.add_laser(
            &draft.name,
            draft.start_nm,
            draft.end_nm,
            &rgb_to_hex(draft.color),
            power,
        ) {
            Ok(()) => {
                actions.notify("Lasers", format!("Added {}", draft.name.trim()));
                drafts.laser = LaserDraft::default();
            }
            Err(err) => actions.notify("Lasers", err),
        }
    }
}

fn add_laser_form(ui: &mut egui::Ui, draft: &mut LaserDraft) {
    let label_w = 140.0;
    kv_row_wrapped(ui, "Name", label_w, |ui| {
        ui.text_edit_singleline(&mut draft.name);
    });
    kv_row_wrapped(ui, "Start (nm)", label_w, |ui| {
        ui.add(egui::DragValue::new(&mut draft.start_nm).speed(5.0).clamp_range(0.0..=5000.0));
    });
    kv_row_wrapped(ui, "End (nm)", label_w, |ui| {
        ui.add(egui::DragValue::new(&mut draft.end_nm).speed(5.0).clamp_range(0.0..=5000.0));
    });
    kv_row_wrapped(ui, "Colour", label_w, |ui| {
        ui.color_edit_button_srgb(&mut draft.color);
    });
    kv_row_wrapped(ui, "Power (mW)", label_w, |ui| {
        ui.checkbox(&mut draft.has_power, "");
        ui.add_enabled(
            draft.has_power,
            egui::DragValue::new(&mut draft.power_mw).speed(10.0).clamp_range(0.0..=100_000.0),
        );
    });
}
