use super::styled_button;
use crate::state::ConfirmAction;
use crate::GuiApp;
use eframe::egui::{self, RichText};
use tissuescope_core::Mode;

impl GuiApp {
    pub(crate) fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.label(RichText::new("Experience mode").strong());
        let mut mode = self.session.mode();
        egui::ComboBox::from_id_source("mode_select")
            .selected_text(mode.label())
            .width(220.0)
            .show_ui(ui, |ui| {
                for option in Mode::ALL {
                    ui.selectable_value(&mut mode, option, option.label());
                }
            });
        if mode != self.session.mode() {
            self.session.set_mode(mode);
        }

        ui.separator();
        let current = self.session.current_page();
        let mut clicked = None;
        for section in self.session.navigation().sections() {
            ui.label(RichText::new(section.title).weak());
            for page in section.pages {
                if ui.selectable_label(*page == current, page.title()).clicked() {
                    clicked = Some(*page);
                }
            }
            ui.add_space(4.0);
        }
        if let Some(page) = clicked {
            self.navigate(page);
        }

        ui.separator();
        ui.label(RichText::new("Data").strong());
        if self.session.fluorophores_loaded() {
            ui.label(format!(
                "{} fluorophores ({} shown)",
                self.session.fluorophores.len(),
                self.session.visibility.visible_count()
            ));
        } else {
            ui.label(RichText::new("No fluorophore data").color(ui.visuals().error_fg_color));
        }
        ui.label(format!("{} lasers", self.session.lasers.len()));
        ui.label(format!("{} library spectra", self.session.library.len()));
        if self.session.water.fallback {
            ui.label(
                RichText::new("Water absorption: fallback").color(ui.visuals().warn_fg_color),
            );
        }

        ui.separator();
        ui.label(RichText::new("Session").strong());
        if styled_button(ui, "Export config").clicked() {
            self.open_export_config_dialog();
        }
        if styled_button(ui, "Import config").clicked() {
            self.open_import_config_dialog();
        }
        if styled_button(ui, "Save as defaults").clicked() {
            match self.session.save_parameters_as_defaults() {
                Ok(()) => self.show_info("Defaults", "Current parameters saved as defaults."),
                Err(err) => self.show_info("Defaults", &err),
            }
        }
        if styled_button(ui, "Factory defaults").clicked() {
            self.request_confirm(ConfirmAction::FactoryDefaults);
        }
        if styled_button(ui, "Reset session").clicked() {
            self.request_confirm(ConfirmAction::ResetSession);
        }
    }
}
