use crate::export::{export_cross_section_svg, export_transmission_svg};
use crate::file_dialogs::{spawn_file_dialog_thread, SvgTarget};
use crate::GuiApp;
use std::path::Path;
use std::sync::mpsc;

const SVG_SIZE: (u32, u32) = (1200, 800);

impl GuiApp {
    pub(crate) fn open_export_config_dialog(&mut self) {
        if self.file_dialogs.export_config_rx.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        self.file_dialogs.export_config_rx = Some(rx);
        spawn_file_dialog_thread(move || {
            let file = rfd::FileDialog::new()
                .add_filter("JSON", &["json"])
                .set_file_name("tissuescope_parameters.json")
                .save_file();
            let _ = tx.send(file);
        });
    }

    pub(crate) fn open_import_config_dialog(&mut self) {
        if self.file_dialogs.import_config_rx.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        self.file_dialogs.import_config_rx = Some(rx);
        spawn_file_dialog_thread(move || {
            let file = rfd::FileDialog::new()
                .add_filter("JSON", &["json"])
                .pick_file();
            let _ = tx.send(file);
        });
    }

    pub(crate) fn open_export_svg_dialog(&mut self, target: SvgTarget) {
        if self.file_dialogs.export_svg_rx.is_some() {
            return;
        }
        let file_name = match target {
            SvgTarget::CrossSections => "cross_sections.svg",
            SvgTarget::Transmission => "transmission.svg",
        };
        let (tx, rx) = mpsc::channel();
        self.file_dialogs.export_svg_rx = Some((target, rx));
        spawn_file_dialog_thread(move || {
            let file = rfd::FileDialog::new()
                .add_filter("SVG", &["svg"])
                .set_file_name(file_name)
                .save_file();
            let _ = tx.send(file);
        });
    }

    pub(crate) fn poll_export_config_dialog(&mut self) {
        let result = match &self.file_dialogs.export_config_rx {
            Some(rx) => rx.try_recv().ok(),
            None => None,
        };
        let Some(selection) = result else {
            return;
        };
        self.file_dialogs.export_config_rx = None;
        let Some(path) = selection else {
            return;
        };
        let outcome = self
            .session
            .export_parameters()
            .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));
        match outcome {
            Ok(()) => self.show_info(
                "Configuration",
                &format!("Parameters exported to {}", path.display()),
            ),
            Err(err) => {
                log::error!("parameter export failed: {err}");
                self.show_info("Configuration", &format!("Export failed: {err}"));
            }
        }
    }

    pub(crate) fn poll_import_config_dialog(&mut self) {
        let result = match &self.file_dialogs.import_config_rx {
            Some(rx) => rx.try_recv().ok(),
            None => None,
        };
        let Some(selection) = result else {
            return;
        };
        self.file_dialogs.import_config_rx = None;
        if let Some(path) = selection {
            self.import_parameters_from(&path);
        }
    }

    fn import_parameters_from(&mut self, path: &Path) {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => {
                self.show_info("Configuration", &format!("Failed to read file: {err}"));
                return;
            }
        };
        match self.session.params.apply_json_patch(&data) {
            Ok(()) => {
                self.drafts.parameter_error = None;
                self.show_info(
                    "Configuration",
                    &format!("Parameters imported from {}", path.display()),
                );
            }
            Err(err) => {
                self.drafts.parameter_error = Some(err.to_string());
                self.show_info("Configuration", &format!("Import rejected: {err}"));
            }
        }
    }

    pub(crate) fn poll_export_svg_dialog(&mut self) {
        let result = match &self.file_dialogs.export_svg_rx {
            Some((target, rx)) => rx.try_recv().ok().map(|selection| (*target, selection)),
            None => None,
        };
        let Some((target, selection)) = result else {
            return;
        };
        self.file_dialogs.export_svg_rx = None;
        let Some(path) = selection else {
            return;
        };

        let outcome = match target {
            SvgTarget::CrossSections => {
                let points = self.session.cross_section_points();
                let bands = self.session.laser_bands();
                let range = self.session.params.wavelength_range();
                export_cross_section_svg(
                    &path,
                    &points,
                    &bands,
                    range,
                    &self.session.markers,
                    SVG_SIZE,
                )
            }
            SvgTarget::Transmission => {
                let threshold = self.session.params.absorption_threshold();
                self.session
                    .tissue_profile()
                    .and_then(|profile| export_transmission_svg(&path, profile, threshold, SVG_SIZE))
            }
        };
        match outcome {
            Ok(()) => self.show_info("Export", &format!("Plot saved to {}", path.display())),
            Err(err) => {
                log::error!("svg export failed: {err}");
                self.show_info("Export", &format!("Export failed: {err}"));
            }
        }
    }
}
