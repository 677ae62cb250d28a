use super::{parameter_form, profile_or_error};
use crate::file_dialogs::SvgTarget;
use crate::plots::{depth_profile_plot, transmission_plot};
use crate::state::PageDrafts;
use crate::ui::{styled_button, PageActions};
use crate::utils::format_percent;
use eframe::egui::{self, RichText};
use tissuescope_core::{PageId, SessionContext};

pub(crate) fn render(
    ui: &mut egui::Ui,
    session: &mut SessionContext,
    drafts: &mut PageDrafts,
    actions: &mut PageActions,
) {
    egui::CollapsingHeader::new("Parameters")
        .default_open(true)
        .show(ui, |ui| parameter_form(ui, session, drafts, PageId::TissueAnalysis));

    ui.horizontal(|ui| {
        ui.checkbox(&mut drafts.show_depth_profile, "Show depth profile");
        if styled_button(ui, "Export SVG").clicked() {
            actions.export_svg = Some(SvgTarget::Transmission);
        }
    });

    let threshold = session.params.absorption_threshold();
    let bands = session.laser_bands();
    let depth = session.params.depth();
    let Some(profile) = profile_or_error(ui, session) else {
        return;
    };

    ui.label(
        RichText::new(format!(
            "Maximum transmission at {:.0} nm for {depth:.1} mm of tissue",
            profile.max_transmission_wavelength
        ))
        .strong(),
    );
    transmission_plot(ui, profile, &bands, threshold);

    let absorption_bands = profile.high_absorption_bands(threshold);
    if absorption_bands.is_empty() {
        ui.label(format!("No band absorbs more than {threshold:.0}% in this window."));
    } else {
        let listed: Vec<String> = absorption_bands
            .iter()
            .map(|(start, end)| format!("{start:.0}-{end:.0} nm"))
            .collect();
        ui.label(format!(
            "Water absorbs more than {threshold:.0}% in: {}",
            listed.join(", ")
        ));
    }

    if let Some(comparison) = &profile.two_photon {
        ui.separator();
        ui.label(RichText::new("Two-photon wavelength comparison").strong());
        egui::Grid::new("two_photon_table")
            .num_columns(4)
            .striped(true)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label("");
                ui.label(RichText::new("Wavelength (nm)").strong());
                ui.label(RichText::new("Transmission").strong());
                ui.label(RichText::new("Water absorption").strong());
                ui.end_row();
                let wavelengths = [comparison.lambda_a, comparison.lambda_b, comparison.lambda_c];
                for (idx, label) in ["\u{03bb}a", "\u{03bb}b", "\u{03bb}c"].iter().enumerate() {
                    ui.label(*label);
                    ui.label(format!("{:.0}", wavelengths[idx]));
                    ui.label(format!("{:.3}", comparison.transmission[idx]));
                    ui.label(format_percent(comparison.water_absorption[idx]));
                    ui.end_row();
                }
            });
    }

    if drafts.show_depth_profile {
        ui.separator();
        ui.label(RichText::new("Transmission by depth (0 to 2 mm)").strong());
        depth_profile_plot(ui, profile);
    }
}
