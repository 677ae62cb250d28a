use super::parameter_form;
use crate::state::PageDrafts;
use crate::ui::PageActions;
use eframe::egui::{self, RichText};
use tissuescope_core::{PageId, SessionContext};

pub(crate) fn render(
    ui: &mut egui::Ui,
    session: &mut SessionContext,
    drafts: &mut PageDrafts,
    _actions: &mut PageActions,
) {
    parameter_form(ui, session, drafts, PageId::TissueParameters);

    ui.separator();
    let params = session.params.tissue_params();
    let reference = params.normalization_wavelength;
    ui.label(RichText::new(format!("Coefficients at {reference:.0} nm")).strong());
    egui::Grid::new("tissue_coefficients")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Reduced scattering \u{03bc}s':");
            ui.label(format!("{:.3} mm^-1", params.reduced_scattering(reference)));
            ui.end_row();
            ui.label("Scattering \u{03bc}s:");
            ui.label(format!("{:.3} mm^-1", params.scattering(reference)));
            ui.end_row();
            ui.label("Absorption \u{03bc}a:");
            ui.label(format!("{:.4} mm^-1", params.absorption(reference, &session.water)));
            ui.end_row();
        });
    if session.water.fallback {
        ui.label(
            RichText::new("Water absorption data missing: absorption is treated as zero.")
                .color(ui.visuals().warn_fg_color),
        );
    }
}
