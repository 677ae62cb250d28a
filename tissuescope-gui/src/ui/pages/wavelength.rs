use super::parameter_form;
use crate::state::PageDrafts;
use crate::ui::PageActions;
use eframe::egui;
use tissuescope_core::{PageId, SessionContext};

pub(crate) fn render(
    ui: &mut egui::Ui,
    session: &mut SessionContext,
    drafts: &mut PageDrafts,
    _actions: &mut PageActions,
) {
    ui.label("Spectral window analysed by every plot, and where transmission is normalized.");
    ui.add_space(6.0);
    parameter_form(ui, session, drafts, PageId::WavelengthSettings);

    ui.separator();
    let (lo, hi) = session.params.wavelength_range();
    egui::Grid::new("wavelength_summary")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Grid:");
            ui.label(format!(
                "{} points from {lo:.0} to {hi:.0} nm ({:.2} nm spacing)",
                tissue::GRID_POINTS,
                (hi - lo) / (tissue::GRID_POINTS - 1) as f64
            ));
            ui.end_row();
            ui.label("Normalization:");
            ui.label(format!(
                "T = 1 at the grid point nearest {:.0} nm",
                session.params.normalization_wavelength()
            ));
            ui.end_row();
            ui.label("Lasers in range:");
            ui.label(session.laser_bands().len().to_string());
            ui.end_row();
        });
}
