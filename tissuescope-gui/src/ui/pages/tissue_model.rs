use super::{parameter_form, profile_or_error};
use crate::plots::{coefficient_plot, sweep_plot};
use crate::state::PageDrafts;
use crate::ui::PageActions;
use eframe::egui::{self, RichText};
use tissue::{sweep_coefficient, SweepParameter};
use tissuescope_core::{PageId, SessionContext};

const SWEEP_POINTS: usize = 100;
const SWEEP_PARAMETERS: [SweepParameter; 4] = [
    SweepParameter::Anisotropy,
    SweepParameter::ScatteringPower,
    SweepParameter::ScatteringScale,
    SweepParameter::WaterContent,
];

pub(crate) fn render(
    ui: &mut egui::Ui,
    session: &mut SessionContext,
    drafts: &mut PageDrafts,
    _actions: &mut PageActions,
) {
    ui.label(RichText::new("Model").strong());
    for line in [
        "\u{03bc}s'(\u{03bb}) = a \u{00b7} (\u{03bb} / 500 nm)^-b",
        "\u{03bc}s = \u{03bc}s' / (1 - g)",
        "\u{03bc}a(\u{03bb}) = water(\u{03bb}) \u{00b7} w / 10",
        "T(\u{03bb}) = exp(-(\u{03bc}s + \u{03bc}a) \u{00b7} z), normalized to 1 at the normalization wavelength",
        "Water absorption fraction = 1 - exp(-\u{03bc}a \u{00b7} z)",
    ] {
        ui.monospace(line);
    }
    ui.add_space(6.0);

    egui::CollapsingHeader::new("Parameters")
        .default_open(true)
        .show(ui, |ui| parameter_form(ui, session, drafts, PageId::TissueModel));

    let tissue_params = session.params.tissue_params();
    let reference = tissue_params.normalization_wavelength;
    let sweep_parameter = drafts.sweep_parameter;
    let sweep = sweep_coefficient(
        sweep_parameter,
        &tissue_params,
        &session.water,
        reference,
        SWEEP_POINTS,
    );

    if let Some(profile) = profile_or_error(ui, session) {
        ui.separator();
        ui.label(RichText::new("Attenuation coefficients").strong());
        coefficient_plot(ui, profile);
    }

    ui.separator();
    ui.horizontal(|ui| {
        ui.label(RichText::new("Parameter sweep").strong());
        egui::ComboBox::from_id_source("sweep_parameter")
            .selected_text(drafts.sweep_parameter.label())
            .show_ui(ui, |ui| {
                for parameter in SWEEP_PARAMETERS {
                    ui.selectable_value(&mut drafts.sweep_parameter, parameter, parameter.label());
                }
            });
    });
    let coefficient = if sweep_parameter == SweepParameter::WaterContent {
        "absorption"
    } else {
        "scattering"
    };
    ui.label(format!(
        "{coefficient} coefficient at {reference:.0} nm as {} varies",
        sweep_parameter.label()
    ));
    sweep_plot(
        ui,
        sweep_parameter,
        &sweep,
        sweep_parameter.current(&tissue_params),
    );
}
