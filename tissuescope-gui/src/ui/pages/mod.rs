//! One render function per page. Each receives the session explicitly,
//! plus the UI drafts and a [`PageActions`] sink for requests that reach
//! outside the page.

use super::{parameter_controls, PageActions};
use crate::state::PageDrafts;
use eframe::egui::{self, RichText};
use tissuescope_core::{PageId, SessionContext};

pub(crate) mod cross_sections;
pub(crate) mod diagnostics;
pub(crate) mod lasers;
pub(crate) mod library;
pub(crate) mod tissue_analysis;
pub(crate) mod tissue_model;
pub(crate) mod tissue_params;
pub(crate) mod wavelength;

/// The page's parameter form followed by the last rejected edit, if any.
fn parameter_form(
    ui: &mut egui::Ui,
    session: &mut SessionContext,
    drafts: &mut PageDrafts,
    page: PageId,
) {
    let mode = session.mode();
    if let Some(err) = parameter_controls(ui, &mut session.params, mode, page) {
        drafts.parameter_error = Some(err);
    }
    if let Some(err) = drafts.parameter_error.clone() {
        ui.horizontal(|ui| {
            ui.label(RichText::new(err).color(ui.visuals().error_fg_color));
            if ui.small_button("Dismiss").clicked() {
                drafts.parameter_error = None;
            }
        });
    }
}

/// Draws the tissue profile error in place of a plot and returns `None`.
fn profile_or_error<'a>(
    ui: &mut egui::Ui,
    session: &'a mut SessionContext,
) -> Option<&'a tissue::TissueProfile> {
    match session.tissue_profile() {
        Ok(profile) => Some(profile),
        Err(err) => {
            ui.label(RichText::new(err).color(ui.visuals().error_fg_color));
            None
        }
    }
}

fn fluorophore_data_missing(ui: &mut egui::Ui, session: &SessionContext, actions: &mut PageActions) {
    ui.label(
        RichText::new("Fluorophore data is not available.")
            .color(ui.visuals().error_fg_color)
            .strong(),
    );
    super::session_messages(ui, session, tissuescope_core::MessageLevel::Error);
    ui.label(format!(
        "Place a fluorophores.csv file in {} and reset the session.",
        session.data_dir().display()
    ));
    if session.navigation().contains(PageId::Diagnostics) && ui.button("Open diagnostics").clicked()
    {
        actions.navigate = Some(PageId::Diagnostics);
    }
}
