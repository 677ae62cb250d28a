use super::{fluorophore_data_missing, parameter_form};
use crate::file_dialogs::SvgTarget;
use crate::plots::cross_section_plot;
use crate::state::PageDrafts;
use crate::ui::{styled_button, PageActions};
use crate::utils::{format_optional, rgb_to_hex, truncate_string};
use eframe::egui::{self, RichText};
use tissuescope_core::markers::MARKER_SHAPES;
use tissuescope_core::{MessageLevel, PageId, SessionContext};

pub(crate) fn render(
    ui: &mut egui::Ui,
    session: &mut SessionContext,
    drafts: &mut PageDrafts,
    actions: &mut PageActions,
) {
    if !session.fluorophores_loaded() {
        fluorophore_data_missing(ui, session, actions);
        return;
    }
    crate::ui::session_messages(ui, session, MessageLevel::Warning);

    egui::CollapsingHeader::new("Parameters")
        .default_open(false)
        .show(ui, |ui| parameter_form(ui, session, drafts, PageId::CrossSections));

    visibility_panel(ui, session);

    egui::CollapsingHeader::new("Marker settings")
        .default_open(false)
        .show(ui, |ui| marker_settings(ui, session));

    ui.horizontal(|ui| {
        ui.checkbox(
            &mut drafts.show_effective_cross_section,
            "Weight by tissue transmission",
        );
        if styled_button(ui, "Export SVG").clicked() {
            actions.export_svg = Some(SvgTarget::CrossSections);
        }
    });

    let points = session.cross_section_points();
    let bands = session.laser_bands();
    let range = session.params.wavelength_range();
    cross_section_plot(
        ui,
        &points,
        &bands,
        &session.markers,
        range,
        drafts.show_effective_cross_section,
    );

    ui.add_space(8.0);
    if points.is_empty() {
        ui.label(RichText::new("No fluorophores selected.").weak());
        return;
    }
    egui::Grid::new("cross_section_table")
        .num_columns(6)
        .striped(true)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for header in [
                "Fluorophore",
                "Wavelength (nm)",
                "\u{03c3}2 (GM)",
                "Transmission",
                "Effective (GM)",
                "Reference",
            ] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();
            for point in &points {
                ui.label(&point.name);
                ui.label(format!("{:.0}", point.wavelength));
                ui.label(format!("{:.1}", point.cross_section));
                ui.label(format_optional(point.transmission, 3));
                ui.label(format_optional(point.effective_cross_section(), 1));
                ui.label(truncate_string(&point.reference, 40))
                    .on_hover_text(&point.reference);
                ui.end_row();
            }
        });
}

/// Show/hide checkboxes per fluorophore. Returns the panel's id, which stays
/// fixed while the shown count in its title changes.
fn visibility_panel(ui: &mut egui::Ui, session: &mut SessionContext) -> egui::Id {
    let title = format!(
        "Fluorophores ({} of {} shown)",
        session.visibility.visible_count(),
        session.fluorophores.len()
    );
    egui::CollapsingHeader::new(title)
        .id_source("fluorophore_visibility")
        .default_open(false)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if ui.small_button("Show all").clicked() {
                    session.visibility.set_all_visible(true);
                }
                if ui.small_button("Hide all").clicked() {
                    session.visibility.set_all_visible(false);
                }
            });
            ui.horizontal_wrapped(|ui| {
                for record in &session.fluorophores {
                    let mut visible = session.visibility.is_visible(&record.name);
                    if ui.checkbox(&mut visible, &record.name).changed() {
                        session.visibility.set_visible(&record.name, visible);
                    }
                }
            });
        })
        .header_response
        .id
}

/// Shape and colour per reference; edits apply to every fluorophore citing it.
fn marker_settings(ui: &mut egui::Ui, session: &mut SessionContext) {
    let mut edits = Vec::new();
    egui::Grid::new("marker_settings_grid")
        .num_columns(3)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for (idx, (reference, style)) in session.markers.entries().iter().enumerate() {
                let mut edited = style.clone();
                ui.label(truncate_string(reference, 40))
                    .on_hover_text(reference);
                egui::ComboBox::from_id_source(("marker_shape", idx))
                    .selected_text(edited.shape.label())
                    .show_ui(ui, |ui| {
                        for shape in MARKER_SHAPES {
                            ui.selectable_value(&mut edited.shape, shape, shape.label());
                        }
                    });
                let mut rgb =
                    dataset::laser::parse_hex_color(&edited.color).unwrap_or([128, 128, 128]);
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    edited.color = rgb_to_hex(rgb);
                }
                ui.end_row();
                if edited != *style {
                    edits.push((reference.clone(), edited));
                }
            }
        });
    for (reference, style) in edits {
        log::debug!("marker for '{reference}' set to {style:?}");
        session.markers.set(&reference, style);
    }
    if ui.small_button("Reset markers").clicked() {
        session.reset_marker_styles();
    }
}
