//! Shared widgets used across the dashboard pages.

use crate::utils::truncate_string;
use eframe::egui;
use tissuescope_core::{visible_parameters, ParameterKey, ParameterKind, ParameterValue};
use tissuescope_core::{Mode, PageId, ParameterStore};

/// Renders a key-value row with wrapped label text and custom value UI.
///
/// The label gets a fixed-width area and is truncated (full text on hover)
/// when it does not fit; the value UI gets the rest of the row.
///
/// # Parameters
/// - `ui`: The egui UI context to render into
/// - `label`: The text label to display
/// - `label_w`: Fixed width allocated for the label area in pixels
/// - `value_ui`: Closure that renders the value UI component
pub fn kv_row_wrapped(
    ui: &mut egui::Ui,
    label: &str,
    label_w: f32,
    value_ui: impl FnOnce(&mut egui::Ui),
) {
    ui.horizontal(|ui| {
        let max_chars = ((label_w / 7.0).floor() as usize).max(10);
        let display_label = truncate_string(label, max_chars);
        ui.allocate_ui_with_layout(
            egui::vec2(label_w, 0.0),
            egui::Layout::left_to_right(egui::Align::Center),
            |ui| {
                let response = ui.add_sized(
                    [label_w, 0.0],
                    egui::Label::new(display_label).wrap(false),
                );
                response.on_hover_text(label);
            },
        );
        ui.add_space(8.0);
        value_ui(ui);
    });
}

/// Creates a styled button with consistent appearance.
///
/// # Parameters
/// - `ui`: The egui UI context
/// - `label`: The button label text
///
/// # Returns
/// The response from the button interaction
pub fn styled_button(ui: &mut egui::Ui, label: impl Into<egui::WidgetText>) -> egui::Response {
    ui.add_sized(
        super::BUTTON_SIZE,
        egui::Button::new(label).min_size(super::BUTTON_SIZE),
    )
}

/// Draws one control per parameter the page shows in `mode` and writes
/// accepted edits straight into the store.
///
/// Edits the store rejects leave the stored value untouched; the rejection
/// message is returned so the page can show it.
pub fn parameter_controls(
    ui: &mut egui::Ui,
    params: &mut ParameterStore,
    mode: Mode,
    page: PageId,
) -> Option<String> {
    let mut error = None;
    for key in visible_parameters(mode, page) {
        if let Some(value) = parameter_control(ui, key, params.get(key)) {
            if let Err(err) = params.set(key, value) {
                error = Some(err.to_string());
            }
        }
    }
    error
}

/// Returns the edited value when the control changed this frame.
fn parameter_control(
    ui: &mut egui::Ui,
    key: ParameterKey,
    current: ParameterValue,
) -> Option<ParameterValue> {
    let (lo, hi) = key.bounds().unwrap_or((0.0, 1.0));
    let step = key.step();
    let mut edited = None;
    kv_row_wrapped(ui, key.label(), 220.0, |ui| match (key.kind(), current) {
        (ParameterKind::Float, ParameterValue::Float(mut value)) => {
            let response = ui.add(
                egui::Slider::new(&mut value, lo..=hi)
                    .step_by(step)
                    .clamp_to_range(true),
            );
            if response.changed() {
                edited = Some(ParameterValue::Float(value));
            }
        }
        (ParameterKind::Range, ParameterValue::Range(mut start, mut end)) => {
            let start_changed = ui
                .add(
                    egui::DragValue::new(&mut start)
                        .speed(step)
                        .clamp_range(lo..=hi)
                        .suffix(" nm"),
                )
                .changed();
            ui.label("to");
            let end_changed = ui
                .add(
                    egui::DragValue::new(&mut end)
                        .speed(step)
                        .clamp_range(lo..=hi)
                        .suffix(" nm"),
                )
                .changed();
            if start_changed || end_changed {
                edited = Some(ParameterValue::Range(start, end));
            }
        }
        (ParameterKind::Flag, ParameterValue::Flag(mut enabled)) => {
            if ui.checkbox(&mut enabled, "").changed() {
                edited = Some(ParameterValue::Flag(enabled));
            }
        }
        _ => {
            ui.label(current.to_string());
        }
    });
    edited
}
