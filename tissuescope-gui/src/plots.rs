use crate::utils::hex_to_color32;
use dataset::CrossSectionSpectrum;
use eframe::egui::{self, Color32};
use egui_plot::{Legend, Line, MarkerShape as PlotMarker, Plot, PlotPoints, Points, Polygon, VLine};
use tissue::{SweepParameter, TissueProfile};
use tissuescope_core::{FluorophorePoint, LaserBand, MarkerShape, MarkerStyles};

const PLOT_HEIGHT: f32 = 380.0;
const TRANSMISSION_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
const WATER_COLOR: Color32 = Color32::from_rgb(214, 39, 40);
const BAND_COLOR: Color32 = Color32::from_rgba_premultiplied(60, 0, 0, 40);

fn plot_marker(shape: MarkerShape) -> PlotMarker {
    match shape {
        MarkerShape::Circle => PlotMarker::Circle,
        MarkerShape::Square => PlotMarker::Square,
        MarkerShape::Diamond => PlotMarker::Diamond,
        MarkerShape::TriangleUp => PlotMarker::Up,
        MarkerShape::TriangleDown => PlotMarker::Down,
        MarkerShape::Star => PlotMarker::Asterisk,
    }
}

fn shaded_band(start: f64, end: f64, height: f64, color: Color32, name: &str) -> Polygon {
    Polygon::new(PlotPoints::from(vec![
        [start, 0.0],
        [end, 0.0],
        [end, height],
        [start, height],
    ]))
    .fill_color(color)
    .stroke(egui::Stroke::NONE)
    .name(name)
}

fn laser_overlays(plot_ui: &mut egui_plot::PlotUi, bands: &[LaserBand], height: f64) {
    for band in bands {
        let color = hex_to_color32(&band.color);
        if band.single_line {
            plot_ui.vline(VLine::new(band.start_nm).color(color).width(2.0).name(&band.name));
        } else {
            let fill = Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 50);
            plot_ui.polygon(shaded_band(band.start_nm, band.end_nm, height, fill, &band.name));
        }
    }
}

/// Scatter of fluorophore cross-sections, grouped by literature reference,
/// over the laser ranges. With `effective` set, each cross-section is
/// weighted by tissue transmission at its wavelength.
pub(crate) fn cross_section_plot(
    ui: &mut egui::Ui,
    points: &[FluorophorePoint],
    bands: &[LaserBand],
    markers: &MarkerStyles,
    range: (f64, f64),
    effective: bool,
) {
    let value = |p: &FluorophorePoint| {
        if effective {
            p.effective_cross_section().unwrap_or(p.cross_section)
        } else {
            p.cross_section
        }
    };
    let max_y = points.iter().map(value).fold(1.0_f64, f64::max) * 1.1;
    let y_label = if effective {
        "Effective cross-section (GM)"
    } else {
        "Cross-section (GM)"
    };

    let mut references: Vec<&str> = Vec::new();
    for point in points {
        if !references.contains(&point.reference.as_str()) {
            references.push(&point.reference);
        }
    }

    Plot::new("cross_section_plot")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Wavelength (nm)")
        .y_axis_label(y_label)
        .show_grid(true)
        .include_x(range.0)
        .include_x(range.1)
        .include_y(0.0)
        .include_y(max_y)
        .show(ui, |plot_ui| {
            laser_overlays(plot_ui, bands, max_y);
            for reference in &references {
                let coords: Vec<[f64; 2]> = points
                    .iter()
                    .filter(|p| p.reference == *reference)
                    .map(|p| [p.wavelength, value(p)])
                    .collect();
                let (shape, color) = match markers.get(reference) {
                    Some(style) => (plot_marker(style.shape), hex_to_color32(&style.color)),
                    None => (PlotMarker::Circle, Color32::DARK_BLUE),
                };
                let name = if reference.is_empty() {
                    "(no reference)"
                } else {
                    reference
                };
                plot_ui.points(
                    Points::new(coords)
                        .shape(shape)
                        .radius(5.0)
                        .filled(true)
                        .color(color)
                        .name(name),
                );
            }
        });
}

/// Normalized transmission and water absorption against wavelength, with
/// high-absorption bands shaded and the two-photon wavelengths marked.
pub(crate) fn transmission_plot(
    ui: &mut egui::Ui,
    profile: &TissueProfile,
    bands: &[LaserBand],
    threshold_percent: f64,
) {
    let max_y = profile
        .transmission
        .iter()
        .copied()
        .filter(|t| t.is_finite())
        .fold(1.0_f64, f64::max)
        * 1.05;
    let absorption_bands = profile.high_absorption_bands(threshold_percent);

    Plot::new("transmission_plot")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Wavelength (nm)")
        .y_axis_label("Relative value")
        .show_grid(true)
        .include_y(0.0)
        .include_y(max_y)
        .show(ui, |plot_ui| {
            for (start, end) in &absorption_bands {
                plot_ui.polygon(shaded_band(
                    *start,
                    *end,
                    max_y,
                    BAND_COLOR,
                    "High water absorption",
                ));
            }
            laser_overlays(plot_ui, bands, max_y);
            plot_ui.line(
                Line::new(series(&profile.wavelengths, &profile.transmission))
                    .color(TRANSMISSION_COLOR)
                    .width(2.0)
                    .name("Normalized transmission"),
            );
            plot_ui.line(
                Line::new(series(&profile.wavelengths, &profile.water_absorption))
                    .color(WATER_COLOR)
                    .width(2.0)
                    .name("Water absorption"),
            );
            plot_ui.vline(
                VLine::new(profile.max_transmission_wavelength)
                    .color(Color32::GRAY)
                    .style(egui_plot::LineStyle::dashed_loose())
                    .name("Maximum transmission"),
            );
            if let Some(comparison) = &profile.two_photon {
                for (label, wavelength) in [
                    ("\u{03bb}a", comparison.lambda_a),
                    ("\u{03bb}b", comparison.lambda_b),
                    ("\u{03bb}c", comparison.lambda_c),
                ] {
                    plot_ui.vline(
                        VLine::new(wavelength)
                            .color(Color32::DARK_GREEN)
                            .style(egui_plot::LineStyle::dotted_dense())
                            .name(label),
                    );
                }
            }
        });
}

/// One transmission curve per depth step of the profile.
pub(crate) fn depth_profile_plot(ui: &mut egui::Ui, profile: &TissueProfile) {
    let rows = profile.depth_profile.transmission.len().max(1);
    Plot::new("depth_profile_plot")
        .height(PLOT_HEIGHT)
        .x_axis_label("Wavelength (nm)")
        .y_axis_label("Normalized transmission")
        .show_grid(true)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for (idx, (depth, row)) in profile
                .depth_profile
                .depths
                .iter()
                .zip(&profile.depth_profile.transmission)
                .enumerate()
            {
                let t = idx as f32 / rows as f32;
                let shade = (255.0 * (1.0 - t)) as u8;
                plot_ui.line(
                    Line::new(series(&profile.wavelengths, row))
                        .color(Color32::from_rgb(shade / 2, shade / 2, 255 - shade / 3))
                        .name(format!("{depth:.1} mm")),
                );
            }
        });
}

/// Scattering and absorption coefficients against wavelength.
pub(crate) fn coefficient_plot(ui: &mut egui::Ui, profile: &TissueProfile) {
    Plot::new("coefficient_plot")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Wavelength (nm)")
        .y_axis_label("Coefficient (mm^-1)")
        .show_grid(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(series(&profile.wavelengths, &profile.scattering))
                    .color(TRANSMISSION_COLOR)
                    .name("Scattering \u{03bc}s"),
            );
            plot_ui.line(
                Line::new(series(&profile.wavelengths, &profile.absorption))
                    .color(WATER_COLOR)
                    .name("Absorption \u{03bc}a"),
            );
        });
}

pub(crate) fn sweep_plot(
    ui: &mut egui::Ui,
    parameter: SweepParameter,
    data: &[(f64, f64)],
    current: f64,
) {
    let points: Vec<[f64; 2]> = data.iter().map(|(x, y)| [*x, *y]).collect();
    Plot::new(("sweep_plot", parameter.label()))
        .height(280.0)
        .x_axis_label(parameter.label())
        .y_axis_label("Coefficient (mm^-1)")
        .show_grid(true)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(TRANSMISSION_COLOR).width(2.0));
            plot_ui.vline(
                VLine::new(current)
                    .color(Color32::GRAY)
                    .style(egui_plot::LineStyle::dashed_loose())
                    .name("Current value"),
            );
        });
}

/// Every trace of one library spectrum, skipping missing samples.
pub(crate) fn spectrum_plot(ui: &mut egui::Ui, spectrum: &CrossSectionSpectrum) {
    const PALETTE: [Color32; 4] = [
        TRANSMISSION_COLOR,
        WATER_COLOR,
        Color32::from_rgb(44, 160, 44),
        Color32::from_rgb(148, 103, 189),
    ];
    Plot::new(("spectrum_plot", spectrum.name.as_str()))
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Wavelength (nm)")
        .y_axis_label("Cross-section (GM)")
        .show_grid(true)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for (idx, trace) in spectrum.traces.iter().enumerate() {
                plot_ui.line(
                    Line::new(series(&spectrum.wavelengths, &trace.values))
                        .color(PALETTE[idx % PALETTE.len()])
                        .name(&trace.name),
                );
            }
        });
}

fn series(xs: &[f64], ys: &[f64]) -> PlotPoints {
    xs.iter()
        .zip(ys)
        .filter(|(_, y)| y.is_finite())
        .map(|(x, y)| [*x, *y])
        .collect()
}
