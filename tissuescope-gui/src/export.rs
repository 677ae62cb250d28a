use plotters::backend::SVGBackend;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::path::Path;
use tissue::TissueProfile;
use tissuescope_core::markers::MarkerShape;
use tissuescope_core::{FluorophorePoint, LaserBand, MarkerStyles};

type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn rgb(hex: &str) -> RGBColor {
    let [r, g, b] = dataset::laser::parse_hex_color(hex).unwrap_or([128, 128, 128]);
    RGBColor(r, g, b)
}

fn draw_markers(
    chart: &mut Chart<'_, '_>,
    coords: Vec<(f64, f64)>,
    shape: MarkerShape,
    color: RGBColor,
    label: &str,
) -> Result<(), String> {
    let style = color.filled();
    let anno = match shape {
        MarkerShape::Circle => chart
            .draw_series(
                coords
                    .iter()
                    .map(|c| EmptyElement::at(*c) + Circle::new((0, 0), 5, style)),
            )
            .map_err(|e| e.to_string())?,
        MarkerShape::Square | MarkerShape::Diamond => chart
            .draw_series(
                coords
                    .iter()
                    .map(|c| EmptyElement::at(*c) + Rectangle::new([(-4, -4), (4, 4)], style)),
            )
            .map_err(|e| e.to_string())?,
        MarkerShape::TriangleUp => chart
            .draw_series(
                coords
                    .iter()
                    .map(|c| EmptyElement::at(*c) + TriangleMarker::new((0, 0), 6, style)),
            )
            .map_err(|e| e.to_string())?,
        MarkerShape::TriangleDown => chart
            .draw_series(coords.iter().map(|c| {
                EmptyElement::at(*c) + Polygon::new(vec![(-5, -4), (5, -4), (0, 5)], style)
            }))
            .map_err(|e| e.to_string())?,
        MarkerShape::Star => chart
            .draw_series(
                coords
                    .iter()
                    .map(|c| EmptyElement::at(*c) + Cross::new((0, 0), 5, color.stroke_width(2))),
            )
            .map_err(|e| e.to_string())?,
    };
    let label = label.to_string();
    anno.label(if label.is_empty() { "(no reference)".to_string() } else { label })
        .legend(move |(x, y)| Circle::new((x, y), 5, style));
    Ok(())
}

/// Writes the cross-section scatter plot, with laser ranges shaded behind
/// the markers, as an SVG file.
pub fn export_cross_section_svg(
    path: &Path,
    points: &[FluorophorePoint],
    bands: &[LaserBand],
    range: (f64, f64),
    markers: &MarkerStyles,
    size: (u32, u32),
) -> Result<(), String> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let max_y = points
        .iter()
        .map(|p| p.cross_section)
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Two-photon cross-sections", ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(range.0..range.1, 0.0..max_y)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_desc("Wavelength (nm)")
        .y_desc("Cross-section (GM)")
        .draw()
        .map_err(|e| e.to_string())?;

    for band in bands {
        let color = rgb(&band.color);
        if band.single_line {
            chart
                .draw_series(LineSeries::new(
                    vec![(band.start_nm, 0.0), (band.start_nm, max_y)],
                    color.stroke_width(2),
                ))
                .map_err(|e| e.to_string())?;
        } else {
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(band.start_nm, 0.0), (band.end_nm, max_y)],
                    color.mix(0.2).filled(),
                )))
                .map_err(|e| e.to_string())?;
        }
    }

    let mut references: Vec<&str> = Vec::new();
    for point in points {
        if !references.contains(&point.reference.as_str()) {
            references.push(&point.reference);
        }
    }
    for reference in references {
        let coords: Vec<(f64, f64)> = points
            .iter()
            .filter(|p| p.reference == reference)
            .map(|p| (p.wavelength, p.cross_section))
            .collect();
        let (shape, color) = match markers.get(reference) {
            Some(style) => (style.shape, rgb(&style.color)),
            None => (MarkerShape::Circle, RGBColor(0, 0, 139)),
        };
        draw_markers(&mut chart, coords, shape, color, reference)?;
    }

    if !points.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .map_err(|e| e.to_string())?;
    }

    root.present().map_err(|e| e.to_string())?;
    log::info!("exported cross-section plot to {}", path.display());
    Ok(())
}

/// Writes normalized transmission and water absorption against wavelength
/// as an SVG file, shading bands above `threshold_percent`.
pub fn export_transmission_svg(
    path: &Path,
    profile: &TissueProfile,
    threshold_percent: f64,
    size: (u32, u32),
) -> Result<(), String> {
    let (Some(&lo), Some(&hi)) = (profile.wavelengths.first(), profile.wavelengths.last()) else {
        return Err("Nothing to export: empty wavelength grid".to_string());
    };
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let max_y = profile
        .transmission
        .iter()
        .copied()
        .filter(|t| t.is_finite())
        .fold(1.0_f64, f64::max)
        * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Tissue transmission", ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(lo..hi, 0.0..max_y)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_desc("Wavelength (nm)")
        .y_desc("Relative value")
        .draw()
        .map_err(|e| e.to_string())?;

    for (start, end) in profile.high_absorption_bands(threshold_percent) {
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(start, 0.0), (end, max_y)],
                RGBColor(255, 0, 0).mix(0.1).filled(),
            )))
            .map_err(|e| e.to_string())?;
    }

    let transmission = RGBColor(31, 119, 180);
    chart
        .draw_series(LineSeries::new(
            profile
                .wavelengths
                .iter()
                .copied()
                .zip(profile.transmission.iter().copied()),
            transmission.stroke_width(3),
        ))
        .map_err(|e| e.to_string())?
        .label("Normalized transmission")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], transmission));

    let water = RGBColor(214, 39, 40);
    chart
        .draw_series(LineSeries::new(
            profile
                .wavelengths
                .iter()
                .copied()
                .zip(profile.water_absorption.iter().copied()),
            water.stroke_width(2),
        ))
        .map_err(|e| e.to_string())?
        .label("Water absorption")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], water));

    let peak = profile.max_transmission_wavelength;
    chart
        .draw_series(LineSeries::new(
            vec![(peak, 0.0), (peak, max_y)],
            BLACK.stroke_width(1),
        ))
        .map_err(|e| e.to_string())?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())?;
    log::info!("exported transmission plot to {}", path.display());
    Ok(())
}
