use crate::{open_existing, source_name, DatasetError, LoadReport};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

const WAVELENGTH_COLUMN: &str = "wavelength";
const UNCERTAINTY_COLUMNS: [&str; 2] = ["std_dev", "sd"];
const PRIMARY_TRACE: &str = "cross_section";

/// One named cross-section trace sampled on the spectrum's wavelength grid.
/// Missing samples are stored as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumTrace {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStats {
    pub trace: String,
    pub peak_wavelength: f64,
    pub peak_cross_section: f64,
    pub mean_cross_section: f64,
}

/// Two-photon cross-section samples for one fluorophore (or a family of
/// related forms sharing a wavelength grid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionSpectrum {
    pub name: String,
    pub wavelengths: Vec<f64>,
    pub traces: Vec<SpectrumTrace>,
    pub uncertainty: Option<Vec<f64>>,
}

impl CrossSectionSpectrum {
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// The trace named `cross_section`, otherwise the first one.
    pub fn primary_trace(&self) -> Option<&SpectrumTrace> {
        self.traces
            .iter()
            .find(|trace| trace.name == PRIMARY_TRACE)
            .or_else(|| self.traces.first())
    }

    pub fn trace(&self, name: &str) -> Option<&SpectrumTrace> {
        self.traces.iter().find(|trace| trace.name == name)
    }

    pub fn trace_stats(&self, trace: &SpectrumTrace) -> Option<TraceStats> {
        let mut peak: Option<(f64, f64)> = None;
        let mut sum = 0.0;
        let mut count = 0usize;
        for (wavelength, value) in self.wavelengths.iter().zip(&trace.values) {
            if !value.is_finite() {
                continue;
            }
            sum += value;
            count += 1;
            if peak.map_or(true, |(_, best)| *value > best) {
                peak = Some((*wavelength, *value));
            }
        }
        let (peak_wavelength, peak_cross_section) = peak?;
        Some(TraceStats {
            trace: trace.name.clone(),
            peak_wavelength,
            peak_cross_section,
            mean_cross_section: sum / count as f64,
        })
    }

    /// Peak statistics for every trace, in column order.
    pub fn stats(&self) -> Vec<TraceStats> {
        self.traces
            .iter()
            .filter_map(|trace| self.trace_stats(trace))
            .collect()
    }

    pub fn mean_uncertainty(&self) -> Option<f64> {
        let values: Vec<f64> = self
            .uncertainty
            .as_ref()?
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn parse_cell(cell: Option<&str>) -> f64 {
    cell.and_then(|value| value.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Reads a spectrum table with a `wavelength` column followed by one or
/// more trace columns. Rows with an unreadable wavelength are skipped.
pub fn read_spectrum<R: Read>(
    reader: R,
    name: &str,
) -> Result<(CrossSectionSpectrum, Vec<crate::RowWarning>), DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    let wavelength_idx = columns
        .iter()
        .position(|c| c == WAVELENGTH_COLUMN)
        .ok_or_else(|| DatasetError::MissingColumn {
            source_name: name.to_string(),
            column: WAVELENGTH_COLUMN.to_string(),
        })?;
    let uncertainty_idx = columns
        .iter()
        .position(|c| UNCERTAINTY_COLUMNS.contains(&c.as_str()));
    let trace_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != wavelength_idx && Some(*idx) != uncertainty_idx)
        .map(|(idx, header)| (idx, header.trim().to_string()))
        .collect();
    if trace_columns.is_empty() {
        return Err(DatasetError::MissingColumn {
            source_name: name.to_string(),
            column: PRIMARY_TRACE.to_string(),
        });
    }

    let mut spectrum = CrossSectionSpectrum {
        name: name.to_string(),
        wavelengths: Vec::new(),
        traces: trace_columns
            .iter()
            .map(|(_, trace)| SpectrumTrace {
                name: trace.clone(),
                values: Vec::new(),
            })
            .collect(),
        uncertainty: uncertainty_idx.map(|_| Vec::new()),
    };
    let mut report: LoadReport<()> = LoadReport::new();
    let mut line = 1;
    for row in csv_reader.records() {
        line += 1;
        let record = match row {
            Ok(record) => record,
            Err(err) => {
                report.warn(line, format!("{name}: malformed row: {err}"));
                continue;
            }
        };
        let wavelength = parse_cell(record.get(wavelength_idx));
        if !wavelength.is_finite() {
            report.warn(line, format!("{name}: unreadable wavelength"));
            continue;
        }
        spectrum.wavelengths.push(wavelength);
        for (trace, (idx, _)) in spectrum.traces.iter_mut().zip(&trace_columns) {
            trace.values.push(parse_cell(record.get(*idx)));
        }
        if let (Some(values), Some(idx)) = (spectrum.uncertainty.as_mut(), uncertainty_idx) {
            values.push(parse_cell(record.get(idx)));
        }
    }
    if spectrum.is_empty() {
        return Err(DatasetError::Empty(name.to_string()));
    }
    Ok((spectrum, report.warnings))
}

pub fn load_spectrum(
    path: &Path,
) -> Result<(CrossSectionSpectrum, Vec<crate::RowWarning>), DatasetError> {
    let file = open_existing(path)?;
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| source_name(path));
    read_spectrum(file, &name)
}

/// Loads every `*.csv` in `dir` as a spectrum, sorted by name. Files that
/// fail to load are reported as warnings rather than failing the library.
pub fn load_cross_section_library(
    dir: &Path,
) -> Result<LoadReport<CrossSectionSpectrum>, DatasetError> {
    if !dir.is_dir() {
        return Err(DatasetError::NotFound(dir.to_path_buf()));
    }
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("csv"))
        .collect();
    paths.sort();

    let mut report = LoadReport::new();
    for path in paths {
        match load_spectrum(&path) {
            Ok((spectrum, warnings)) => {
                report.warnings.extend(warnings);
                report.records.push(spectrum);
            }
            Err(err) => report.warn(0, format!("{}: {err}", source_name(&path))),
        }
    }
    report.records.sort_by(|a, b| a.name.cmp(&b.name));
    log::info!(
        "loaded {} cross-section spectra from {}",
        report.records.len(),
        dir.display()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_pick_peak_and_skip_missing() {
        let data = "wavelength,cross_section,std_dev\n700,1.0,0.1\n720,,0.2\n740,3.5,0.3\n760,2.0,\n";
        let (spectrum, warnings) = read_spectrum(data.as_bytes(), "Fluorescein").unwrap();
        assert!(warnings.is_empty());
        assert_eq!(spectrum.len(), 4);
        let stats = spectrum.stats();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].peak_wavelength, 740.0);
        assert_eq!(stats[0].peak_cross_section, 3.5);
        assert!((stats[0].mean_cross_section - 6.5 / 3.0).abs() < 1e-12);
        assert!((spectrum.mean_uncertainty().unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn multiple_traces_keep_column_order() {
        let data = "wavelength,gm_mean,gm_mdh,gm_ad\n700,1,2,3\n710,4,1,0\n";
        let (spectrum, _) = read_spectrum(data.as_bytes(), "NADH").unwrap();
        let names: Vec<_> = spectrum.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["gm_mean", "gm_mdh", "gm_ad"]);
        assert_eq!(spectrum.primary_trace().unwrap().name, "gm_mean");
        let stats = spectrum.stats();
        assert_eq!(stats[0].peak_wavelength, 710.0);
        assert_eq!(stats[1].peak_wavelength, 700.0);
        assert!(spectrum.uncertainty.is_none());
    }

    #[test]
    fn bad_wavelength_row_is_skipped() {
        let data = "wavelength,cross_section\n700,1\nabc,2\n720,3\n";
        let (spectrum, warnings) = read_spectrum(data.as_bytes(), "x").unwrap();
        assert_eq!(spectrum.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, 3);
    }

    #[test]
    fn missing_wavelength_column_fails() {
        let data = "lambda,cross_section\n700,1\n";
        assert!(matches!(
            read_spectrum(data.as_bytes(), "x"),
            Err(DatasetError::MissingColumn { .. })
        ));
    }
}
