use crate::{open_existing, DatasetError, LoadReport};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Header lines preceding the data in the water absorption table.
const HEADER_LINES: usize = 6;
const FALLBACK_POINTS: usize = 1000;
const FALLBACK_RANGE_NM: (f64, f64) = (800.0, 2400.0);

/// `n` evenly spaced values over `start..=end`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Water absorption spectrum sorted by ascending wavelength (nm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterAbsorption {
    pub wavelengths: Vec<f64>,
    pub absorption: Vec<f64>,
    #[serde(default)]
    pub fallback: bool,
}

impl WaterAbsorption {
    /// Flat zero-absorption table used when no measured data is available.
    pub fn fallback() -> Self {
        let wavelengths = linspace(FALLBACK_RANGE_NM.0, FALLBACK_RANGE_NM.1, FALLBACK_POINTS);
        let absorption = vec![0.0; wavelengths.len()];
        Self {
            wavelengths,
            absorption,
            fallback: true,
        }
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// Parses the whitespace-separated two-column table. The first six lines
    /// are header text and `#` starts a comment.
    pub fn read<R: Read>(reader: R) -> Result<LoadReport<(f64, f64)>, DatasetError> {
        let mut report = LoadReport::new();
        // The table ships in latin-1, so lines are decoded lossily.
        for (idx, bytes) in BufReader::new(reader).split(b'\n').enumerate() {
            let bytes = bytes?;
            if idx < HEADER_LINES {
                continue;
            }
            let line_no = idx as u64 + 1;
            let text = String::from_utf8_lossy(&bytes);
            let data = text.split('#').next().unwrap_or("").trim();
            if data.is_empty() {
                continue;
            }
            let mut fields = data.split_whitespace().map(str::parse::<f64>);
            match (fields.next(), fields.next()) {
                (Some(Ok(wavelength)), Some(Ok(absorption)))
                    if wavelength.is_finite() && absorption.is_finite() =>
                {
                    report.records.push((wavelength, absorption));
                }
                _ => report.warn(line_no, format!("unreadable absorption row '{data}'")),
            }
        }
        Ok(report)
    }

    pub fn from_points(mut points: Vec<(f64, f64)>) -> Self {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (wavelengths, absorption) = points.into_iter().unzip();
        Self {
            wavelengths,
            absorption,
            fallback: false,
        }
    }

    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = open_existing(path)?;
        let report = Self::read(file)?;
        if report.records.is_empty() {
            return Err(DatasetError::Empty(crate::source_name(path)));
        }
        Ok(Self::from_points(report.records))
    }

    /// Loads the table or falls back to [`WaterAbsorption::fallback`],
    /// returning the reason for the fallback alongside it.
    pub fn load_or_fallback(path: &Path) -> (Self, Option<String>) {
        match Self::load(path) {
            Ok(table) => {
                log::info!(
                    "loaded {} water absorption points from {}",
                    table.len(),
                    path.display()
                );
                (table, None)
            }
            Err(err) => {
                let message = format!("Error loading water absorption data: {err}");
                log::warn!("{message}; using zero-absorption fallback");
                (Self::fallback(), Some(message))
            }
        }
    }

    /// Linear interpolation, clamped to the end values outside the table.
    pub fn interpolate(&self, wavelength: f64) -> f64 {
        let (Some(first), Some(last)) = (self.wavelengths.first(), self.wavelengths.last()) else {
            return 0.0;
        };
        if wavelength <= *first {
            return self.absorption[0];
        }
        if wavelength >= *last {
            return self.absorption[self.absorption.len() - 1];
        }
        let upper = self.wavelengths.partition_point(|w| *w < wavelength);
        let (x0, x1) = (self.wavelengths[upper - 1], self.wavelengths[upper]);
        let (y0, y1) = (self.absorption[upper - 1], self.absorption[upper]);
        if x1 == x0 {
            return y1;
        }
        y0 + (y1 - y0) * (wavelength - x0) / (x1 - x0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "Kou, Labrie, Chylek\nApplied Optics 1993\n\nheader\nlambda k\n----\n2000 11.0\n1500 2.0 # peak shoulder\n\n# comment line\n1000 0.5\n";

    #[test]
    fn reads_after_header_and_sorts() {
        let report = WaterAbsorption::read(TABLE.as_bytes()).unwrap();
        assert!(report.warnings.is_empty());
        let table = WaterAbsorption::from_points(report.records);
        assert_eq!(table.wavelengths, vec![1000.0, 1500.0, 2000.0]);
        assert_eq!(table.absorption, vec![0.5, 2.0, 11.0]);
    }

    #[test]
    fn interpolation_clamps_at_edges() {
        let table = WaterAbsorption::from_points(vec![(1000.0, 1.0), (2000.0, 3.0)]);
        assert_eq!(table.interpolate(500.0), 1.0);
        assert_eq!(table.interpolate(2500.0), 3.0);
        assert!((table.interpolate(1500.0) - 2.0).abs() < 1e-12);
        assert!((table.interpolate(1250.0) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn fallback_is_flat() {
        let table = WaterAbsorption::fallback();
        assert_eq!(table.len(), 1000);
        assert_eq!(table.wavelengths[0], 800.0);
        assert_eq!(table.wavelengths[999], 2400.0);
        assert!(table.absorption.iter().all(|a| *a == 0.0));
        assert!(table.fallback);
    }

    #[test]
    fn linspace_edges() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(5.0, 9.0, 1), vec![5.0]);
        assert_eq!(linspace(0.0, 2.0, 3), vec![0.0, 1.0, 2.0]);
    }
}
