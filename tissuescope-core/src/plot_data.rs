use crate::visibility::VisibilityMap;
use dataset::{CrossSectionSpectrum, FluorophoreRecord, LaserRecord};
use serde::Serialize;
use tissue::TissueProfile;

/// One marker on the cross-section scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluorophorePoint {
    pub name: String,
    pub wavelength: f64,
    pub cross_section: f64,
    pub reference: String,
    /// Normalized tissue transmission at `wavelength`, when a profile is
    /// available.
    pub transmission: Option<f64>,
}

impl FluorophorePoint {
    /// Cross-section weighted by tissue transmission.
    pub fn effective_cross_section(&self) -> Option<f64> {
        self.transmission.map(|t| self.cross_section * t)
    }
}

/// Laser overlay clipped to the plotted wavelength range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaserBand {
    pub name: String,
    pub start_nm: f64,
    pub end_nm: f64,
    pub color: String,
    pub single_line: bool,
}

pub fn fluorophore_points(
    records: &[FluorophoreRecord],
    visibility: &VisibilityMap,
    profile: Option<&TissueProfile>,
) -> Vec<FluorophorePoint> {
    visibility
        .visible_fluorophores(records)
        .into_iter()
        .map(|record| FluorophorePoint {
            name: record.name.clone(),
            wavelength: record.wavelength,
            cross_section: record.cross_section,
            reference: record.reference.clone(),
            transmission: profile.and_then(|p| p.transmission_at(record.wavelength)),
        })
        .collect()
}

pub fn laser_bands(lasers: &[LaserRecord], range: (f64, f64)) -> Vec<LaserBand> {
    lasers
        .iter()
        .filter_map(|laser| {
            let (start_nm, end_nm) = laser.clipped_to(range.0, range.1)?;
            Some(LaserBand {
                name: laser.name.clone(),
                start_nm,
                end_nm,
                color: laser.color.clone(),
                single_line: laser.is_single_line(),
            })
        })
        .collect()
}

/// Peak statistics of one trace in the cross-section library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryPeak {
    pub fluorophore: String,
    pub trace: String,
    pub peak_wavelength: f64,
    pub peak_cross_section: f64,
    pub mean_cross_section: f64,
    pub mean_uncertainty: Option<f64>,
}

pub fn library_peaks(spectra: &[CrossSectionSpectrum]) -> Vec<LibraryPeak> {
    spectra
        .iter()
        .flat_map(|spectrum| {
            let uncertainty = spectrum.mean_uncertainty();
            spectrum.stats().into_iter().map(move |stats| LibraryPeak {
                fluorophore: spectrum.name.clone(),
                trace: stats.trace,
                peak_wavelength: stats.peak_wavelength,
                peak_cross_section: stats.peak_cross_section,
                mean_cross_section: stats.mean_cross_section,
                mean_uncertainty: uncertainty,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lasers_outside_range_are_dropped() {
        let lasers = dataset::default_lasers();
        let bands = laser_bands(&lasers, (700.0, 1100.0));
        let names: Vec<_> = bands.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Ti:Sapphire", "Yb fiber", "OPO/OPA"]);
        let opo = &bands[2];
        assert_eq!((opo.start_nm, opo.end_nm), (1100.0, 1100.0));
    }

    #[test]
    fn hidden_fluorophores_are_not_plotted() {
        let records = vec![
            FluorophoreRecord::new("EGFP", 920.0, 39.0, "Zipfel Lab"),
            FluorophoreRecord::new("mCherry", 1080.0, 27.0, "FPbase"),
        ];
        let mut visibility = VisibilityMap::default();
        visibility.sync(&records);
        visibility.set_visible("EGFP", false);
        let points = fluorophore_points(&records, &visibility, None);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].name, "mCherry");
        assert_eq!(points[0].effective_cross_section(), None);
    }
}
