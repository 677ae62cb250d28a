use dataset::WaterAbsorption;
use serde::{Deserialize, Serialize};

pub mod sweep;

pub use sweep::{sweep_coefficient, SweepParameter};

/// Wavelength at which the scattering power law is anchored (nm).
pub const SCATTERING_REFERENCE_NM: f64 = 500.0;
/// Number of points in an analysis wavelength grid.
pub const GRID_POINTS: usize = 1000;
/// Depth profile covers 0..=2 mm in 0.1 mm steps.
pub const DEPTH_PROFILE_STEPS: usize = 20;
pub const DEPTH_PROFILE_STEP_MM: f64 = 0.1;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TissueError {
    #[error("wavelength grid is empty")]
    EmptyGrid,
    #[error("invalid tissue parameter: {0}")]
    InvalidParameter(String),
}

/// Optical properties of the imaged tissue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TissueParams {
    /// Imaging depth z in mm.
    pub depth: f64,
    /// Water volume fraction w (0..=1).
    pub water_content: f64,
    /// Scattering anisotropy g.
    pub anisotropy: f64,
    /// Scattering amplitude a in mm^-1.
    pub scattering_scale: f64,
    /// Scattering power b.
    pub scattering_power: f64,
    /// Wavelength at which transmission is normalized to 1 (nm).
    pub normalization_wavelength: f64,
}

impl Default for TissueParams {
    fn default() -> Self {
        Self {
            depth: 1.0,
            water_content: 0.75,
            anisotropy: 0.9,
            scattering_scale: 1.1,
            scattering_power: 1.37,
            normalization_wavelength: 1300.0,
        }
    }
}

impl TissueParams {
    pub fn validate(&self) -> Result<(), TissueError> {
        let finite = [
            self.depth,
            self.water_content,
            self.anisotropy,
            self.scattering_scale,
            self.scattering_power,
            self.normalization_wavelength,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(TissueError::InvalidParameter(
                "all parameters must be finite".to_string(),
            ));
        }
        if self.depth < 0.0 {
            return Err(TissueError::InvalidParameter("depth must be >= 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.water_content) {
            return Err(TissueError::InvalidParameter(
                "water content must be within 0..=1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.anisotropy) {
            return Err(TissueError::InvalidParameter(
                "anisotropy must be within 0..1".to_string(),
            ));
        }
        if self.scattering_scale <= 0.0 {
            return Err(TissueError::InvalidParameter(
                "scattering scale must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Reduced scattering coefficient mu_s' = a * (lambda / 500)^-b, in mm^-1.
    pub fn reduced_scattering(&self, wavelength: f64) -> f64 {
        self.scattering_scale * (wavelength / SCATTERING_REFERENCE_NM).powf(-self.scattering_power)
    }

    /// Scattering coefficient mu_s = mu_s' / (1 - g), in mm^-1.
    pub fn scattering(&self, wavelength: f64) -> f64 {
        self.reduced_scattering(wavelength) / (1.0 - self.anisotropy)
    }

    /// Absorption coefficient mu_a from the water table scaled by water content.
    pub fn absorption(&self, wavelength: f64, water: &WaterAbsorption) -> f64 {
        water.interpolate(wavelength) * self.water_content / 10.0
    }
}

/// Effective two-photon wavelength of a pair of excitation wavelengths,
/// rounded to the nearest 5 nm.
pub fn two_photon_wavelength(lambda_a: f64, lambda_b: f64) -> f64 {
    let harmonic = 2.0 / (1.0 / lambda_a + 1.0 / lambda_b);
    (harmonic / 5.0).round() * 5.0
}

/// Index of the grid point nearest to `wavelength` (first on ties).
pub fn nearest_index(grid: &[f64], wavelength: f64) -> Option<usize> {
    grid.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (idx, w)| {
            let distance = (w - wavelength).abs();
            match best {
                Some((_, d)) if d <= distance => best,
                _ => Some((idx, distance)),
            }
        })
        .map(|(idx, _)| idx)
}

/// Analysis grid of [`GRID_POINTS`] wavelengths over `lo..=hi`.
pub fn wavelength_grid(lo: f64, hi: f64) -> Vec<f64> {
    dataset::linspace(lo, hi, GRID_POINTS)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoPhotonComparison {
    pub lambda_a: f64,
    pub lambda_b: f64,
    pub lambda_c: f64,
    /// Normalized transmission at lambda_a, lambda_b, lambda_c.
    pub transmission: [f64; 3],
    /// Water absorption fraction at lambda_a, lambda_b, lambda_c.
    pub water_absorption: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthProfile {
    pub depths: Vec<f64>,
    /// One row per depth, normalized at the normalization wavelength.
    pub transmission: Vec<Vec<f64>>,
    pub water_absorption: Vec<Vec<f64>>,
}

/// Everything the analysis pages plot for one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TissueProfile {
    pub wavelengths: Vec<f64>,
    pub scattering: Vec<f64>,
    pub absorption: Vec<f64>,
    pub transmission: Vec<f64>,
    pub water_absorption: Vec<f64>,
    pub max_transmission_wavelength: f64,
    pub depth_profile: DepthProfile,
    pub two_photon: Option<TwoPhotonComparison>,
}

impl TissueProfile {
    pub fn compute(
        wavelengths: &[f64],
        params: &TissueParams,
        water: &WaterAbsorption,
        two_photon: Option<(f64, f64)>,
    ) -> Result<Self, TissueError> {
        if wavelengths.is_empty() {
            return Err(TissueError::EmptyGrid);
        }
        params.validate()?;

        let scattering: Vec<f64> = wavelengths.iter().map(|w| params.scattering(*w)).collect();
        let absorption: Vec<f64> = wavelengths
            .iter()
            .map(|w| params.absorption(*w, water))
            .collect();
        let norm_idx = nearest_index(wavelengths, params.normalization_wavelength)
            .ok_or(TissueError::EmptyGrid)?;

        // Normalized in log space so T(lambda_n) is exactly 1 at any depth.
        let reference = scattering[norm_idx] + absorption[norm_idx];
        let attenuated = |z: f64| -> Vec<f64> {
            scattering
                .iter()
                .zip(&absorption)
                .map(|(mus, mua)| (-((mus + mua) - reference) * z).exp())
                .collect()
        };
        let water_fraction =
            |z: f64| -> Vec<f64> { absorption.iter().map(|mua| 1.0 - (-mua * z).exp()).collect() };

        let transmission = attenuated(params.depth);
        let water_absorption = water_fraction(params.depth);

        let max_idx = transmission
            .iter()
            .enumerate()
            .fold(0, |best, (idx, t)| if *t > transmission[best] { idx } else { best });
        let max_transmission_wavelength = wavelengths[max_idx];

        let depths: Vec<f64> = (0..=DEPTH_PROFILE_STEPS)
            .map(|step| step as f64 * DEPTH_PROFILE_STEP_MM)
            .collect();
        let mut depth_profile = DepthProfile {
            depths: depths.clone(),
            transmission: Vec::with_capacity(depths.len()),
            water_absorption: Vec::with_capacity(depths.len()),
        };
        for z in depths {
            depth_profile.transmission.push(attenuated(z));
            depth_profile.water_absorption.push(water_fraction(z));
        }

        let two_photon = two_photon.map(|(lambda_a, lambda_b)| {
            let lambda_c = two_photon_wavelength(lambda_a, lambda_b);
            let at = |values: &[f64], wavelength: f64| {
                nearest_index(wavelengths, wavelength)
                    .map(|idx| values[idx])
                    .unwrap_or(f64::NAN)
            };
            TwoPhotonComparison {
                lambda_a,
                lambda_b,
                lambda_c,
                transmission: [
                    at(&transmission, lambda_a),
                    at(&transmission, lambda_b),
                    at(&transmission, lambda_c),
                ],
                water_absorption: [
                    at(&water_absorption, lambda_a),
                    at(&water_absorption, lambda_b),
                    at(&water_absorption, lambda_c),
                ],
            }
        });

        log::debug!(
            "tissue profile: {} points, depth {} mm, max transmission at {} nm",
            wavelengths.len(),
            params.depth,
            max_transmission_wavelength
        );

        Ok(Self {
            wavelengths: wavelengths.to_vec(),
            scattering,
            absorption,
            transmission,
            water_absorption,
            max_transmission_wavelength,
            depth_profile,
            two_photon,
        })
    }

    /// Normalized transmission at the grid point nearest `wavelength`.
    pub fn transmission_at(&self, wavelength: f64) -> Option<f64> {
        nearest_index(&self.wavelengths, wavelength).map(|idx| self.transmission[idx])
    }

    pub fn water_absorption_at(&self, wavelength: f64) -> Option<f64> {
        nearest_index(&self.wavelengths, wavelength).map(|idx| self.water_absorption[idx])
    }

    /// Contiguous wavelength spans where water absorption exceeds
    /// `threshold_percent`.
    pub fn high_absorption_bands(&self, threshold_percent: f64) -> Vec<(f64, f64)> {
        high_absorption_bands(&self.wavelengths, &self.water_absorption, threshold_percent)
    }
}

pub fn high_absorption_bands(
    wavelengths: &[f64],
    water_absorption: &[f64],
    threshold_percent: f64,
) -> Vec<(f64, f64)> {
    let mut bands = Vec::new();
    let mut start: Option<f64> = None;
    let mut last = 0.0;
    for (wavelength, fraction) in wavelengths.iter().zip(water_absorption) {
        if fraction * 100.0 > threshold_percent {
            if start.is_none() {
                start = Some(*wavelength);
            }
            last = *wavelength;
        } else if let Some(begin) = start.take() {
            bands.push((begin, last));
        }
    }
    if let Some(begin) = start {
        bands.push((begin, last));
    }
    bands
}
