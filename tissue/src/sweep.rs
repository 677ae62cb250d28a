use crate::TissueParams;
use dataset::{linspace, WaterAbsorption};
use serde::{Deserialize, Serialize};

/// Parameters whose effect on the attenuation coefficients can be swept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepParameter {
    Anisotropy,
    ScatteringPower,
    ScatteringScale,
    WaterContent,
}

impl SweepParameter {
    pub fn label(self) -> &'static str {
        match self {
            Self::Anisotropy => "Anisotropy (g)",
            Self::ScatteringPower => "Scattering Power (b)",
            Self::ScatteringScale => "Scattering Scale (a)",
            Self::WaterContent => "Water Content",
        }
    }

    /// Plotted range of the parameter.
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Anisotropy => (0.1, 0.99),
            Self::ScatteringPower => (0.5, 2.0),
            Self::ScatteringScale => (0.5, 2.0),
            Self::WaterContent => (0.0, 1.0),
        }
    }

    pub fn current(self, params: &TissueParams) -> f64 {
        match self {
            Self::Anisotropy => params.anisotropy,
            Self::ScatteringPower => params.scattering_power,
            Self::ScatteringScale => params.scattering_scale,
            Self::WaterContent => params.water_content,
        }
    }

    fn apply(self, params: &mut TissueParams, value: f64) {
        match self {
            Self::Anisotropy => params.anisotropy = value,
            Self::ScatteringPower => params.scattering_power = value,
            Self::ScatteringScale => params.scattering_scale = value,
            Self::WaterContent => params.water_content = value,
        }
    }

    fn is_absorption(self) -> bool {
        matches!(self, Self::WaterContent)
    }
}

/// Coefficient at `reference_nm` as `parameter` varies over its range:
/// scattering for the scattering parameters, absorption for water content.
pub fn sweep_coefficient(
    parameter: SweepParameter,
    params: &TissueParams,
    water: &WaterAbsorption,
    reference_nm: f64,
    points: usize,
) -> Vec<(f64, f64)> {
    let (lo, hi) = parameter.range();
    linspace(lo, hi, points)
        .into_iter()
        .map(|value| {
            let mut varied = *params;
            parameter.apply(&mut varied, value);
            let coefficient = if parameter.is_absorption() {
                varied.absorption(reference_nm, water)
            } else {
                varied.scattering(reference_nm)
            };
            (value, coefficient)
        })
        .collect()
}
