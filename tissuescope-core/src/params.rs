use crate::validation::Validator;
use serde::{Deserialize, Serialize};
use std::fmt;
use tissue::TissueParams;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("unknown parameter '{0}'")]
    Unknown(String),
    #[error("{key} expects a {expected} value")]
    WrongKind {
        key: ParameterKey,
        expected: ParameterKind,
    },
    #[error("{key} must be within {min}..={max}, got {value}")]
    OutOfRange {
        key: ParameterKey,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{key} needs start < end within {min}..={max}, got ({lo}, {hi})")]
    InvalidRange {
        key: ParameterKey,
        min: f64,
        max: f64,
        lo: f64,
        hi: f64,
    },
    #[error("invalid parameter patch: {0}")]
    Patch(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Float,
    Range,
    Flag,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParameterKind::Float => "number",
            ParameterKind::Range => "(start, end) range",
            ParameterKind::Flag => "boolean",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKey {
    WavelengthRange,
    NormalizationWavelength,
    AbsorptionThreshold,
    Depth,
    WaterContent,
    Anisotropy,
    ScatteringScale,
    ScatteringPower,
    TwoPhotonEnabled,
    LambdaA,
    LambdaB,
}

impl ParameterKey {
    pub const ALL: [ParameterKey; 11] = [
        ParameterKey::WavelengthRange,
        ParameterKey::NormalizationWavelength,
        ParameterKey::AbsorptionThreshold,
        ParameterKey::Depth,
        ParameterKey::WaterContent,
        ParameterKey::Anisotropy,
        ParameterKey::ScatteringScale,
        ParameterKey::ScatteringPower,
        ParameterKey::TwoPhotonEnabled,
        ParameterKey::LambdaA,
        ParameterKey::LambdaB,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParameterKey::WavelengthRange => "wavelength_range",
            ParameterKey::NormalizationWavelength => "normalization_wavelength",
            ParameterKey::AbsorptionThreshold => "absorption_threshold",
            ParameterKey::Depth => "depth",
            ParameterKey::WaterContent => "water_content",
            ParameterKey::Anisotropy => "anisotropy",
            ParameterKey::ScatteringScale => "scattering_scale",
            ParameterKey::ScatteringPower => "scattering_power",
            ParameterKey::TwoPhotonEnabled => "two_photon_enabled",
            ParameterKey::LambdaA => "lambda_a",
            ParameterKey::LambdaB => "lambda_b",
        }
    }

    pub fn from_name(name: &str) -> Option<ParameterKey> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            ParameterKey::WavelengthRange => "Wavelength range (nm)",
            ParameterKey::NormalizationWavelength => "Normalization wavelength (nm)",
            ParameterKey::AbsorptionThreshold => "Absorption threshold (%)",
            ParameterKey::Depth => "Tissue depth (mm)",
            ParameterKey::WaterContent => "Water content",
            ParameterKey::Anisotropy => "Anisotropy (g)",
            ParameterKey::ScatteringScale => "Scattering scale a (mm^-1)",
            ParameterKey::ScatteringPower => "Scattering power b",
            ParameterKey::TwoPhotonEnabled => "Two-photon comparison",
            ParameterKey::LambdaA => "Wavelength A (nm)",
            ParameterKey::LambdaB => "Wavelength B (nm)",
        }
    }

    pub fn kind(self) -> ParameterKind {
        match self {
            ParameterKey::WavelengthRange => ParameterKind::Range,
            ParameterKey::TwoPhotonEnabled => ParameterKind::Flag,
            _ => ParameterKind::Float,
        }
    }

    /// Inclusive bounds for numeric parameters; `None` for flags.
    pub fn bounds(self) -> Option<(f64, f64)> {
        match self {
            ParameterKey::WavelengthRange => Some((700.0, 2400.0)),
            ParameterKey::NormalizationWavelength => Some((800.0, 2400.0)),
            ParameterKey::AbsorptionThreshold => Some((0.0, 100.0)),
            ParameterKey::Depth => Some((0.1, 10.0)),
            ParameterKey::WaterContent => Some((0.0, 1.0)),
            ParameterKey::Anisotropy => Some((0.0, 0.99)),
            ParameterKey::ScatteringScale | ParameterKey::ScatteringPower => Some((0.5, 2.0)),
            ParameterKey::TwoPhotonEnabled => None,
            ParameterKey::LambdaA | ParameterKey::LambdaB => Some((700.0, 2400.0)),
        }
    }

    /// Slider step used by the parameter forms.
    pub fn step(self) -> f64 {
        match self {
            ParameterKey::WavelengthRange
            | ParameterKey::NormalizationWavelength
            | ParameterKey::LambdaA
            | ParameterKey::LambdaB => 10.0,
            ParameterKey::AbsorptionThreshold => 5.0,
            ParameterKey::Depth => 0.1,
            ParameterKey::WaterContent | ParameterKey::Anisotropy => 0.01,
            ParameterKey::ScatteringScale | ParameterKey::ScatteringPower => 0.05,
            ParameterKey::TwoPhotonEnabled => 1.0,
        }
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Float(f64),
    Range(f64, f64),
    Flag(bool),
}

impl ParameterValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Float(_) => ParameterKind::Float,
            ParameterValue::Range(..) => ParameterKind::Range,
            ParameterValue::Flag(_) => ParameterKind::Flag,
        }
    }

    /// Reads a value of `key`'s kind from JSON: a number, a `[start, end]` array,
    /// or a boolean.
    pub fn from_json(
        key: ParameterKey,
        value: &serde_json::Value,
    ) -> Result<ParameterValue, ParameterError> {
        let wrong_kind = || ParameterError::WrongKind {
            key,
            expected: key.kind(),
        };
        match key.kind() {
            ParameterKind::Float => value
                .as_f64()
                .map(ParameterValue::Float)
                .ok_or_else(wrong_kind),
            ParameterKind::Flag => value
                .as_bool()
                .map(ParameterValue::Flag)
                .ok_or_else(wrong_kind),
            ParameterKind::Range => {
                let array = value.as_array().ok_or_else(wrong_kind)?;
                match array.as_slice() {
                    [lo, hi] => match (lo.as_f64(), hi.as_f64()) {
                        (Some(lo), Some(hi)) => Ok(ParameterValue::Range(lo, hi)),
                        _ => Err(wrong_kind()),
                    },
                    _ => Err(wrong_kind()),
                }
            }
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Float(v) => write!(f, "{v}"),
            ParameterValue::Range(lo, hi) => write!(f, "{lo}-{hi}"),
            ParameterValue::Flag(v) => write!(f, "{v}"),
        }
    }
}

/// The user-entered parameter set of one session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionParameters {
    pub wavelength_range: (f64, f64),
    pub normalization_wavelength: f64,
    pub absorption_threshold: f64,
    pub depth: f64,
    pub water_content: f64,
    pub anisotropy: f64,
    pub scattering_scale: f64,
    pub scattering_power: f64,
    pub two_photon_enabled: bool,
    pub lambda_a: f64,
    pub lambda_b: f64,
}

impl Default for SessionParameters {
    fn default() -> Self {
        let tissue = TissueParams::default();
        Self {
            wavelength_range: (700.0, 1700.0),
            normalization_wavelength: tissue.normalization_wavelength,
            absorption_threshold: 50.0,
            depth: tissue.depth,
            water_content: tissue.water_content,
            anisotropy: tissue.anisotropy,
            scattering_scale: tissue.scattering_scale,
            scattering_power: tissue.scattering_power,
            two_photon_enabled: false,
            lambda_a: 800.0,
            lambda_b: 1040.0,
        }
    }
}

impl SessionParameters {
    pub fn get(&self, key: ParameterKey) -> ParameterValue {
        use ParameterValue::*;
        match key {
            ParameterKey::WavelengthRange => Range(self.wavelength_range.0, self.wavelength_range.1),
            ParameterKey::NormalizationWavelength => Float(self.normalization_wavelength),
            ParameterKey::AbsorptionThreshold => Float(self.absorption_threshold),
            ParameterKey::Depth => Float(self.depth),
            ParameterKey::WaterContent => Float(self.water_content),
            ParameterKey::Anisotropy => Float(self.anisotropy),
            ParameterKey::ScatteringScale => Float(self.scattering_scale),
            ParameterKey::ScatteringPower => Float(self.scattering_power),
            ParameterKey::TwoPhotonEnabled => Flag(self.two_photon_enabled),
            ParameterKey::LambdaA => Float(self.lambda_a),
            ParameterKey::LambdaB => Float(self.lambda_b),
        }
    }

    fn assign(&mut self, key: ParameterKey, value: ParameterValue) {
        match (key, value) {
            (ParameterKey::WavelengthRange, ParameterValue::Range(lo, hi)) => {
                self.wavelength_range = (lo, hi)
            }
            (ParameterKey::TwoPhotonEnabled, ParameterValue::Flag(v)) => {
                self.two_photon_enabled = v
            }
            (key, ParameterValue::Float(v)) => {
                let slot = match key {
                    ParameterKey::NormalizationWavelength => &mut self.normalization_wavelength,
                    ParameterKey::AbsorptionThreshold => &mut self.absorption_threshold,
                    ParameterKey::Depth => &mut self.depth,
                    ParameterKey::WaterContent => &mut self.water_content,
                    ParameterKey::Anisotropy => &mut self.anisotropy,
                    ParameterKey::ScatteringScale => &mut self.scattering_scale,
                    ParameterKey::ScatteringPower => &mut self.scattering_power,
                    ParameterKey::LambdaA => &mut self.lambda_a,
                    ParameterKey::LambdaB => &mut self.lambda_b,
                    ParameterKey::WavelengthRange | ParameterKey::TwoPhotonEnabled => return,
                };
                *slot = v;
            }
            _ => {}
        }
    }

    /// Checks every field against its key's bounds.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for key in ParameterKey::ALL {
            check(key, &self.get(key))?;
        }
        Ok(())
    }

    pub fn tissue_params(&self) -> TissueParams {
        TissueParams {
            depth: self.depth,
            water_content: self.water_content,
            anisotropy: self.anisotropy,
            scattering_scale: self.scattering_scale,
            scattering_power: self.scattering_power,
            normalization_wavelength: self.normalization_wavelength,
        }
    }

    /// Excitation pair for the two-photon comparison, when enabled.
    pub fn two_photon_pair(&self) -> Option<(f64, f64)> {
        self.two_photon_enabled
            .then_some((self.lambda_a, self.lambda_b))
    }
}

fn check(key: ParameterKey, value: &ParameterValue) -> Result<(), ParameterError> {
    if value.kind() != key.kind() {
        return Err(ParameterError::WrongKind {
            key,
            expected: key.kind(),
        });
    }
    let Some((min, max)) = key.bounds() else {
        return Ok(());
    };
    match *value {
        ParameterValue::Float(v) if !Validator::within(v, (min, max)) => {
            Err(ParameterError::OutOfRange {
                key,
                min,
                max,
                value: v,
            })
        }
        ParameterValue::Range(lo, hi) if !Validator::validate_range(lo, hi, (min, max)) => {
            Err(ParameterError::InvalidRange {
                key,
                min,
                max,
                lo,
                hi,
            })
        }
        _ => Ok(()),
    }
}

/// Per-session parameter store shared by every page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterStore {
    values: SessionParameters,
    defaults: SessionParameters,
}

impl ParameterStore {
    /// Store whose values and reset target are `defaults`.
    pub fn with_defaults(defaults: SessionParameters) -> Self {
        Self {
            values: defaults,
            defaults,
        }
    }

    pub fn get(&self, key: ParameterKey) -> ParameterValue {
        self.values.get(key)
    }

    /// Stores `value` under `key`. Invalid values leave the store unchanged.
    pub fn set(&mut self, key: ParameterKey, value: ParameterValue) -> Result<(), ParameterError> {
        check(key, &value)?;
        if self.values.get(key) != value {
            log::debug!("parameter {key} = {value}");
        }
        self.values.assign(key, value);
        Ok(())
    }

    pub fn set_by_name(&mut self, name: &str, value: ParameterValue) -> Result<(), ParameterError> {
        let key =
            ParameterKey::from_name(name).ok_or_else(|| ParameterError::Unknown(name.to_string()))?;
        self.set(key, value)
    }

    /// Applies every entry of a JSON object, or none of them if any entry
    /// is rejected.
    pub fn apply_json_patch(&mut self, json: &str) -> Result<(), ParameterError> {
        let patch: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ParameterError::Patch(e.to_string()))?;
        let obj = patch
            .as_object()
            .ok_or_else(|| ParameterError::Patch("expected a JSON object".to_string()))?;

        let mut staged = *self;
        for (name, value) in obj {
            let key = ParameterKey::from_name(name)
                .ok_or_else(|| ParameterError::Unknown(name.clone()))?;
            staged.set(key, ParameterValue::from_json(key, value)?)?;
        }
        *self = staged;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.values = self.defaults;
    }

    pub fn values(&self) -> &SessionParameters {
        &self.values
    }

    pub fn defaults(&self) -> &SessionParameters {
        &self.defaults
    }

    /// Replaces the reset target, e.g. after the persisted defaults change.
    pub fn set_defaults(&mut self, defaults: SessionParameters) {
        self.defaults = defaults;
    }

    pub fn export_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(&self.values)
            .map_err(|e| format!("Failed to serialize parameters: {e}"))
    }

    pub fn wavelength_range(&self) -> (f64, f64) {
        self.values.wavelength_range
    }

    pub fn normalization_wavelength(&self) -> f64 {
        self.values.normalization_wavelength
    }

    pub fn absorption_threshold(&self) -> f64 {
        self.values.absorption_threshold
    }

    pub fn depth(&self) -> f64 {
        self.values.depth
    }

    pub fn water_content(&self) -> f64 {
        self.values.water_content
    }

    pub fn tissue_params(&self) -> TissueParams {
        self.values.tissue_params()
    }

    pub fn two_photon_pair(&self) -> Option<(f64, f64)> {
        self.values.two_photon_pair()
    }
}
