use crate::{ensure_columns, numbered_rows, open_existing, source_name, DatasetError, LoadReport};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

pub const LASER_COLUMNS: [&str; 5] = ["Name", "Start_nm", "End_nm", "Color", "Power_mW"];

const REQUIRED_LASER_COLUMNS: [&str; 3] = ["Name", "Start_nm", "End_nm"];
const FALLBACK_LASER_COLOR: &str = "#808080";

/// A laser source shown as an overlay on the analysis plots.
///
/// Tunable sources span `start_nm..=end_nm`; a fixed-line laser has
/// `start_nm == end_nm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Start_nm")]
    pub start_nm: f64,
    #[serde(rename = "End_nm")]
    pub end_nm: f64,
    #[serde(rename = "Color", default = "fallback_color")]
    pub color: String,
    #[serde(rename = "Power_mW", default, deserialize_with = "csv::invalid_option")]
    pub power_mw: Option<f64>,
}

fn fallback_color() -> String {
    FALLBACK_LASER_COLOR.to_string()
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LaserRuleError {
    #[error("laser name must not be empty")]
    EmptyName,
    #[error("wavelengths must be positive")]
    NonPositiveWavelength,
    #[error("start wavelength must not exceed end wavelength")]
    InvertedRange,
    #[error("colour must be a #rrggbb hex value")]
    InvalidColor,
    #[error("power must be a positive number")]
    InvalidPower,
}

impl LaserRecord {
    pub fn new(
        name: &str,
        start_nm: f64,
        end_nm: f64,
        color: &str,
    ) -> Result<Self, LaserRuleError> {
        let record = Self {
            name: name.trim().to_string(),
            start_nm,
            end_nm,
            color: color.trim().to_string(),
            power_mw: None,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn with_power(mut self, power_mw: f64) -> Result<Self, LaserRuleError> {
        self.power_mw = Some(power_mw);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), LaserRuleError> {
        if self.name.trim().is_empty() {
            return Err(LaserRuleError::EmptyName);
        }
        if !(self.start_nm.is_finite() && self.end_nm.is_finite())
            || self.start_nm <= 0.0
            || self.end_nm <= 0.0
        {
            return Err(LaserRuleError::NonPositiveWavelength);
        }
        if self.start_nm > self.end_nm {
            return Err(LaserRuleError::InvertedRange);
        }
        if parse_hex_color(&self.color).is_none() {
            return Err(LaserRuleError::InvalidColor);
        }
        if let Some(power) = self.power_mw {
            if !power.is_finite() || power <= 0.0 {
                return Err(LaserRuleError::InvalidPower);
            }
        }
        Ok(())
    }

    pub fn is_single_line(&self) -> bool {
        self.start_nm == self.end_nm
    }

    /// The part of the laser range that falls inside `lo..=hi`, if any.
    pub fn clipped_to(&self, lo: f64, hi: f64) -> Option<(f64, f64)> {
        let start = self.start_nm.max(lo);
        let end = self.end_nm.min(hi);
        (start <= end).then_some((start, end))
    }

    pub fn rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.color).unwrap_or([128, 128, 128])
    }
}

/// Parses `#rrggbb` into its components.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// The laser list used when no laser table exists yet.
pub fn default_lasers() -> Vec<LaserRecord> {
    [
        ("Ti:Sapphire", 800.0, 1000.0, "#ff4b4b"),
        ("Yb fiber", 1050.0, 1070.0, "#4b4bff"),
        ("2C2P", 1150.0, 1200.0, "#37c463"),
        ("Diamond", 1250.0, 1300.0, "#ff9d42"),
        ("Er fiber", 1550.0, 1600.0, "#42fff9"),
        ("OPO/OPA", 1100.0, 2200.0, "#f942ff"),
    ]
    .into_iter()
    .map(|(name, start_nm, end_nm, color)| LaserRecord {
        name: name.to_string(),
        start_nm,
        end_nm,
        color: color.to_string(),
        power_mw: None,
    })
    .collect()
}

pub fn read_lasers<R: Read>(
    reader: R,
    source: &str,
) -> Result<LoadReport<LaserRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    ensure_columns(&headers, &REQUIRED_LASER_COLUMNS, source)?;

    let mut report = LoadReport::new();
    for (line, row) in numbered_rows::<LaserRecord, _>(&mut csv_reader, &headers) {
        match row {
            Ok(mut record) => {
                if record.color.trim().is_empty() {
                    record.color = fallback_color();
                } else if parse_hex_color(&record.color).is_none() {
                    report.warn(
                        line,
                        format!(
                            "'{}': invalid colour '{}', using {FALLBACK_LASER_COLOR}",
                            record.name, record.color
                        ),
                    );
                    record.color = fallback_color();
                }
                match record.validate() {
                    Ok(()) => report.records.push(record),
                    Err(err) => report.warn(line, format!("'{}': {err}", record.name)),
                }
            }
            Err(err) => report.warn(line, format!("malformed row: {err}")),
        }
    }
    log::info!(
        "loaded {} lasers from {source} ({} warnings)",
        report.records.len(),
        report.warnings.len()
    );
    Ok(report)
}

pub fn load_lasers(path: &Path) -> Result<LoadReport<LaserRecord>, DatasetError> {
    let file = open_existing(path)?;
    read_lasers(file, &source_name(path))
}

pub fn write_lasers<W: Write>(writer: W, records: &[LaserRecord]) -> Result<(), DatasetError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(LASER_COLUMNS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn save_lasers(path: &Path, records: &[LaserRecord]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let file = std::fs::File::create(path)?;
    write_lasers(file, records)?;
    log::info!("saved {} lasers to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("#ff4b4b"), Some([255, 75, 75]));
        assert_eq!(parse_hex_color("ff4b4b"), None);
        assert_eq!(parse_hex_color("#ff4b"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn laser_rules() {
        assert_eq!(
            LaserRecord::new("", 800.0, 900.0, "#000000").unwrap_err(),
            LaserRuleError::EmptyName
        );
        assert_eq!(
            LaserRecord::new("x", 900.0, 800.0, "#000000").unwrap_err(),
            LaserRuleError::InvertedRange
        );
        assert_eq!(
            LaserRecord::new("x", 0.0, 800.0, "#000000").unwrap_err(),
            LaserRuleError::NonPositiveWavelength
        );
        let single = LaserRecord::new("Yb", 1040.0, 1040.0, "#4b4bff").unwrap();
        assert!(single.is_single_line());
        assert_eq!(
            single.clone().with_power(-1.0).unwrap_err(),
            LaserRuleError::InvalidPower
        );
        assert_eq!(single.with_power(2000.0).unwrap().power_mw, Some(2000.0));
    }

    #[test]
    fn clipping_to_analysis_range() {
        let opo = LaserRecord::new("OPO", 1100.0, 2200.0, "#f942ff").unwrap();
        assert_eq!(opo.clipped_to(700.0, 1700.0), Some((1100.0, 1700.0)));
        assert_eq!(opo.clipped_to(700.0, 1000.0), None);
    }

    #[test]
    fn defaults_are_valid() {
        let lasers = default_lasers();
        assert_eq!(lasers.len(), 6);
        assert!(lasers.iter().all(|l| l.validate().is_ok()));
        assert_eq!(lasers[0].name, "Ti:Sapphire");
    }
}
