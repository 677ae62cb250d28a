use crate::{ensure_columns, numbered_rows, open_existing, source_name, DatasetError, LoadReport};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

pub const FLUOROPHORE_COLUMNS: [&str; 10] = [
    "Name",
    "Wavelength",
    "Cross_Section",
    "Reference",
    "Em_Max",
    "Ex_Max",
    "QY",
    "EC",
    "pKa",
    "Brightness",
];

pub const REQUIRED_FLUOROPHORE_COLUMNS: [&str; 3] = ["Name", "Wavelength", "Cross_Section"];

/// One row of the fluorophore table.
///
/// `wavelength` is the two-photon excitation wavelength in nm and
/// `cross_section` the two-photon cross-section in GM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluorophoreRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Wavelength")]
    pub wavelength: f64,
    #[serde(rename = "Cross_Section")]
    pub cross_section: f64,
    #[serde(rename = "Reference", default)]
    pub reference: String,
    #[serde(rename = "Em_Max", default, deserialize_with = "csv::invalid_option")]
    pub em_max: Option<f64>,
    #[serde(rename = "Ex_Max", default, deserialize_with = "csv::invalid_option")]
    pub ex_max: Option<f64>,
    #[serde(rename = "QY", default, deserialize_with = "csv::invalid_option")]
    pub quantum_yield: Option<f64>,
    #[serde(rename = "EC", default, deserialize_with = "csv::invalid_option")]
    pub extinction_coefficient: Option<f64>,
    #[serde(rename = "pKa", default, deserialize_with = "csv::invalid_option")]
    pub pka: Option<f64>,
    #[serde(rename = "Brightness", default, deserialize_with = "csv::invalid_option")]
    pub brightness: Option<f64>,
}

impl FluorophoreRecord {
    pub fn new(name: &str, wavelength: f64, cross_section: f64, reference: &str) -> Self {
        Self {
            name: name.to_string(),
            wavelength,
            cross_section,
            reference: reference.to_string(),
            em_max: None,
            ex_max: None,
            quantum_yield: None,
            extinction_coefficient: None,
            pka: None,
            brightness: None,
        }
    }

    pub fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("fluorophore name is empty".to_string());
        }
        if !self.wavelength.is_finite() || self.wavelength <= 0.0 {
            return Err(format!(
                "'{}': wavelength must be a positive number",
                self.name
            ));
        }
        if !self.cross_section.is_finite() || self.cross_section < 0.0 {
            return Err(format!(
                "'{}': cross section must be a non-negative number",
                self.name
            ));
        }
        Ok(())
    }
}

/// Parses a fluorophore table. Malformed rows are skipped and reported;
/// a missing required column fails the whole table.
pub fn read_fluorophores<R: Read>(
    reader: R,
    source: &str,
) -> Result<LoadReport<FluorophoreRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    ensure_columns(&headers, &REQUIRED_FLUOROPHORE_COLUMNS, source)?;

    let mut report = LoadReport::new();
    for (line, row) in numbered_rows::<FluorophoreRecord, _>(&mut csv_reader, &headers) {
        match row {
            Ok(mut record) => {
                record.name = record.name.trim().to_string();
                match record.check() {
                    Ok(()) => report.records.push(record),
                    Err(message) => report.warn(line, message),
                }
            }
            Err(err) => report.warn(line, format!("malformed row: {err}")),
        }
    }
    log::info!(
        "loaded {} fluorophores from {source} ({} skipped)",
        report.records.len(),
        report.skipped()
    );
    Ok(report)
}

pub fn load_fluorophores(path: &Path) -> Result<LoadReport<FluorophoreRecord>, DatasetError> {
    let file = open_existing(path)?;
    read_fluorophores(file, &source_name(path))
}

pub fn write_fluorophores<W: Write>(
    writer: W,
    records: &[FluorophoreRecord],
) -> Result<(), DatasetError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(FLUOROPHORE_COLUMNS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn save_fluorophores(path: &Path, records: &[FluorophoreRecord]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let file = std::fs::File::create(path)?;
    write_fluorophores(file, records)?;
    log::info!("saved {} fluorophores to {}", records.len(), path.display());
    Ok(())
}
