use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub mod fluorophore;
pub mod laser;
pub mod spectrum;
pub mod water;

pub use fluorophore::{
    load_fluorophores, read_fluorophores, save_fluorophores, write_fluorophores,
    FluorophoreRecord, FLUOROPHORE_COLUMNS, REQUIRED_FLUOROPHORE_COLUMNS,
};
pub use laser::{
    default_lasers, load_lasers, read_lasers, save_lasers, write_lasers, LaserRecord,
    LaserRuleError, LASER_COLUMNS,
};
pub use spectrum::{
    load_cross_section_library, load_spectrum, read_spectrum, CrossSectionSpectrum,
    SpectrumTrace, TraceStats,
};
pub use water::{linspace, WaterAbsorption};

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{source_name}: missing required column '{column}'")]
    MissingColumn { source_name: String, column: String },
    #[error("{0} contains no usable rows")]
    Empty(String),
}

/// A row that was skipped while loading a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowWarning {
    pub line: u64,
    pub message: String,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Records parsed from a table plus the rows that had to be skipped.
#[derive(Debug, Clone)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub warnings: Vec<RowWarning>,
}

impl<T> LoadReport<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn skipped(&self) -> usize {
        self.warnings.len()
    }

    pub fn warn(&mut self, line: u64, message: impl Into<String>) {
        let warning = RowWarning {
            line,
            message: message.into(),
        };
        log::warn!("skipping row: {warning}");
        self.warnings.push(warning);
    }
}

impl<T> Default for LoadReport<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn open_existing(path: &Path) -> Result<std::fs::File, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }
    Ok(std::fs::File::open(path)?)
}

pub(crate) fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("table")
        .to_string()
}

pub(crate) fn ensure_columns(
    headers: &csv::StringRecord,
    required: &[&str],
    source: &str,
) -> Result<(), DatasetError> {
    for column in required {
        if !headers.iter().any(|h| h.trim() == *column) {
            return Err(DatasetError::MissingColumn {
                source_name: source.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Data rows of a table, each paired with the line it starts on.
///
/// Line numbers come from the reader's position, so blank lines and quoted
/// fields spanning several lines are counted.
pub(crate) fn numbered_rows<'r, T, R>(
    csv_reader: &'r mut csv::Reader<R>,
    headers: &'r csv::StringRecord,
) -> impl Iterator<Item = (u64, Result<T, csv::Error>)> + 'r
where
    T: serde::de::DeserializeOwned + 'r,
    R: std::io::Read + 'r,
{
    let mut last_line = 1;
    csv_reader.records().map(move |row| {
        let numbered = match row {
            Ok(raw) => {
                let line = raw.position().map(|pos| pos.line()).unwrap_or(last_line + 1);
                (line, raw.deserialize::<T>(Some(headers)))
            }
            Err(err) => {
                let line = err.position().map(|pos| pos.line()).unwrap_or(last_line + 1);
                (line, Err(err))
            }
        };
        last_line = numbered.0;
        numbered
    })
}
