use crate::commands::*;
use crate::output::*;
use dataset::{load_fluorophores, load_lasers};
use serde_json::json;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tissuescope_core::{navigation_for, Mode, SessionConfig, SessionContext};
use tissuescope_gui::{run_gui, GuiConfig};

pub fn handle_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mode = Mode::parse_or_default(&cli.mode);
    let config = SessionConfig::new(cli.data_dir, mode);
    match cli.command {
        None => run_gui(GuiConfig::default(), config)?,
        Some(Commands::Pages) => print_navigation(&navigation_for(mode)),
        Some(Commands::Analyze { json, params }) => handle_analyze(config, json, params)?,
        Some(Commands::Validate { path, kind }) => handle_validate(&path, kind)?,
    }
    Ok(())
}

fn handle_analyze(
    config: SessionConfig,
    as_json: bool,
    overrides: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = SessionContext::start(config);
    if let Some(patch) = overrides {
        session.params.apply_json_patch(&patch)?;
    }
    let values = *session.params.values();
    if !as_json {
        print_messages(session.messages());
    }
    let profile = session.tissue_profile()?;

    if as_json {
        let bands: Vec<[f64; 2]> = profile
            .high_absorption_bands(values.absorption_threshold)
            .into_iter()
            .map(|(start, end)| [start, end])
            .collect();
        let report = json!({
            "parameters": values,
            "max_transmission_wavelength": profile.max_transmission_wavelength,
            "high_absorption_bands": bands,
            "two_photon": profile.two_photon,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_analysis(profile, values.depth, values.absorption_threshold);
    }
    Ok(())
}

/// Laser tables are recognised by their `Start_nm` column.
fn detect_kind(path: &Path) -> Result<TableKind, std::io::Error> {
    let file = std::fs::File::open(path)?;
    let mut header = String::new();
    BufReader::new(file).read_line(&mut header)?;
    if header.split(',').any(|column| column.trim() == "Start_nm") {
        Ok(TableKind::Lasers)
    } else {
        Ok(TableKind::Fluorophores)
    }
}

fn handle_validate(path: &Path, kind: Option<TableKind>) -> Result<(), Box<dyn std::error::Error>> {
    let kind = match kind {
        Some(kind) => kind,
        None => detect_kind(path)?,
    };
    match kind {
        TableKind::Fluorophores => {
            let report = load_fluorophores(path)?;
            print_load_summary("fluorophores", report.records.len(), &report.warnings);
        }
        TableKind::Lasers => {
            let report = load_lasers(path)?;
            print_load_summary("lasers", report.records.len(), &report.warnings);
        }
    }
    Ok(())
}
