use std::fs;
use std::path::Path;
use tissuescope_core::{
    MarkerShape, MarkerStyle, MessageLevel, Mode, PageId, ParameterError, ParameterKey,
    ParameterValue, SessionConfig, SessionContext,
};

const FLUOROPHORES: &str = "\
Name,Wavelength,Cross_Section,Reference
EGFP,920,39.0,Zipfel Lab
mCherry,1080,27,FPbase
Broken,abc,1,FPbase
tdTomato,1050,216,Drobizhev
";

fn seed_data(dir: &Path) {
    fs::write(dir.join("fluorophores.csv"), FLUOROPHORES).unwrap();
    fs::create_dir_all(dir.join("cross_sections")).unwrap();
    fs::write(
        dir.join("cross_sections").join("EGFP.csv"),
        "wavelength,cross_section\n880,20\n920,39\n960,25\n",
    )
    .unwrap();
}

fn start(dir: &Path, mode: Mode) -> SessionContext {
    SessionContext::start(SessionConfig::new(dir, mode))
}

#[test]
fn parameter_set_on_one_page_is_read_on_another() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = start(dir.path(), Mode::Standard);

    session.navigate(PageId::TissueParameters).unwrap();
    session
        .params
        .set(ParameterKey::Depth, ParameterValue::Float(2.5))
        .unwrap();

    session.navigate(PageId::TissueAnalysis).unwrap();
    assert_eq!(session.params.get(ParameterKey::Depth), ParameterValue::Float(2.5));
    assert_eq!(session.params.depth(), 2.5);
}

#[test]
fn invalid_values_leave_the_store_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = start(dir.path(), Mode::Standard);

    let err = session
        .params
        .set(ParameterKey::Depth, ParameterValue::Float(0.0))
        .unwrap_err();
    assert!(matches!(err, ParameterError::OutOfRange { .. }));
    assert_eq!(session.params.depth(), 1.0);

    let err = session
        .params
        .set(ParameterKey::WavelengthRange, ParameterValue::Range(1500.0, 900.0))
        .unwrap_err();
    assert!(matches!(err, ParameterError::InvalidRange { .. }));
    assert_eq!(session.params.wavelength_range(), (700.0, 1700.0));

    let err = session
        .params
        .set(ParameterKey::Depth, ParameterValue::Flag(true))
        .unwrap_err();
    assert!(matches!(err, ParameterError::WrongKind { .. }));

    assert!(matches!(
        session.params.set_by_name("thickness", ParameterValue::Float(1.0)),
        Err(ParameterError::Unknown(_))
    ));
    assert!(session
        .params
        .set(ParameterKey::WaterContent, ParameterValue::Float(f64::NAN))
        .is_err());
}

#[test]
fn json_patch_is_all_or_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = start(dir.path(), Mode::Advanced);

    session
        .params
        .apply_json_patch(r#"{"depth": 0.5, "wavelength_range": [800, 1600], "two_photon_enabled": true}"#)
        .unwrap();
    assert_eq!(session.params.depth(), 0.5);
    assert_eq!(session.params.wavelength_range(), (800.0, 1600.0));
    assert_eq!(session.params.two_photon_pair(), Some((800.0, 1040.0)));

    let err = session
        .params
        .apply_json_patch(r#"{"depth": 3.0, "water_content": 7}"#)
        .unwrap_err();
    assert!(matches!(err, ParameterError::OutOfRange { .. }));
    assert_eq!(session.params.depth(), 0.5);

    assert!(session.params.apply_json_patch("[1, 2]").is_err());
}

#[test]
fn export_and_reset() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = start(dir.path(), Mode::Standard);
    session
        .params
        .set_by_name("water_content", ParameterValue::Float(0.5))
        .unwrap();

    let exported: serde_json::Value =
        serde_json::from_str(&session.export_parameters().unwrap()).unwrap();
    assert_eq!(exported["water_content"], 0.5);
    assert_eq!(exported["wavelength_range"], serde_json::json!([700.0, 1700.0]));

    session.params.reset();
    assert_eq!(session.params.water_content(), 0.75);
}

#[test]
fn mode_switch_moves_off_missing_pages() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = start(dir.path(), Mode::Advanced);
    session.navigate(PageId::Diagnostics).unwrap();

    session.set_mode(Mode::Standard);
    assert_eq!(session.current_page(), PageId::CrossSections);

    session.navigate(PageId::WavelengthSettings).unwrap();
    session.set_mode(Mode::QuickSetup);
    assert_eq!(session.current_page(), PageId::WavelengthSettings);
    assert!(session.navigate(PageId::FluorophoreLibrary).is_err());
}

#[test]
fn datasets_load_with_row_warnings() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_data(dir.path());
    let session = start(dir.path(), Mode::Standard);

    assert!(session.fluorophores_loaded());
    assert_eq!(session.fluorophores.len(), 3);
    assert_eq!(session.library.len(), 1);
    assert_eq!(session.lasers.len(), 6);
    assert!(session.water.fallback);

    let warnings: Vec<_> = session
        .messages()
        .iter()
        .filter(|m| m.level == MessageLevel::Warning)
        .collect();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].text.contains("line 4"));
    assert!(warnings[1].text.contains("water absorption"));
}

#[test]
fn missing_fluorophore_file_is_reported_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = start(dir.path(), Mode::Standard);
    assert!(!session.fluorophores_loaded());
    assert!(session
        .messages()
        .iter()
        .any(|m| m.level == MessageLevel::Error && m.text.contains("not found")));
    let diagnostics = session.diagnostics();
    assert!(!diagnostics[0].ok);
    assert!(diagnostics[1].ok);
}

#[test]
fn laser_edits_persist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = start(dir.path(), Mode::Standard);

    assert!(session.add_laser("", 800.0, 900.0, "#ffffff", None).is_err());
    assert!(session.add_laser("Bad", 900.0, 800.0, "#ffffff", None).is_err());
    assert!(session.add_laser("Ti:Sapphire", 700.0, 900.0, "#ffffff", None).is_err());
    session
        .add_laser("Fiber 920", 920.0, 920.0, "#123456", Some(1500.0))
        .unwrap();
    session.remove_laser(0).unwrap();
    assert!(session.remove_laser(99).is_err());
    session.save_lasers().unwrap();

    let reloaded = start(dir.path(), Mode::Standard);
    let names: Vec<_> = reloaded.lasers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names.len(), 6);
    assert_eq!(names[0], "Yb fiber");
    assert_eq!(names[5], "Fiber 920");
    assert_eq!(reloaded.lasers[5].power_mw, Some(1500.0));
}

#[test]
fn cross_section_points_follow_visibility() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_data(dir.path());
    let mut session = start(dir.path(), Mode::Standard);

    assert_eq!(session.cross_section_points().len(), 3);
    session.visibility.set_visible("mCherry", false);
    let points = session.cross_section_points();
    assert_eq!(points.len(), 2);
    assert!(points.iter().all(|p| p.transmission.is_some()));

    session.visibility.set_all_visible(false);
    assert!(session.cross_section_points().is_empty());

    assert_eq!(session.markers.entries().len(), 3);
    assert_eq!(session.library_peaks()[0].peak_wavelength, 920.0);
}

#[test]
fn marker_reset_restores_the_cycle_in_table_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_data(dir.path());
    let mut session = start(dir.path(), Mode::Standard);

    let custom = MarkerStyle {
        shape: MarkerShape::Star,
        color: "#ff0000".to_string(),
    };
    session.markers.set("FPbase", custom.clone());
    assert_eq!(session.markers.get("FPbase"), Some(&custom));

    session.reset_marker_styles();
    let references: Vec<_> = session
        .markers
        .entries()
        .iter()
        .map(|(reference, _)| reference.as_str())
        .collect();
    assert_eq!(references, vec!["Zipfel Lab", "FPbase", "Drobizhev"]);
    assert_eq!(
        session.markers.get("FPbase").map(|s| s.shape),
        Some(MarkerShape::Square)
    );
}

#[test]
fn reset_clears_parameters_and_reloads() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_data(dir.path());
    let mut session = start(dir.path(), Mode::Standard);
    session
        .params
        .set(ParameterKey::Depth, ParameterValue::Float(4.0))
        .unwrap();
    session.visibility.set_all_visible(false);
    session.lasers.clear();

    session.reset();
    assert_eq!(session.params.depth(), 1.0);
    assert_eq!(session.lasers.len(), 6);
    assert_eq!(session.visibility.visible_count(), 3);
}

#[test]
fn tissue_profile_is_cached_per_parameter_set() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = start(dir.path(), Mode::Advanced);

    let first = session.tissue_profile().unwrap().max_transmission_wavelength;
    let again = session.tissue_profile().unwrap().max_transmission_wavelength;
    assert_eq!(first, again);
    assert_eq!(session.cache().stats(), (1, 1));

    session
        .params
        .set(ParameterKey::Depth, ParameterValue::Float(2.0))
        .unwrap();
    session.tissue_profile().unwrap();
    assert_eq!(session.cache().stats(), (1, 2));
}
