use dataset::{
    load_cross_section_library, load_fluorophores, load_lasers, read_fluorophores, read_lasers,
    save_fluorophores, save_lasers, DatasetError, FluorophoreRecord, LaserRecord,
    WaterAbsorption,
};
use std::fs;

const FLUOROPHORES: &str = "\
Name,Wavelength,Cross_Section,Reference,Em_Max,Ex_Max,QY,EC,pKa,Brightness
EGFP,920,39.0,Zipfel Lab,507,488,0.60,55900,6.0,33.5
mCherry,1080,27,FPbase,610,587,0.22,72000,4.5,15.8
Fluorescein,780,37,Zipfel Lab,,,,,,
";

#[test]
fn well_formed_table_yields_one_record_per_row() {
    let report = read_fluorophores(FLUOROPHORES.as_bytes(), "fluorophores.csv").unwrap();
    assert_eq!(report.records.len(), 3);
    assert!(report.warnings.is_empty());

    let egfp = &report.records[0];
    assert_eq!(egfp.name, "EGFP");
    assert_eq!(egfp.wavelength, 920.0);
    assert_eq!(egfp.cross_section, 39.0);
    assert_eq!(egfp.quantum_yield, Some(0.60));

    let fluorescein = &report.records[2];
    assert_eq!(fluorescein.em_max, None);
    assert_eq!(fluorescein.brightness, None);
}

#[test]
fn malformed_rows_are_skipped_with_warnings() {
    let data = "\
Name,Wavelength,Cross_Section,Reference
EGFP,920,39.0,Zipfel Lab
Broken,not-a-number,12,FPbase
,900,10,nameless
Short,950
tdTomato,1050,216,Drobizhev
";
    let report = read_fluorophores(data.as_bytes(), "fluorophores.csv").unwrap();
    let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["EGFP", "tdTomato"]);
    assert_eq!(report.warnings.len(), 3);
    let lines: Vec<u64> = report.warnings.iter().map(|w| w.line).collect();
    assert_eq!(lines, vec![3, 4, 5]);
}

#[test]
fn optional_columns_may_be_absent_or_garbage() {
    let data = "Name,Wavelength,Cross_Section,QY\nEGFP,920,39,n/a\n";
    let report = read_fluorophores(data.as_bytes(), "x.csv").unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].quantum_yield, None);
    assert_eq!(report.records[0].reference, "");
}

#[test]
fn missing_required_column_fails_the_table() {
    let data = "Name,Cross_Section\nEGFP,39\n";
    let err = read_fluorophores(data.as_bytes(), "x.csv").unwrap_err();
    match err {
        DatasetError::MissingColumn { column, .. } => assert_eq!(column, "Wavelength"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_reported_as_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_fluorophores(&dir.path().join("fluorophores.csv")).unwrap_err();
    assert!(matches!(err, DatasetError::NotFound(_)));
}

#[test]
fn save_and_load_fluorophores() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("fluorophores.csv");
    let mut egfp = FluorophoreRecord::new("EGFP", 920.0, 39.0, "Zipfel Lab");
    egfp.em_max = Some(507.0);
    let records = vec![egfp, FluorophoreRecord::new("mCherry", 1080.0, 27.0, "FPbase")];

    save_fluorophores(&path, &records).unwrap();
    let loaded = load_fluorophores(&path).unwrap();
    assert_eq!(loaded.records, records);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Name,Wavelength,Cross_Section,Reference"));
}

#[test]
fn empty_table_still_writes_header() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fluorophores.csv");
    save_fluorophores(&path, &[]).unwrap();
    let loaded = load_fluorophores(&path).unwrap();
    assert!(loaded.records.is_empty());
}

#[test]
fn warning_lines_count_blank_lines_and_multiline_fields() {
    let data = "Name,Wavelength,Cross_Section,Reference\n\nEGFP,920,39,Zipfel\n,1000,5,X\n\"Two\nline\",950,12,FPbase\nBroken,abc,1,X\n";
    let report = read_fluorophores(data.as_bytes(), "fluorophores.csv").unwrap();
    let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["EGFP", "Two\nline"]);
    let lines: Vec<u64> = report.warnings.iter().map(|w| w.line).collect();
    assert_eq!(lines, vec![4, 7]);
}

#[test]
fn laser_warning_lines_skip_blank_lines() {
    let data = "Name,Start_nm,End_nm,Color\nTi:Sapphire,800,1000,#ff4b4b\n\n\nBackwards,1000,800,#000000\n";
    let report = read_lasers(data.as_bytes(), "lasers.csv").unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].line, 5);
}

#[test]
fn lasers_keep_insertion_order_and_fix_bad_colours() {
    let data = "\
Name,Start_nm,End_nm,Color
Ti:Sapphire,800,1000,#ff4b4b
Backwards,1000,800,#000000
Yb fiber,1040,1040,red
";
    let report = read_lasers(data.as_bytes(), "lasers.csv").unwrap();
    let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ti:Sapphire", "Yb fiber"]);
    assert_eq!(report.records[1].color, "#808080");
    assert_eq!(report.warnings.len(), 2);
}

#[test]
fn save_and_load_lasers_with_power() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lasers.csv");
    let lasers = vec![
        LaserRecord::new("Ti:Sapphire", 800.0, 1000.0, "#ff4b4b").unwrap(),
        LaserRecord::new("Yb fiber", 1040.0, 1040.0, "#4b4bff")
            .unwrap()
            .with_power(4000.0)
            .unwrap(),
    ];
    save_lasers(&path, &lasers).unwrap();
    let loaded = load_lasers(&path).unwrap();
    assert_eq!(loaded.records, lasers);
}

#[test]
fn cross_section_library_scans_csv_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("mCherry.csv"),
        "wavelength,cross_section\n1000,10\n1080,27\n1100,20\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("EGFP.csv"),
        "wavelength,cross_section\n900,30\n920,39\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    fs::write(dir.path().join("broken.csv"), "lambda,value\n1,2\n").unwrap();

    let report = load_cross_section_library(dir.path()).unwrap();
    let names: Vec<_> = report.records.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["EGFP", "mCherry"]);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].message.contains("broken.csv"));

    let stats = report.records[1].stats();
    assert_eq!(stats[0].peak_wavelength, 1080.0);
}

#[test]
fn water_table_falls_back_when_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (table, warning) = WaterAbsorption::load_or_fallback(&dir.path().join("kou93b.dat"));
    assert!(table.fallback);
    assert!(warning.unwrap().contains("water absorption"));
}

#[test]
fn water_table_loads_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("kou93b.dat");
    let mut text = String::from("h1\nh2\nh3\nh4\nh5\nh6\n");
    text.push_str("2400 8.0\n1900 12.0\n1450 3.0\n800 0.02\n");
    fs::write(&path, text).unwrap();

    let (table, warning) = WaterAbsorption::load_or_fallback(&path);
    assert!(warning.is_none());
    assert!(!table.fallback);
    assert_eq!(table.wavelengths, vec![800.0, 1450.0, 1900.0, 2400.0]);
}
