use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_tissuescope");
    Command::new(exe)
        .args(args)
        .args(["--log-level", "off"])
        .output()
        .expect("run tissuescope")
}

#[test]
fn pages_lists_advanced_navigation() {
    let output = run(&["pages", "--mode", "advanced"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[TissueScope][INFO] Advanced mode"));
    assert!(stdout.contains("Cross-sections (default)"));
    assert!(stdout.contains("Tissue Model"));
    assert!(stdout.contains("Diagnostics"));
}

#[test]
fn unknown_mode_falls_back_to_standard() {
    let output = run(&["pages", "--mode", "expert"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Standard mode"));
    assert!(!stdout.contains("Tissue Model"));
}

#[test]
fn validate_reports_skipped_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fluorophores.csv");
    std::fs::write(
        &path,
        "Name,Wavelength,Cross_Section,Reference\n\
         EGFP,920,39,Zipfel Lab\n\
         Broken,not-a-number,12,Zipfel Lab\n\
         mCherry,1080,27,FPbase\n",
    )
    .unwrap();

    let output = run(&["validate", path.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 fluorophores loaded, 1 rows skipped"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 3"));
}

#[test]
fn validate_detects_laser_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lasers.csv");
    std::fs::write(
        &path,
        "Name,Start_nm,End_nm,Color,Power_mW\nTi:Sapphire,680,1080,#ff0000,2000\n",
    )
    .unwrap();

    let output = run(&["validate", path.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 lasers loaded, 0 rows skipped"));
}

#[test]
fn validate_fails_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");
    let output = run(&["validate", path.to_str().unwrap(), "--kind", "fluorophores"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[TissueScope][ERROR]"));
}

#[test]
fn analyze_prints_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&[
        "analyze",
        "--json",
        "--params",
        r#"{"depth": 0.5, "two_photon_enabled": true, "lambda_a": 800, "lambda_b": 1040}"#,
        "--data-dir",
        dir.path().to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let peak = report["max_transmission_wavelength"].as_f64().unwrap();
    assert!((700.0..=1700.0).contains(&peak));
    assert_eq!(report["parameters"]["depth"].as_f64(), Some(0.5));
    assert_eq!(report["two_photon"]["lambda_c"].as_f64(), Some(905.0));
}

#[test]
fn analyze_rejects_out_of_range_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&[
        "analyze",
        "--params",
        r#"{"depth": 50}"#,
        "--data-dir",
        dir.path().to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("depth must be within"));
}
