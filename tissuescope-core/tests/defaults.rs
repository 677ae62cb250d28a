use tissuescope_core::{
    DefaultsManager, Mode, ParameterKey, ParameterValue, SessionConfig, SessionContext,
    SessionParameters,
};

#[test]
fn defaults_files_created_and_used() {
    let dir = tempfile::tempdir().expect("tempdir");
    let manager = DefaultsManager::new(dir.path());
    assert!(dir.path().join("session_defaults.json").exists());
    assert!(dir.path().join("session_defaults.factory.json").exists());
    assert_eq!(*manager.defaults(), SessionParameters::default());
}

#[test]
fn saved_defaults_seed_the_next_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = SessionContext::start(SessionConfig::new(dir.path(), Mode::Standard));
    session
        .params
        .set(ParameterKey::NormalizationWavelength, ParameterValue::Float(1100.0))
        .unwrap();
    session.save_parameters_as_defaults().expect("save defaults");

    let next = SessionContext::start(SessionConfig::new(dir.path(), Mode::QuickSetup));
    assert_eq!(next.params.normalization_wavelength(), 1100.0);
}

#[test]
fn factory_reset_restores_builtin_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut manager = DefaultsManager::new(dir.path());
    let mut changed = SessionParameters::default();
    changed.depth = 3.0;
    manager.update_defaults(changed).expect("update defaults");
    manager.reset_defaults_to_factory().expect("factory reset");

    let reloaded = DefaultsManager::new(dir.path());
    assert_eq!(reloaded.defaults().depth, 1.0);
}

#[test]
fn invalid_defaults_file_is_replaced() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("session_defaults.json"), r#"{"depth": -4}"#).unwrap();
    let manager = DefaultsManager::new(dir.path());
    assert_eq!(manager.defaults().depth, 1.0);

    let mut manager = manager;
    let mut bad = SessionParameters::default();
    bad.water_content = 2.0;
    assert!(manager.update_defaults(bad).is_err());
}

#[test]
fn session_factory_reset_resets_parameters() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = SessionContext::start(SessionConfig::new(dir.path(), Mode::Standard));
    session
        .params
        .set(ParameterKey::Depth, ParameterValue::Float(5.0))
        .unwrap();
    session.save_parameters_as_defaults().unwrap();
    session.restore_factory_defaults().unwrap();
    assert_eq!(session.params.depth(), 1.0);
    assert_eq!(session.defaults().defaults().depth, 1.0);
}
