use std::collections::HashSet;
use tissuescope_core::{navigation_for, visible_parameters, Mode, PageId, ParameterKey};

fn page_set(mode: Mode) -> HashSet<PageId> {
    navigation_for(mode).pages().into_iter().collect()
}

#[test]
fn quick_setup_has_setup_and_results() {
    let nav = navigation_for(Mode::QuickSetup);
    let titles: Vec<_> = nav.sections().iter().map(|s| s.title).collect();
    assert_eq!(titles, vec!["Setup", "Results"]);
    assert_eq!(
        nav.pages(),
        vec![
            PageId::WavelengthSettings,
            PageId::TissueParameters,
            PageId::CrossSections
        ]
    );
    assert_eq!(nav.default_page(), PageId::CrossSections);
}

#[test]
fn standard_and_advanced_page_sets() {
    let standard: HashSet<_> = [
        PageId::LaserConfiguration,
        PageId::WavelengthSettings,
        PageId::TissueParameters,
        PageId::CrossSections,
        PageId::TissueAnalysis,
        PageId::FluorophoreLibrary,
    ]
    .into_iter()
    .collect();
    assert_eq!(page_set(Mode::Standard), standard);

    let mut advanced = standard.clone();
    advanced.insert(PageId::TissueModel);
    advanced.insert(PageId::Diagnostics);
    assert_eq!(page_set(Mode::Advanced), advanced);
}

#[test]
fn every_mode_has_exactly_one_reachable_default() {
    for mode in Mode::ALL {
        let nav = navigation_for(mode);
        assert!(nav.contains(nav.default_page()));
        let pages = nav.pages();
        let unique: HashSet<_> = pages.iter().collect();
        assert_eq!(unique.len(), pages.len(), "{mode} lists a page twice");
        assert_eq!(nav.mode(), mode);
    }
}

#[test]
fn unknown_mode_falls_back_to_standard() {
    let mode = Mode::parse_or_default("wizard");
    assert_eq!(mode, Mode::Standard);
    assert_eq!(navigation_for(mode), navigation_for(Mode::Standard));
}

#[test]
fn visible_parameters_grow_with_mode() {
    let page = PageId::TissueAnalysis;
    let quick = visible_parameters(Mode::QuickSetup, page);
    let standard = visible_parameters(Mode::Standard, page);
    let advanced = visible_parameters(Mode::Advanced, page);

    assert_eq!(
        quick,
        vec![
            ParameterKey::WavelengthRange,
            ParameterKey::NormalizationWavelength,
            ParameterKey::Depth
        ]
    );
    assert!(quick.iter().all(|k| standard.contains(k)));
    assert!(standard.contains(&ParameterKey::WaterContent));
    assert!(!standard.contains(&ParameterKey::Anisotropy));
    assert_eq!(advanced.len(), ParameterKey::ALL.len());
}

#[test]
fn visible_parameters_are_a_function_of_mode_and_page() {
    for mode in Mode::ALL {
        for page in navigation_for(mode).pages() {
            assert_eq!(visible_parameters(mode, page), visible_parameters(mode, page));
        }
    }
}
