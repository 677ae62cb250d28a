use dataset::WaterAbsorption;
use tissue::{
    high_absorption_bands, nearest_index, sweep_coefficient, two_photon_wavelength,
    wavelength_grid, SweepParameter, TissueError, TissueParams, TissueProfile,
};

fn water() -> WaterAbsorption {
    WaterAbsorption::from_points(vec![
        (700.0, 0.01),
        (1300.0, 1.0),
        (1450.0, 30.0),
        (1700.0, 5.0),
        (1950.0, 120.0),
        (2400.0, 60.0),
    ])
}

#[test]
fn transmission_is_normalized_at_reference_wavelength() {
    let grid = wavelength_grid(700.0, 1700.0);
    let params = TissueParams::default();
    let profile = TissueProfile::compute(&grid, &params, &water(), None).unwrap();
    let at_norm = profile.transmission_at(1300.0).unwrap();
    assert!((at_norm - 1.0).abs() < 1e-12);
    assert_eq!(profile.wavelengths.len(), 1000);
    assert_eq!(profile.depth_profile.depths.len(), 21);
    assert_eq!(profile.depth_profile.transmission.len(), 21);
    assert!(profile.two_photon.is_none());
}

#[test]
fn strongly_scattering_deep_tissue_stays_normalized() {
    let grid = wavelength_grid(700.0, 1700.0);
    let params = TissueParams {
        depth: 10.0,
        water_content: 0.75,
        anisotropy: 0.99,
        scattering_scale: 2.0,
        scattering_power: 0.5,
        normalization_wavelength: 1300.0,
    };
    let profile = TissueProfile::compute(&grid, &params, &water(), None).unwrap();
    assert_eq!(profile.transmission_at(1300.0), Some(1.0));
    assert!(profile.transmission.iter().all(|t| t.is_finite() && *t >= 0.0));
    for row in &profile.depth_profile.transmission {
        assert_eq!(row[nearest_index(&grid, 1300.0).unwrap()], 1.0);
    }
}

#[test]
fn zero_depth_row_is_flat() {
    let grid = wavelength_grid(800.0, 2000.0);
    let profile =
        TissueProfile::compute(&grid, &TissueParams::default(), &water(), None).unwrap();
    assert!(profile.depth_profile.transmission[0]
        .iter()
        .all(|t| (t - 1.0).abs() < 1e-12));
    assert!(profile.depth_profile.water_absorption[0]
        .iter()
        .all(|t| t.abs() < 1e-12));
    let last = profile.depth_profile.depths.last().copied().unwrap();
    assert!((last - 2.0).abs() < 1e-9);
}

#[test]
fn without_absorption_longest_wavelength_transmits_best() {
    let grid = wavelength_grid(700.0, 1700.0);
    let profile = TissueProfile::compute(
        &grid,
        &TissueParams::default(),
        &WaterAbsorption::fallback(),
        None,
    )
    .unwrap();
    assert_eq!(profile.max_transmission_wavelength, 1700.0);
    assert!(profile.water_absorption.iter().all(|w| *w == 0.0));
}

#[test]
fn scattering_follows_power_law() {
    let params = TissueParams::default();
    let expected = 1.1 / (1.0 - 0.9);
    assert!((params.scattering(500.0) - expected).abs() < 1e-9);
    assert!(params.scattering(1000.0) < params.scattering(800.0));
    let mut dry = params;
    dry.water_content = 0.0;
    assert_eq!(dry.absorption(1450.0, &water()), 0.0);
    assert!((params.absorption(1450.0, &water()) - 30.0 * 0.75 / 10.0).abs() < 1e-12);
}

#[test]
fn two_photon_wavelength_rounds_to_five_nm() {
    assert_eq!(two_photon_wavelength(800.0, 1040.0), 905.0);
    assert_eq!(two_photon_wavelength(1000.0, 1000.0), 1000.0);
}

#[test]
fn two_photon_comparison_reports_three_points() {
    let grid = wavelength_grid(700.0, 1700.0);
    let profile =
        TissueProfile::compute(&grid, &TissueParams::default(), &water(), Some((800.0, 1040.0)))
            .unwrap();
    let comparison = profile.two_photon.unwrap();
    assert_eq!(comparison.lambda_c, 905.0);
    assert!(comparison.transmission.iter().all(|t| t.is_finite()));
    assert!(comparison.transmission[0] < comparison.transmission[1]);
}

#[test]
fn invalid_parameters_are_rejected() {
    let grid = wavelength_grid(700.0, 1700.0);
    let mut params = TissueParams::default();
    params.anisotropy = 1.0;
    assert!(matches!(
        TissueProfile::compute(&grid, &params, &water(), None),
        Err(TissueError::InvalidParameter(_))
    ));
    assert_eq!(
        TissueProfile::compute(&[], &TissueParams::default(), &water(), None).unwrap_err(),
        TissueError::EmptyGrid
    );
}

#[test]
fn absorption_bands_are_contiguous_spans() {
    let wavelengths = [1000.0, 1100.0, 1200.0, 1300.0, 1400.0, 1500.0];
    let fractions = [0.1, 0.6, 0.7, 0.2, 0.9, 0.95];
    let bands = high_absorption_bands(&wavelengths, &fractions, 50.0);
    assert_eq!(bands, vec![(1100.0, 1200.0), (1400.0, 1500.0)]);
    assert!(high_absorption_bands(&wavelengths, &fractions, 99.0).is_empty());
}

#[test]
fn nearest_index_prefers_first_on_ties() {
    let grid = [100.0, 200.0, 300.0];
    assert_eq!(nearest_index(&grid, 150.0), Some(0));
    assert_eq!(nearest_index(&grid, 260.0), Some(2));
    assert_eq!(nearest_index(&[], 1.0), None);
}

#[test]
fn sweeps_vary_only_the_selected_parameter() {
    let params = TissueParams::default();
    let sweep = sweep_coefficient(SweepParameter::Anisotropy, &params, &water(), 1300.0, 100);
    assert_eq!(sweep.len(), 100);
    assert!((sweep[0].0 - 0.1).abs() < 1e-12);
    assert!(sweep.windows(2).all(|pair| pair[1].1 > pair[0].1));

    let water_sweep =
        sweep_coefficient(SweepParameter::WaterContent, &params, &water(), 1300.0, 11);
    assert_eq!(water_sweep[0].1, 0.0);
    assert!((water_sweep[10].1 - 0.1).abs() < 1e-12);
}

#[test]
fn sweep_endpoints_match_parameter_ranges() {
    let params = TissueParams::default();
    for parameter in [
        SweepParameter::Anisotropy,
        SweepParameter::ScatteringPower,
        SweepParameter::ScatteringScale,
        SweepParameter::WaterContent,
    ] {
        let (lo, hi) = parameter.range();
        let sweep = sweep_coefficient(parameter, &params, &water(), 1300.0, 50);
        assert!((sweep[0].0 - lo).abs() < 1e-12, "{parameter:?}");
        assert!((sweep[49].0 - hi).abs() < 1e-12, "{parameter:?}");
    }

    // Scattering parameters leave absorption alone and vice versa.
    let scale = sweep_coefficient(SweepParameter::ScatteringScale, &params, &water(), 1300.0, 3);
    for (value, coefficient) in &scale {
        let mut varied = params;
        varied.scattering_scale = *value;
        assert!((coefficient - varied.scattering(1300.0)).abs() < 1e-12);
    }
    let wet = sweep_coefficient(SweepParameter::WaterContent, &params, &water(), 1450.0, 3);
    assert!((wet[2].1 - 30.0 / 10.0).abs() < 1e-12);
    assert!((wet[1].1 - params.absorption(1450.0, &water()) * 0.5 / 0.75).abs() < 1e-12);
}
