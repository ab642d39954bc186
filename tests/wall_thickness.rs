//! Barlow / ASME B31.3 두께 계산 검증.
use approx::assert_relative_eq;
use pipeline_design_toolbox::thickness::{
    asme_b31_3, barlow, minimum_required_thickness, pipe_thickness, pipe_thickness_from,
    ThicknessAllowances, ThicknessError, ThicknessInput, DEFAULT_WELD_EFFICIENCY,
    DEFAULT_Y_COEFFICIENT,
};

#[test]
fn barlow_reference_value() {
    let t = barlow(1000.0, 10.0, 15_000.0, 1.0).expect("barlow");
    assert_relative_eq!(t, 0.333_333_333, max_relative = 1e-8);
}

#[test]
fn asme_reference_value() {
    // 1000·10 / (2·(15000·1 + 1000·0.4))
    let t = asme_b31_3(1000.0, 10.0, 15_000.0, 0.4, 1.0).expect("asme");
    assert_relative_eq!(t, 10_000.0 / 30_800.0, max_relative = 1e-12);
    assert!(t < barlow(1000.0, 10.0, 15_000.0, 1.0).unwrap());
}

#[test]
fn defaults_are_seamless_steel() {
    let input = ThicknessInput::new(1000.0, 10.0, 15_000.0);
    assert_eq!(input.weld_efficiency, DEFAULT_WELD_EFFICIENCY);
    assert_eq!(input.y_coefficient, DEFAULT_Y_COEFFICIENT);
    let res = pipe_thickness(&input).expect("thickness");
    let positional = pipe_thickness_from(1000.0, 10.0, 15_000.0, 0.4, 1.0).expect("thickness");
    assert_eq!(res, positional);
    assert!(res.asme_thin_wall_valid);
}

#[test]
fn y_zero_reduces_asme_to_barlow() {
    for (p, d, s, e) in [
        (1000.0, 10.0, 15_000.0, 1.0),
        (2.5e6, 0.273, 138e6, 0.85),
        (150.0, 4.5, 20_000.0, 0.95),
    ] {
        let res = pipe_thickness(
            &ThicknessInput::new(p, d, s)
                .with_weld_efficiency(e)
                .with_y_coefficient(0.0),
        )
        .expect("thickness");
        assert_relative_eq!(res.barlow_thickness, res.asme_b31_3_thickness, max_relative = 1e-12);
    }
}

#[test]
fn weld_efficiency_increases_thickness() {
    let seamless = barlow(1000.0, 10.0, 15_000.0, 1.0).unwrap();
    let welded = barlow(1000.0, 10.0, 15_000.0, 0.85).unwrap();
    assert_relative_eq!(welded, seamless / 0.85, max_relative = 1e-12);
}

#[test]
fn non_positive_stress_and_efficiency_rejected() {
    assert!(matches!(
        barlow(1000.0, 10.0, 0.0, 1.0),
        Err(ThicknessError::InvalidInput {
            field: "allowable_stress",
            ..
        })
    ));
    assert!(matches!(
        barlow(1000.0, 10.0, 15_000.0, 0.0),
        Err(ThicknessError::InvalidInput {
            field: "weld_efficiency",
            ..
        })
    ));
    assert!(matches!(
        asme_b31_3(1000.0, 10.0, -1.0, 0.4, 1.0),
        Err(ThicknessError::InvalidInput {
            field: "allowable_stress",
            ..
        })
    ));
    assert!(matches!(
        pipe_thickness(&ThicknessInput::new(1000.0, 0.0, 15_000.0)),
        Err(ThicknessError::InvalidInput {
            field: "outside_diameter",
            ..
        })
    ));
}

#[test]
fn asme_zero_denominator_is_degenerate() {
    // S·E + P·Y = 15000 - 30000·0.5 = 0
    let err = asme_b31_3(-30_000.0, 10.0, 15_000.0, 0.5, 1.0).unwrap_err();
    assert_eq!(
        err,
        ThicknessError::DegenerateFormula {
            formula: "asme_b31_3"
        }
    );
}

#[test]
fn thick_wall_flagged() {
    // t ≥ D/6 이 되도록 매우 높은 압력
    let res = pipe_thickness(&ThicknessInput::new(20_000.0, 10.0, 15_000.0)).expect("thickness");
    assert!(!res.asme_thin_wall_valid);
}

#[test]
fn allowances_added_to_pressure_thickness() {
    let req = minimum_required_thickness(
        0.3,
        &ThicknessAllowances {
            corrosion_allowance: 0.0625,
            mill_tolerance_fraction: 0.125,
        },
    )
    .expect("required");
    assert_relative_eq!(req.minimum_required, 0.3625, max_relative = 1e-12);
    assert_relative_eq!(req.nominal_with_mill_tolerance, 0.3625 / 0.875, max_relative = 1e-12);

    let none = minimum_required_thickness(0.3, &ThicknessAllowances::default()).unwrap();
    assert_eq!(none.minimum_required, 0.3);
    assert_eq!(none.nominal_with_mill_tolerance, 0.3);
}

#[test]
fn invalid_allowances_rejected() {
    assert!(minimum_required_thickness(
        0.3,
        &ThicknessAllowances {
            corrosion_allowance: -0.1,
            mill_tolerance_fraction: 0.0,
        }
    )
    .is_err());
    assert!(minimum_required_thickness(
        0.3,
        &ThicknessAllowances {
            corrosion_allowance: 0.0,
            mill_tolerance_fraction: 1.0,
        }
    )
    .is_err());
}
