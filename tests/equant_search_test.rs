use approx::assert_relative_eq;

use equant::equant_model::evaluate;
use equant::search::{
    best_inner_params, best_orbit_params, best_radius, best_speed, GridRange, Improvement,
    SearchParams, SearchStage,
};
use equant::{EquantError, OrbitGeometry};

mod common;

#[test]
fn test_reference_evaluation() {
    // Regression fixture: known reference run of the historical fit.
    let geometry = OrbitGeometry {
        center_angle: 149.0,
        radius: 8.6,
        equant_distance: 1.6,
        equant_angle: 93.2,
        initial_phase: 55.8,
    };
    let report = evaluate(&geometry, 0.524, &common::fixture_set());
    assert_relative_eq!(report.max_error, 1.0248374856784537, epsilon = 1e-8);
}

#[test]
fn test_inner_search_on_the_default_grid() {
    let set = common::fixture_set();
    let params = SearchParams::default();
    let fit = best_inner_params(9.0, 0.524, &set, &params, None).unwrap();

    assert_relative_eq!(fit.geometry.center_angle, 149.4, epsilon = 1e-9);
    assert_relative_eq!(fit.geometry.equant_distance, 1.6, epsilon = 1e-9);
    assert_relative_eq!(fit.geometry.equant_angle, 93.0, epsilon = 1e-9);
    assert_relative_eq!(fit.geometry.initial_phase, 55.9, epsilon = 1e-9);
    assert_eq!(fit.geometry.radius, 9.0);
    assert_relative_eq!(fit.report.max_error, 1.3719, epsilon = 1e-9);
    assert_relative_eq!(fit.report.errors[7], 1.3718763282356008, epsilon = 1e-8);
}

#[test]
fn test_inner_search_never_beats_its_own_grid_points() {
    let set = common::fixture_set();
    let params = SearchParams::default();
    let fit = best_inner_params(9.0, 0.524, &set, &params, None).unwrap();

    // The accepted maximum can undercut a direct evaluation by at most the
    // half-ulp of the 4-decimal rounding applied at acceptance.
    for c in params.center_angles.values().step_by(10) {
        for e1 in params.equant_distances.values().step_by(5) {
            let geometry = OrbitGeometry {
                center_angle: c,
                radius: 9.0,
                equant_distance: e1,
                equant_angle: 93.0,
                initial_phase: 55.5,
            };
            let probe = evaluate(&geometry, 0.524, &set);
            assert!(fit.report.max_error <= probe.max_error + 5e-5);
        }
    }
}

#[test]
fn test_speed_scan() {
    let set = common::fixture_set();
    let params = SearchParams::builder()
        .scan_periods(GridRange::new(684.0, 688.0, 1.0))
        .build()
        .unwrap();

    let result = best_speed(8.0, &set, &params, None).unwrap();
    assert_eq!(result.speed, 360.0 / 687.0);
    assert_relative_eq!(result.geometry.center_angle, 149.4, epsilon = 1e-9);
    assert_relative_eq!(result.geometry.equant_distance, 1.5, epsilon = 1e-9);
    assert_relative_eq!(result.geometry.equant_angle, 93.6, epsilon = 1e-9);
    assert_relative_eq!(result.geometry.initial_phase, 55.9, epsilon = 1e-9);
    assert_relative_eq!(result.report.max_error, 0.7393, epsilon = 1e-9);
}

#[test]
fn test_radius_scan() {
    let set = common::fixture_set();
    let params = SearchParams::builder()
        .scan_radii(GridRange::new(8.0, 10.0, 0.5))
        .build()
        .unwrap();

    let result = best_radius(0.524, &set, &params, None).unwrap();
    assert_eq!(result.geometry.radius, 8.0);
    assert_relative_eq!(result.geometry.center_angle, 149.4, epsilon = 1e-9);
    assert_relative_eq!(result.geometry.equant_distance, 1.5, epsilon = 1e-9);
    assert_relative_eq!(result.geometry.equant_angle, 93.8, epsilon = 1e-9);
    assert_relative_eq!(result.geometry.initial_phase, 55.9, epsilon = 1e-9);
    assert_relative_eq!(result.report.max_error, 0.8542, epsilon = 1e-9);
}

fn small_joint_params() -> SearchParams {
    SearchParams::builder()
        .joint_radii(GridRange::new(8.0, 8.3, 0.1))
        .joint_periods(GridRange::new(686.5, 687.0, 0.25))
        .build()
        .unwrap()
}

#[test]
fn test_joint_search() {
    let set = common::fixture_set();
    let result = best_orbit_params(&set, &small_joint_params(), None).unwrap();

    assert_relative_eq!(result.geometry.radius, 8.1, epsilon = 1e-9);
    assert_eq!(result.speed, 360.0 / 686.75);
    assert_relative_eq!(result.geometry.center_angle, 149.0, epsilon = 1e-9);
    assert_relative_eq!(result.geometry.equant_distance, 1.52, epsilon = 1e-9);
    assert_relative_eq!(result.geometry.equant_angle, 93.0, epsilon = 1e-9);
    assert_relative_eq!(result.geometry.initial_phase, 55.5, epsilon = 1e-9);
    assert_relative_eq!(result.report.max_error, 0.7739, epsilon = 1e-9);
    assert_relative_eq!(result.report.errors[10], 0.7739185747684019, epsilon = 1e-8);
}

#[test]
fn test_joint_search_is_idempotent() {
    let set = common::fixture_set();
    let params = small_joint_params();
    let first = best_orbit_params(&set, &params, None).unwrap();
    let second = best_orbit_params(&set, &params, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_observer_sees_strict_improvements() {
    let set = common::fixture_set();
    let mut improvements: Vec<(SearchStage, f64, f64)> = Vec::new();
    let mut observer = |improvement: &Improvement<'_>| {
        improvements.push((
            improvement.stage,
            improvement.geometry.radius,
            improvement.report.max_error,
        ));
    };

    let result = best_orbit_params(&set, &small_joint_params(), Some(&mut observer)).unwrap();

    // Three strict improvements on this grid, all from the joint stage (the
    // nested inner searches run unobserved).
    assert_eq!(improvements.len(), 3);
    assert!(improvements.iter().all(|i| i.0 == SearchStage::Joint));
    for window in improvements.windows(2) {
        assert!(window[1].2 < window[0].2);
    }
    assert_relative_eq!(improvements[0].2, 1.9619, epsilon = 1e-9);
    assert_relative_eq!(improvements[1].2, 0.7802, epsilon = 1e-9);
    let last = improvements.last().unwrap();
    assert_eq!(last.0, SearchStage::Joint);
    assert_eq!(last.1, result.geometry.radius);
    assert_eq!(last.2, result.report.max_error);
}

#[test]
fn test_empty_grid_is_a_configuration_error() {
    // Bypass the builder on purpose: a hand-built range can be empty even
    // though the builder would reject it.
    let set = common::fixture_set();
    let mut params = SearchParams::default();
    params.joint_radii = GridRange {
        start: 8.0,
        stop: 8.0,
        step: 0.1,
    };
    let result = best_orbit_params(&set, &params, None);
    assert!(matches!(
        result,
        Err(EquantError::NoCandidateEvaluated { stage: "joint" })
    ));
}
