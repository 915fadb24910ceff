use twobody_crosscheck::core::vector::{Vector3, dot, norm};
use twobody_crosscheck::harness::cases::reports_to_json;
use twobody_crosscheck::harness::{
    CaseError, ReferenceCollaborator, ReferenceError, ReferenceRequest, ScheduledImpulse,
    Tolerances, UniversalKeplerReference, scenarios, validate_maneuver, validate_propagation,
};

const MU_EARTH: f64 = 398_600.441_8; // km^3 / s^2

#[test]
fn elliptic_propagation_scenario_passes() {
    let case = scenarios::elliptic_propagation();
    let report =
        validate_propagation(&case, &UniversalKeplerReference, &Tolerances::propagation()).unwrap();

    assert!(report.passed, "discrepancies: {:?}", report.discrepancies);
    assert_eq!(report.case, "earth_elliptic_propagation");
    assert_eq!(report.reference, "universal-variable Kepler");
    // Two independent propagation paths agree far inside the 10 m floor.
    assert!(
        report.max_position_error_km < 1e-3,
        "max position error = {} km",
        report.max_position_error_km
    );
}

#[test]
fn hohmann_scenario_agrees_with_independent_reference() {
    let case = scenarios::hohmann_raise();
    let report =
        validate_maneuver(&case, &UniversalKeplerReference, &Tolerances::maneuver()).unwrap();

    assert!(report.passed, "discrepancies: {:?}", report.discrepancies);
    assert_eq!(report.case, "earth_hohmann_raise");
    assert!(
        report.max_position_error_km < 1e-6,
        "max position error = {} km",
        report.max_position_error_km
    );
}

#[test]
fn bielliptic_scenario_agrees_with_independent_reference() {
    let case = scenarios::bielliptic_raise();
    let report =
        validate_maneuver(&case, &UniversalKeplerReference, &Tolerances::maneuver()).unwrap();

    assert!(report.passed, "discrepancies: {:?}", report.discrepancies);
    assert_eq!(report.case, "earth_bielliptic_raise");
    // Three burns and a 20 h window compound the algorithmic differences,
    // but the paths still agree to a few metres.
    assert!(
        report.max_position_error_km < 1e-2,
        "max position error = {} km",
        report.max_position_error_km
    );
}

#[test]
fn biased_reference_is_flagged() {
    let case = scenarios::elliptic_propagation();
    let biased = OffsetReference { offset_x_km: 1.0 };
    let report = validate_propagation(&case, &biased, &Tolerances::propagation()).unwrap();

    assert!(!report.passed);
    assert_eq!(report.discrepancies.len(), 1, "{:?}", report.discrepancies);
    assert_eq!(report.discrepancies[0].quantity, "position_km[0]");
    assert!(report.max_position_error_km > 0.9);
    assert_eq!(report.reference, "offset reference");
}

#[test]
fn position_floor_absorbs_small_reference_offsets() {
    let case = scenarios::elliptic_propagation();
    let nudged = OffsetReference { offset_x_km: 0.008 };

    // 8 m sits under the propagation floor but over the floorless maneuver
    // allowance at this radius.
    let relaxed = validate_propagation(&case, &nudged, &Tolerances::propagation()).unwrap();
    assert!(relaxed.passed, "discrepancies: {:?}", relaxed.discrepancies);
    let strict = validate_propagation(&case, &nudged, &Tolerances::maneuver()).unwrap();
    assert!(!strict.passed);
    assert_eq!(strict.discrepancies[0].quantity, "position_km[0]");
}

#[test]
fn failing_reference_aborts_the_case() {
    let case = scenarios::elliptic_propagation();
    let err = validate_propagation(&case, &RefusingReference, &Tolerances::propagation())
        .unwrap_err();

    assert!(matches!(err, CaseError::Reference(_)), "got {err:?}");
    let message = err.to_string();
    assert!(
        message.contains("reference collaborator failed"),
        "message = {message}"
    );
    assert!(message.contains("tool exited 1"), "message = {message}");
}

#[test]
fn non_monotonic_schedule_is_rejected() {
    let request = ReferenceRequest {
        mu_km3_s2: MU_EARTH,
        epoch_s: 0.0,
        position_km: [8_000.0, 0.0, 0.0],
        velocity_km_s: [0.0, 7.5, 0.0],
        elapsed_s: 600.0,
        impulses: vec![
            ScheduledImpulse {
                epoch_s: 100.0,
                delta_v_lof_km_s: [0.01, 0.0, 0.0],
            },
            ScheduledImpulse {
                epoch_s: 50.0,
                delta_v_lof_km_s: [0.01, 0.0, 0.0],
            },
        ],
    };
    match UniversalKeplerReference.final_state(&request).unwrap_err() {
        ReferenceError::NonMonotonicSchedule {
            epoch_s,
            previous_epoch_s,
        } => {
            assert_eq!(epoch_s, 50.0);
            assert_eq!(previous_epoch_s, 100.0);
        }
        other => panic!("expected NonMonotonicSchedule, got {other:?}"),
    }
}

#[test]
fn report_json_round_trips() {
    let case = scenarios::hohmann_raise();
    let report =
        validate_maneuver(&case, &UniversalKeplerReference, &Tolerances::maneuver()).unwrap();
    let json = reports_to_json(&[report]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let entry = &parsed[0];
    assert_eq!(entry["case"], "earth_hohmann_raise");
    assert_eq!(entry["body"], "Earth");
    assert_eq!(entry["reference"], "universal-variable Kepler");
    assert_eq!(entry["passed"], true);
    assert!(entry["max_position_error_km"].as_f64().unwrap() >= 0.0);
    assert!(entry["discrepancies"].as_array().unwrap().is_empty());
}

#[test]
fn universal_reference_handles_hyperbolic_flyby() {
    // The anomaly-chain core refuses open orbits; the universal-variable
    // reference takes them in stride.
    let request = ReferenceRequest {
        mu_km3_s2: MU_EARTH,
        epoch_s: 0.0,
        position_km: [7_000.0, 0.0, 0.0],
        velocity_km_s: [0.0, 12.0, 0.0],
        elapsed_s: 600.0,
        impulses: Vec::new(),
    };
    let (r, v) = UniversalKeplerReference.final_state(&request).unwrap();

    let expected_r = [5_749.451_823_295, 6_809.238_945_097, 0.0];
    for i in 0..3 {
        assert!(
            (r[i] - expected_r[i]).abs() < 1e-5,
            "r[{i}] = {}, expected {}",
            r[i],
            expected_r[i]
        );
    }
    let energy_0 = 0.5 * 144.0 - MU_EARTH / 7_000.0;
    let energy_1 = 0.5 * dot(&v, &v) - MU_EARTH / norm(&r);
    assert!(
        ((energy_1 - energy_0) / energy_0).abs() < 1e-9,
        "energy drift = {}",
        (energy_1 - energy_0) / energy_0
    );
}

/// Wraps the built-in reference and shifts the final x position, standing in
/// for a reference tool with a systematic bias.
struct OffsetReference {
    offset_x_km: f64,
}

impl ReferenceCollaborator for OffsetReference {
    fn name(&self) -> &str {
        "offset reference"
    }

    fn final_state(&self, request: &ReferenceRequest) -> Result<(Vector3, Vector3), ReferenceError> {
        let (mut r, v) = UniversalKeplerReference.final_state(request)?;
        r[0] += self.offset_x_km;
        Ok((r, v))
    }
}

/// A reference tool that cannot answer at all.
struct RefusingReference;

impl ReferenceCollaborator for RefusingReference {
    fn name(&self) -> &str {
        "refusing reference"
    }

    fn final_state(&self, _request: &ReferenceRequest) -> Result<(Vector3, Vector3), ReferenceError> {
        Err(ReferenceError::Collaborator {
            message: "tool exited 1".to_string(),
        })
    }
}
