use std::f64::consts::PI;

use twobody_crosscheck::core::vector::{cross, dot, hat, norm};
use twobody_crosscheck::elements::StateVector;
use twobody_crosscheck::maneuver::{
    DEFAULT_ISP_S, Impulse, LocalOrbitalFrame, Maneuver, TransferError, Trigger, apply_maneuver,
    bielliptic, hohmann,
};
use twobody_crosscheck::propagation::{ApsisKind, period_s, propagate};

const MU_EARTH: f64 = 398_600.441_8; // km^3 / s^2

#[test]
fn hohmann_matches_textbook_for_circular_departure() {
    let r1 = 7_000.0;
    let r2 = 42_164.0;
    let plan = hohmann(&circular_state(r1), r2, MU_EARTH).unwrap();

    // Vis-viva straight from the two radii.
    let a_t = 0.5 * (r1 + r2);
    let dv1 = (MU_EARTH * (2.0 / r1 - 1.0 / a_t)).sqrt() - (MU_EARTH / r1).sqrt();
    let dv2 = (MU_EARTH / r2).sqrt() - (MU_EARTH * (2.0 / r2 - 1.0 / a_t)).sqrt();
    let tof = PI * (a_t.powi(3) / MU_EARTH).sqrt();

    let burns = plan.impulses();
    assert_eq!(burns.len(), 2);
    assert_eq!(burns[0].trigger, Trigger::NextApsis(ApsisKind::Periapsis));
    assert_eq!(burns[1].trigger, Trigger::NextApsis(ApsisKind::Apoapsis));
    assert!(
        (burns[0].delta_v_lof_km_s[0] - dv1).abs() < 1e-9,
        "dv1 = {}, expected {}",
        burns[0].delta_v_lof_km_s[0],
        dv1
    );
    assert!(
        (burns[1].delta_v_lof_km_s[0] - dv2).abs() < 1e-9,
        "dv2 = {}, expected {}",
        burns[1].delta_v_lof_km_s[0],
        dv2
    );
    for burn in burns {
        // Purely along-track, with the bookkeeping Isp attached.
        assert_eq!(burn.delta_v_lof_km_s[1], 0.0);
        assert_eq!(burn.delta_v_lof_km_s[2], 0.0);
        assert_eq!(burn.isp_s, DEFAULT_ISP_S);
    }
    assert!(
        (plan.transfer_time_s() - tof).abs() < 1e-6,
        "tof = {}, expected {}",
        plan.transfer_time_s(),
        tof
    );
    assert!((plan.total_delta_v_km_s() - (dv1 + dv2)).abs() < 1e-9);
}

#[test]
fn hohmann_inward_uses_retro_burns() {
    let initial = circular_state(42_164.0);
    let plan = hohmann(&initial, 7_000.0, MU_EARTH).unwrap();

    let burns = plan.impulses();
    assert!(burns[0].delta_v_lof_km_s[0] < 0.0, "dv1 = {}", burns[0].delta_v_lof_km_s[0]);
    assert!(burns[1].delta_v_lof_km_s[0] < 0.0, "dv2 = {}", burns[1].delta_v_lof_km_s[0]);
    // Coming down, the transfer ellipse touches the target at its periapsis.
    assert_eq!(burns[1].trigger, Trigger::NextApsis(ApsisKind::Periapsis));

    let outcome = apply_maneuver(&initial, &plan, MU_EARTH).unwrap();
    assert!(
        (outcome.state.rmag_km() - 7_000.0).abs() < 1e-3,
        "rmag = {}",
        outcome.state.rmag_km()
    );
    let el = outcome.state.to_elements(MU_EARTH);
    assert!(el.eccentricity < 1e-6, "ecc = {}", el.eccentricity);
}

#[test]
fn hohmann_transfer_time_symmetric() {
    let raise = hohmann(&circular_state(7_000.0), 42_164.0, MU_EARTH).unwrap();
    let lower = hohmann(&circular_state(42_164.0), 7_000.0, MU_EARTH).unwrap();

    // Same half-ellipse both ways: equal time of flight and equal total cost.
    assert!(
        (raise.transfer_time_s() - lower.transfer_time_s()).abs() < 1e-6,
        "tof raise = {}, lower = {}",
        raise.transfer_time_s(),
        lower.transfer_time_s()
    );
    assert!(
        (raise.total_delta_v_km_s() - lower.total_delta_v_km_s()).abs() < 1e-9,
        "dv raise = {}, lower = {}",
        raise.total_delta_v_km_s(),
        lower.total_delta_v_km_s()
    );
}

#[test]
fn bielliptic_beats_hohmann_for_large_radius_ratio() {
    let initial = circular_state(7_000.0);
    let direct = hohmann(&initial, 140_000.0, MU_EARTH).unwrap();
    let via_high = bielliptic(&initial, 700_000.0, 140_000.0, MU_EARTH).unwrap();

    assert_eq!(via_high.impulses().len(), 3);
    assert!(
        via_high.total_delta_v_km_s() < direct.total_delta_v_km_s(),
        "bielliptic = {}, hohmann = {}",
        via_high.total_delta_v_km_s(),
        direct.total_delta_v_km_s()
    );
    // The saving at ratio 20 through a 100x intermediate is ~0.14 km/s.
    assert!(direct.total_delta_v_km_s() - via_high.total_delta_v_km_s() > 0.1);
    // Paid for with a far longer flight.
    assert!(via_high.transfer_time_s() > direct.transfer_time_s());
}

#[test]
fn bielliptic_rejects_intermediate_radius_inside() {
    let initial = circular_state(7_000.0);

    // Below the departure periapsis.
    let err = bielliptic(&initial, 6_000.0, 42_164.0, MU_EARTH).unwrap_err();
    assert!(
        matches!(err, TransferError::IntermediateRadiusInside { .. }),
        "got {err:?}"
    );
    // Between periapsis and target; on the boundary the plan would collapse
    // to a Hohmann transfer.
    let err = bielliptic(&initial, 20_000.0, 42_164.0, MU_EARTH).unwrap_err();
    assert!(
        matches!(err, TransferError::IntermediateRadiusInside { .. }),
        "got {err:?}"
    );
    assert!(
        err.to_string().contains("intermediate radius"),
        "message = {err}"
    );
}

#[test]
fn planners_reject_nonpositive_radius() {
    let initial = circular_state(7_000.0);
    for bad in [-1.0, 0.0, f64::NAN] {
        assert!(
            matches!(
                hohmann(&initial, bad, MU_EARTH),
                Err(TransferError::NonPositiveRadius { .. })
            ),
            "target = {bad}"
        );
        assert!(
            matches!(
                bielliptic(&initial, bad, 42_164.0, MU_EARTH),
                Err(TransferError::NonPositiveRadius { .. })
            ),
            "intermediate = {bad}"
        );
    }
}

#[test]
fn planners_reject_open_departure_orbit() {
    let hyperbolic = StateVector::new("Earth", 0.0, [7_000.0, 0.0, 0.0], [0.0, 12.0, 0.0]);

    match hohmann(&hyperbolic, 42_164.0, MU_EARTH).unwrap_err() {
        TransferError::OpenDepartureOrbit { ecc } => assert!(ecc > 1.0, "ecc = {ecc}"),
        other => panic!("expected OpenDepartureOrbit, got {other:?}"),
    }
    assert!(matches!(
        bielliptic(&hyperbolic, 500_000.0, 42_164.0, MU_EARTH),
        Err(TransferError::OpenDepartureOrbit { .. })
    ));
}

#[test]
fn hohmann_raise_from_eccentric_orbit_end_to_end() {
    // The fixed cross-check scenario: an inclined eccentric orbit raised to a
    // circular 35781.35 km radius, watched over a 19800 s window.
    let initial = StateVector::new("Earth", 0.0, [7_200.0, -1_000.0, 0.0], [0.0, 8.0, 3.25]);
    let plan = hohmann(&initial, 35_781.35, MU_EARTH).unwrap();

    let dv1 = plan.impulses()[0].delta_v_lof_km_s[0];
    let dv2 = plan.impulses()[1].delta_v_lof_km_s[0];
    assert!((dv1 - 0.889_405_475_633).abs() < 1e-6, "dv1 = {dv1}");
    assert!((dv2 - 1.422_447_727_869).abs() < 1e-6, "dv2 = {dv2}");
    assert!(
        (plan.transfer_time_s() - 15_595.712_782_925).abs() < 1e-3,
        "tof = {}",
        plan.transfer_time_s()
    );

    let outcome = apply_maneuver(&initial, &plan, MU_EARTH).unwrap();
    assert_eq!(outcome.impulses.len(), 2);
    let t1 = outcome.impulses[0].epoch_s;
    let t2 = outcome.impulses[1].epoch_s;
    assert!((t1 - 383.856_688_401).abs() < 1e-3, "t1 = {t1}");
    assert!((t2 - 15_979.569_471_326).abs() < 1e-2, "t2 = {t2}");
    assert!(
        (outcome.burn_span_s() - plan.transfer_time_s()).abs() < 1e-2,
        "span = {}, tof = {}",
        outcome.burn_span_s(),
        plan.transfer_time_s()
    );

    // Coast out the window; the orbit must sit circular at the target radius.
    let final_state =
        propagate(&outcome.state, 19_800.0 - outcome.state.epoch_s, MU_EARTH).unwrap();
    assert!(
        (final_state.rmag_km() - 35_781.35).abs() < 1e-3,
        "rmag = {}",
        final_state.rmag_km()
    );
    let el = final_state.to_elements(MU_EARTH);
    assert!(el.eccentricity < 1e-6, "ecc = {}", el.eccentricity);
}

#[test]
fn bielliptic_third_burn_lands_on_the_following_periapsis() {
    let initial = StateVector::new("Earth", 0.0, [7_200.0, -1_000.0, 0.0], [0.0, 8.0, 3.25]);
    let plan = bielliptic(&initial, 50_000.0, 35_781.35, MU_EARTH).unwrap();

    let dv = |i: usize| plan.impulses()[i].delta_v_lof_km_s[0];
    assert!((dv(0) - 1.125_201_478_671).abs() < 1e-6, "dv1 = {}", dv(0));
    assert!((dv(1) - 1.175_053_577_407).abs() < 1e-6, "dv2 = {}", dv(1));
    // Coming back down to the target, the circularization is retro.
    assert!((dv(2) + 0.266_014_361_151).abs() < 1e-6, "dv3 = {}", dv(2));
    assert!(
        (plan.transfer_time_s() - 68_174.249_941_834).abs() < 1e-3,
        "tof = {}",
        plan.transfer_time_s()
    );

    let outcome = apply_maneuver(&initial, &plan, MU_EARTH).unwrap();
    let epochs: Vec<f64> = outcome.impulses.iter().map(|burn| burn.epoch_s).collect();
    assert!((epochs[0] - 383.856_688_401).abs() < 1e-3, "t1 = {}", epochs[0]);
    assert!((epochs[1] - 24_357.797_514_968).abs() < 1e-2, "t2 = {}", epochs[1]);
    assert!((epochs[2] - 68_558.107_023_883).abs() < 1e-2, "t3 = {}", epochs[2]);
    // Half a period of the second transfer ellipse separates burns two and
    // three: the trigger binds strictly after the second burn, never on the
    // apoapsis it just consumed.
    assert!(
        (epochs[2] - epochs[1] - 44_200.309_508_914).abs() < 1e-2,
        "t3 - t2 = {}",
        epochs[2] - epochs[1]
    );

    let final_state =
        propagate(&outcome.state, 72_158.11 - outcome.state.epoch_s, MU_EARTH).unwrap();
    assert!(
        (final_state.rmag_km() - 35_781.35).abs() < 1e-3,
        "rmag = {}",
        final_state.rmag_km()
    );
    assert!(final_state.to_elements(MU_EARTH).eccentricity < 1e-6);
}

#[test]
fn repeated_periapsis_burns_fire_one_period_apart() {
    let initial = StateVector::new("Earth", 0.0, [8_000.0, 1_000.0, 500.0], [-1.0, 7.5, 1.0]);
    let plan = Maneuver::new(
        vec![
            Impulse::at_apsis(ApsisKind::Periapsis, 0.1),
            Impulse::at_apsis(ApsisKind::Periapsis, 0.1),
        ],
        0.0,
    );
    let outcome = apply_maneuver(&initial, &plan, MU_EARTH).unwrap();
    let t1 = outcome.impulses[0].epoch_s;
    let t2 = outcome.impulses[1].epoch_s;
    assert!((t1 - 9_738.340_317_979).abs() < 1e-3, "t1 = {t1}");
    assert!(t2 > t1, "t2 = {t2} must follow t1 = {t1}");
    assert!(
        (t2 - t1 - 10_320.884_434_196).abs() < 1e-2,
        "spacing = {}",
        t2 - t1
    );

    // The spacing is exactly one period of the orbit the first burn raised.
    let single = Maneuver::new(vec![Impulse::at_apsis(ApsisKind::Periapsis, 0.1)], 0.0);
    let after_first = apply_maneuver(&initial, &single, MU_EARTH).unwrap();
    let raised_period = period_s(
        MU_EARTH,
        after_first.state.to_elements(MU_EARTH).semi_major_axis_km,
    );
    assert!(
        (t2 - t1 - raised_period).abs() < 1e-3,
        "spacing = {}, period = {}",
        t2 - t1,
        raised_period
    );
    assert_eq!(outcome.burn_span_s(), t2 - t1);
}

#[test]
fn fixed_delay_trigger_fires_relative_to_previous_burn() {
    let initial = StateVector::new("Earth", 0.0, [8_000.0, 1_000.0, 500.0], [-1.0, 7.5, 1.0]);
    let cross_track = Impulse {
        trigger: Trigger::After { seconds: 120.0 },
        delta_v_lof_km_s: [0.0, 0.0, 0.05],
        isp_s: 250.0,
    };
    let plan = Maneuver::new(vec![cross_track], 0.0);
    let outcome = apply_maneuver(&initial, &plan, MU_EARTH).unwrap();

    assert_eq!(outcome.impulses[0].epoch_s, 120.0);
    assert_eq!(outcome.state.epoch_s, 120.0);
    // The recorded inertial delta-v is the local components rotated on the
    // frame of the coasted firing state.
    let coasted = propagate(&initial, 120.0, MU_EARTH).unwrap();
    let expected = LocalOrbitalFrame::at(&coasted).to_inertial(&[0.0, 0.0, 0.05]);
    for i in 0..3 {
        assert!(
            (outcome.impulses[0].delta_v_inertial_km_s[i] - expected[i]).abs() < 1e-12,
            "dv[{i}] = {}",
            outcome.impulses[0].delta_v_inertial_km_s[i]
        );
    }
    assert!((norm(&outcome.impulses[0].delta_v_inertial_km_s) - 0.05).abs() < 1e-12);
}

#[test]
fn local_frame_axes_follow_the_velocity() {
    let state = StateVector::new("Earth", 0.0, [8_000.0, 1_000.0, 500.0], [-1.0, 7.5, 1.0]);
    let frame = LocalOrbitalFrame::at(&state);
    let t_hat = frame.to_inertial(&[1.0, 0.0, 0.0]);
    let n_hat = frame.to_inertial(&[0.0, 1.0, 0.0]);
    let w_hat = frame.to_inertial(&[0.0, 0.0, 1.0]);

    let v_hat = hat(&state.velocity_km_s);
    let h_hat = hat(&cross(&state.position_km, &state.velocity_km_s));
    for i in 0..3 {
        assert!((t_hat[i] - v_hat[i]).abs() < 1e-12, "t[{i}] = {}", t_hat[i]);
        assert!((w_hat[i] - h_hat[i]).abs() < 1e-12, "w[{i}] = {}", w_hat[i]);
    }
    // Right-handed orthonormal triad, ŷ completing ẑ × x̂.
    assert!((norm(&n_hat) - 1.0).abs() < 1e-12);
    assert!(dot(&t_hat, &n_hat).abs() < 1e-12);
    assert!(dot(&t_hat, &w_hat).abs() < 1e-12);
    assert!(dot(&n_hat, &w_hat).abs() < 1e-12);
    let completed = cross(&w_hat, &t_hat);
    for i in 0..3 {
        assert!((n_hat[i] - completed[i]).abs() < 1e-12);
    }
}

#[test]
fn impulse_cost_bookkeeping() {
    let retro = Impulse::at_apsis(ApsisKind::Periapsis, -0.3);
    assert!((retro.magnitude_km_s() - 0.3).abs() < 1e-15);
    assert_eq!(retro.isp_s, DEFAULT_ISP_S);

    let plan = Maneuver::new(
        vec![retro, Impulse::at_apsis(ApsisKind::Apoapsis, 0.4)],
        100.0,
    );
    // Costs add as magnitudes; retro burns are not a refund.
    assert!((plan.total_delta_v_km_s() - 0.7).abs() < 1e-15);
    assert_eq!(plan.transfer_time_s(), 100.0);
}

// Circular prograde equatorial orbit of radius `radius_km`.
fn circular_state(radius_km: f64) -> StateVector {
    let speed = (MU_EARTH / radius_km).sqrt();
    StateVector::new("Earth", 0.0, [radius_km, 0.0, 0.0], [0.0, speed, 0.0])
}
