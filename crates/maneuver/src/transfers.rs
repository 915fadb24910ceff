//! Analytic planners for impulsive transfers toward circular target orbits.
//!
//! Both planners anchor the departure burn at the periapsis of the initial
//! osculating orbit and return delta-v components plus the analytic transfer
//! time for two-body Keplerian motion with a specified central GM. Burns are
//! signed: inward legs get retro (negative along-track) burns.

use std::f64::consts::PI;

use twobody_elements::StateVector;
use twobody_propagation::ApsisKind;

use crate::{Impulse, Maneuver, TransferError};

/// Plan the classical Hohmann transfer from the initial orbit's periapsis to
/// a circular orbit of radius `target_radius_km`.
///
/// The first impulse opens the transfer half-ellipse at the next periapsis;
/// the second circularizes where that ellipse touches the target radius,
/// which is its apoapsis going outward and its periapsis coming inward.
pub fn hohmann(
    initial: &StateVector,
    target_radius_km: f64,
    mu_km3_s2: f64,
) -> Result<Maneuver, TransferError> {
    ensure_positive_radius(target_radius_km)?;
    let (r_p, v_p) = departure_periapsis(initial, mu_km3_s2)?;

    let a_t = 0.5 * (r_p + target_radius_km);
    let tof = PI * (a_t.powi(3) / mu_km3_s2).sqrt();

    // Transfer speed at departure (r_p) and arrival (target) radii
    let v_t1 = (mu_km3_s2 * (2.0 / r_p - 1.0 / a_t)).sqrt();
    let v_t2 = (mu_km3_s2 * (2.0 / target_radius_km - 1.0 / a_t)).sqrt();
    let v_final = (mu_km3_s2 / target_radius_km).sqrt();

    let dv1 = v_t1 - v_p;
    let dv2 = v_final - v_t2;
    let arrival_apsis = if target_radius_km >= r_p {
        ApsisKind::Apoapsis
    } else {
        ApsisKind::Periapsis
    };

    Ok(Maneuver::new(
        vec![
            Impulse::at_apsis(ApsisKind::Periapsis, dv1),
            Impulse::at_apsis(arrival_apsis, dv2),
        ],
        tof,
    ))
}

/// Plan a bi-elliptic transfer through an intermediate apoapsis of radius
/// `intermediate_radius_km`, circularizing at `target_radius_km`.
///
/// The intermediate radius must lie strictly outside both the departure
/// periapsis and the target radius; on the boundary the second ellipse
/// degenerates and the plan collapses to a Hohmann transfer, so that case is
/// rejected rather than silently replanned. The radius is not optimized
/// here; for large radius ratios (beyond roughly 11.94) a swept
/// `intermediate_radius_km` can beat Hohmann on total delta-v.
pub fn bielliptic(
    initial: &StateVector,
    intermediate_radius_km: f64,
    target_radius_km: f64,
    mu_km3_s2: f64,
) -> Result<Maneuver, TransferError> {
    ensure_positive_radius(target_radius_km)?;
    ensure_positive_radius(intermediate_radius_km)?;
    let (r_p, v_p) = departure_periapsis(initial, mu_km3_s2)?;
    if intermediate_radius_km <= r_p || intermediate_radius_km <= target_radius_km {
        return Err(TransferError::IntermediateRadiusInside {
            rb_km: intermediate_radius_km,
            periapsis_km: r_p,
            target_km: target_radius_km,
        });
    }

    // First ellipse: r_p -> r_b
    let a_1 = 0.5 * (r_p + intermediate_radius_km);
    let v_peri_1 = (mu_km3_s2 * (2.0 / r_p - 1.0 / a_1)).sqrt();
    let v_apo_1 = (mu_km3_s2 * (2.0 / intermediate_radius_km - 1.0 / a_1)).sqrt();

    // Second ellipse: r_b -> target
    let a_2 = 0.5 * (intermediate_radius_km + target_radius_km);
    let v_apo_2 = (mu_km3_s2 * (2.0 / intermediate_radius_km - 1.0 / a_2)).sqrt();
    let v_peri_2 = (mu_km3_s2 * (2.0 / target_radius_km - 1.0 / a_2)).sqrt();
    let v_final = (mu_km3_s2 / target_radius_km).sqrt();

    let dv1 = v_peri_1 - v_p;
    let dv2 = v_apo_2 - v_apo_1;
    let dv3 = v_final - v_peri_2;
    let tof = PI * ((a_1.powi(3) / mu_km3_s2).sqrt() + (a_2.powi(3) / mu_km3_s2).sqrt());

    Ok(Maneuver::new(
        vec![
            Impulse::at_apsis(ApsisKind::Periapsis, dv1),
            Impulse::at_apsis(ApsisKind::Apoapsis, dv2),
            Impulse::at_apsis(ApsisKind::Periapsis, dv3),
        ],
        tof,
    ))
}

/// Periapsis radius and speed of the initial osculating orbit.
fn departure_periapsis(
    initial: &StateVector,
    mu_km3_s2: f64,
) -> Result<(f64, f64), TransferError> {
    let elements = initial.to_elements(mu_km3_s2);
    if !elements.is_elliptic() {
        return Err(TransferError::OpenDepartureOrbit {
            ecc: elements.eccentricity,
        });
    }
    let r_p = elements.periapsis_radius_km();
    let v_p = (mu_km3_s2 * (2.0 / r_p - 1.0 / elements.semi_major_axis_km)).sqrt();
    Ok((r_p, v_p))
}

fn ensure_positive_radius(radius_km: f64) -> Result<(), TransferError> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(())
    } else {
        Err(TransferError::NonPositiveRadius { radius_km })
    }
}
