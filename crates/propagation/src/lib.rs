//! Closed-form two-body propagation for elliptic orbits.
//!
//! Propagation works through the anomaly chain: true → eccentric → mean,
//! a linear advance in mean anomaly, then a Newton solve of Kepler's
//! equation back to eccentric and true anomaly. Time offsets are signed, so
//! propagating backwards is the exact inverse of propagating forwards up to
//! the solver tolerance.

use std::f64::consts::TAU;

use thiserror::Error;
use twobody_elements::{ClassicalElements, StateVector, anomaly, coe2rv};

pub mod apsis;
pub mod kepler;

pub use apsis::{ApsisKind, next_apsis};
pub use kepler::solve_kepler;

/// Errors raised by the propagation layer.
#[derive(Debug, Error)]
pub enum PropagationError {
    #[error(
        "Kepler solver did not converge after {iterations} iterations \
         (residual {residual:.3e}, ecc {ecc})"
    )]
    Diverged {
        iterations: usize,
        residual: f64,
        ecc: f64,
    },
    #[error(
        "orbit is not elliptic (ecc {ecc}, semi-major axis {semi_major_axis_km} km); \
         only bound orbits are supported"
    )]
    NotElliptic { ecc: f64, semi_major_axis_km: f64 },
}

/// Mean motion n = √(μ/a³) (rad/s).
pub fn mean_motion_rad_s(mu_km3_s2: f64, semi_major_axis_km: f64) -> f64 {
    (mu_km3_s2 / semi_major_axis_km.powi(3)).sqrt()
}

/// Orbital period 2π/n (s).
pub fn period_s(mu_km3_s2: f64, semi_major_axis_km: f64) -> f64 {
    TAU / mean_motion_rad_s(mu_km3_s2, semi_major_axis_km)
}

pub(crate) fn ensure_elliptic(elements: &ClassicalElements) -> Result<(), PropagationError> {
    if elements.is_elliptic() {
        Ok(())
    } else {
        Err(PropagationError::NotElliptic {
            ecc: elements.eccentricity,
            semi_major_axis_km: elements.semi_major_axis_km,
        })
    }
}

/// Advance classical elements by a signed time offset.
pub fn propagate_elements(
    elements: &ClassicalElements,
    dt_s: f64,
    mu_km3_s2: f64,
) -> Result<ClassicalElements, PropagationError> {
    ensure_elliptic(elements)?;
    let ecc = elements.eccentricity;
    let mean_anomaly = anomaly::true_to_mean(elements.true_anomaly_rad, ecc);
    let advanced = mean_anomaly + mean_motion_rad_s(mu_km3_s2, elements.semi_major_axis_km) * dt_s;
    let eccentric = kepler::solve_kepler(advanced, ecc)?;
    Ok(elements.with_true_anomaly(anomaly::eccentric_to_true(eccentric, ecc)))
}

/// Propagate a Cartesian state by a signed time offset.
pub fn propagate(
    state: &StateVector,
    dt_s: f64,
    mu_km3_s2: f64,
) -> Result<StateVector, PropagationError> {
    let advanced = propagate_elements(&state.to_elements(mu_km3_s2), dt_s, mu_km3_s2)?;
    let (position_km, velocity_km_s) = coe2rv(mu_km3_s2, &advanced);
    Ok(StateVector {
        attractor: state.attractor.clone(),
        frame: state.frame,
        epoch_s: state.epoch_s + dt_s,
        position_km,
        velocity_km_s,
    })
}
