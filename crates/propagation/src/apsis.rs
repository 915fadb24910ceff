//! Analytic apsis-crossing timing.
//!
//! An elliptic orbit crosses periapsis at mean anomaly 0 and apoapsis at π,
//! and mean anomaly advances linearly in time, so crossing epochs come from
//! plain anomaly arithmetic rather than a numerical event search.

use std::f64::consts::{PI, TAU};
use std::fmt;

use twobody_core::angle::wrap_two_pi;
use twobody_elements::{StateVector, anomaly};

use crate::{PropagationError, ensure_elliptic, mean_motion_rad_s, period_s};

/// Which apsis a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApsisKind {
    Periapsis,
    Apoapsis,
}

impl ApsisKind {
    fn target_mean_anomaly_rad(self) -> f64 {
        match self {
            ApsisKind::Periapsis => 0.0,
            ApsisKind::Apoapsis => PI,
        }
    }
}

impl fmt::Display for ApsisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApsisKind::Periapsis => write!(f, "periapsis"),
            ApsisKind::Apoapsis => write!(f, "apoapsis"),
        }
    }
}

/// Mean-anomaly guard band around the target apsis. A state recovered from
/// Cartesian coordinates right at an apsis carries round-off of order 1e-8
/// rad with an arbitrary sign, so a strictly-positive offset this small means
/// "parked on the crossing", not "approaching it".
const ON_APSIS_GUARD_RAD: f64 = 1e-6;

/// Epoch of the next `kind` crossing strictly after `after_epoch_s`.
///
/// `state` fixes the orbit and its phase; the search scans forward from the
/// state's own epoch, so crossings before it are never reported. A state
/// within [`ON_APSIS_GUARD_RAD`] of the target reports the following
/// crossing, one revolution out, which keeps a burn applied exactly at an
/// apsis from re-detecting the crossing it sits on. The result is
/// deterministic for identical inputs, and feeding a returned epoch back in
/// as `after_epoch_s` yields the following crossing, one period later.
pub fn next_apsis(
    state: &StateVector,
    kind: ApsisKind,
    after_epoch_s: f64,
    mu_km3_s2: f64,
) -> Result<f64, PropagationError> {
    let elements = state.to_elements(mu_km3_s2);
    ensure_elliptic(&elements)?;

    let ecc = elements.eccentricity;
    let mean_anomaly = anomaly::true_to_mean(elements.true_anomaly_rad, ecc);
    let mean_motion = mean_motion_rad_s(mu_km3_s2, elements.semi_major_axis_km);
    let mut to_go = wrap_two_pi(kind.target_mean_anomaly_rad() - mean_anomaly);
    if to_go < ON_APSIS_GUARD_RAD {
        to_go += TAU;
    }

    let mut epoch_s = state.epoch_s + to_go / mean_motion;
    if epoch_s <= after_epoch_s {
        let period = period_s(mu_km3_s2, elements.semi_major_axis_km);
        let whole_periods = ((after_epoch_s - epoch_s) / period).floor() + 1.0;
        epoch_s += whole_periods * period;
    }
    Ok(epoch_s)
}
