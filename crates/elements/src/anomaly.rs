//! Closed-form anomaly conversions for elliptic orbits.
//!
//! The half-angle atan2 forms are quadrant-safe for any eccentricity in
//! [0, 1). The missing direction, mean → eccentric, needs a root-finder and
//! lives in `twobody_propagation`.

use twobody_core::angle::wrap_two_pi;

/// True anomaly → eccentric anomaly.
pub fn true_to_eccentric(true_anomaly_rad: f64, ecc: f64) -> f64 {
    let (sin_half, cos_half) = (true_anomaly_rad / 2.0).sin_cos();
    wrap_two_pi(2.0 * ((1.0 - ecc).sqrt() * sin_half).atan2((1.0 + ecc).sqrt() * cos_half))
}

/// Eccentric anomaly → true anomaly.
pub fn eccentric_to_true(eccentric_anomaly_rad: f64, ecc: f64) -> f64 {
    let (sin_half, cos_half) = (eccentric_anomaly_rad / 2.0).sin_cos();
    wrap_two_pi(2.0 * ((1.0 + ecc).sqrt() * sin_half).atan2((1.0 - ecc).sqrt() * cos_half))
}

/// Eccentric anomaly → mean anomaly (Kepler's equation, forward direction).
pub fn eccentric_to_mean(eccentric_anomaly_rad: f64, ecc: f64) -> f64 {
    wrap_two_pi(eccentric_anomaly_rad - ecc * eccentric_anomaly_rad.sin())
}

/// True anomaly → mean anomaly.
pub fn true_to_mean(true_anomaly_rad: f64, ecc: f64) -> f64 {
    eccentric_to_mean(true_to_eccentric(true_anomaly_rad, ecc), ecc)
}
