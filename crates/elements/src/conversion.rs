//! Cartesian ↔ classical element conversions.
//!
//! Both directions are closed-form and infallible: degenerate geometries are
//! resolved by the documented fallback conventions instead of errors, so the
//! round trip `coe2rv ∘ rv2coe` is the identity for any physically sensible
//! input.

use std::f64::consts::{PI, TAU};

use twobody_core::angle::wrap_two_pi;
use twobody_core::vector::{Vector3, cross, dot, norm, scale, sub};

use crate::ClassicalElements;

/// Orbits with eccentricity below this are handled as circular.
pub const ECC_DEGENERACY_TOL: f64 = 1e-8;
/// Orbits with inclination within this of 0 or π are handled as equatorial.
pub const INC_DEGENERACY_TOL: f64 = 1e-8;

/// Classical elements of a Cartesian state.
///
/// Degenerate geometries fall back to the usual conventions: an equatorial
/// orbit reports RAAN = 0 and measures the argument of periapsis from +x
/// (longitude of periapsis); a circular orbit reports argp = 0 and measures
/// the position by argument of latitude (or true longitude when both
/// degeneracies apply) in the true-anomaly slot. On a retrograde equatorial
/// plane the +x-referenced angles run along the direction of motion, which
/// keeps the reconstruction through [`coe2rv`] exact.
pub fn rv2coe(mu_km3_s2: f64, position_km: &Vector3, velocity_km_s: &Vector3) -> ClassicalElements {
    let r_norm = norm(position_km);
    let v_sq = dot(velocity_km_s, velocity_km_s);
    let radial_speed = dot(position_km, velocity_km_s);

    let h = cross(position_km, velocity_km_s);
    let h_norm = norm(&h);
    let node = cross(&[0.0, 0.0, 1.0], &h);
    let node_norm = norm(&node);

    // Eccentricity vector, from focus toward periapsis.
    let e_vec = scale(
        &sub(
            &scale(position_km, v_sq - mu_km3_s2 / r_norm),
            &scale(velocity_km_s, radial_speed),
        ),
        1.0 / mu_km3_s2,
    );
    let ecc = norm(&e_vec);

    // Vis-viva: a = -mu / 2E. Parabolic input maps to an infinite axis,
    // which the propagation layer rejects as not elliptic.
    let energy = v_sq / 2.0 - mu_km3_s2 / r_norm;
    let semi_major_axis_km = -mu_km3_s2 / (2.0 * energy);

    // atan2 keeps exactly planar states exactly on 0 or pi; acos(h_z/|h|)
    // rounding noise can exceed the equatorial tolerance.
    let inclination_rad = h[0].hypot(h[1]).atan2(h[2]);
    let circular = ecc < ECC_DEGENERACY_TOL;
    let equatorial =
        inclination_rad < INC_DEGENERACY_TOL || PI - inclination_rad < INC_DEGENERACY_TOL;

    let (raan_rad, argp_rad, true_anomaly_rad) = match (circular, equatorial) {
        (false, true) => {
            // Node line undefined: measure periapsis from +x, along the
            // direction of motion so a retrograde plane reconstructs to the
            // same state.
            let mut argp = e_vec[1].atan2(e_vec[0]);
            if h[2] < 0.0 {
                argp = -argp;
            }
            let nu = true_anomaly(&e_vec, ecc, position_km, r_norm, radial_speed);
            (0.0, wrap_two_pi(argp), nu)
        }
        (true, false) => {
            // Periapsis undefined: measure position from the ascending node.
            let raan = wrap_two_pi(node[1].atan2(node[0]));
            let mut latitude = clamped_acos(dot(&node, position_km) / (node_norm * r_norm));
            if position_km[2] < 0.0 {
                latitude = TAU - latitude;
            }
            (raan, 0.0, wrap_two_pi(latitude))
        }
        (true, true) => {
            // Neither line defined: true longitude from +x, again along the
            // direction of motion.
            let mut nu = position_km[1].atan2(position_km[0]);
            if h[2] < 0.0 {
                nu = -nu;
            }
            (0.0, 0.0, wrap_two_pi(nu))
        }
        (false, false) => {
            let raan = wrap_two_pi(node[1].atan2(node[0]));
            let mut argp = clamped_acos(dot(&node, &e_vec) / (node_norm * ecc));
            if e_vec[2] < 0.0 {
                argp = TAU - argp;
            }
            let nu = true_anomaly(&e_vec, ecc, position_km, r_norm, radial_speed);
            (raan, wrap_two_pi(argp), nu)
        }
    };

    ClassicalElements {
        semi_major_axis_km,
        eccentricity: ecc,
        inclination_rad,
        raan_rad,
        argp_rad,
        true_anomaly_rad,
    }
}

/// Cartesian position and velocity of a set of classical elements.
pub fn coe2rv(mu_km3_s2: f64, elements: &ClassicalElements) -> (Vector3, Vector3) {
    let p = elements.semi_latus_rectum_km();
    let ecc = elements.eccentricity;
    let (sin_nu, cos_nu) = elements.true_anomaly_rad.sin_cos();

    // Perifocal frame: x toward periapsis, z along angular momentum.
    let r_pf = p / (1.0 + ecc * cos_nu);
    let r_pqw = [r_pf * cos_nu, r_pf * sin_nu, 0.0];
    let v_factor = (mu_km3_s2 / p).sqrt();
    let v_pqw = [-v_factor * sin_nu, v_factor * (ecc + cos_nu), 0.0];

    // 3-1-3 rotation from perifocal to the inertial frame.
    let (sin_raan, cos_raan) = elements.raan_rad.sin_cos();
    let (sin_argp, cos_argp) = elements.argp_rad.sin_cos();
    let (sin_inc, cos_inc) = elements.inclination_rad.sin_cos();

    let rot = [
        [
            cos_raan * cos_argp - sin_raan * sin_argp * cos_inc,
            -cos_raan * sin_argp - sin_raan * cos_argp * cos_inc,
            sin_raan * sin_inc,
        ],
        [
            sin_raan * cos_argp + cos_raan * sin_argp * cos_inc,
            -sin_raan * sin_argp + cos_raan * cos_argp * cos_inc,
            -cos_raan * sin_inc,
        ],
        [sin_argp * sin_inc, cos_argp * sin_inc, cos_inc],
    ];

    let mut position_km = [0.0; 3];
    let mut velocity_km_s = [0.0; 3];
    for row in 0..3 {
        for col in 0..3 {
            position_km[row] += rot[row][col] * r_pqw[col];
            velocity_km_s[row] += rot[row][col] * v_pqw[col];
        }
    }
    (position_km, velocity_km_s)
}

/// True anomaly from the eccentricity and position vectors, with the
/// half-plane resolved by the sign of the radial speed r·v.
fn true_anomaly(
    e_vec: &Vector3,
    ecc: f64,
    position_km: &Vector3,
    r_norm: f64,
    radial_speed: f64,
) -> f64 {
    let mut nu = clamped_acos(dot(e_vec, position_km) / (ecc * r_norm));
    if radial_speed < 0.0 {
        nu = TAU - nu;
    }
    wrap_two_pi(nu)
}

/// acos with the argument clamped into [-1, 1] against rounding spill.
fn clamped_acos(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}
