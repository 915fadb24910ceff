//! Built-in reference collaborator.
//!
//! Propagates with the universal-variable formulation (Stumpff functions,
//! f and g scalars), a different algorithm from the core's anomaly chain
//! with no shared conversion code. Agreement between the two paths is
//! evidence about the physics, not the same routine run twice.

use twobody_core::vector::{Vector3, add, cross, dot, hat, norm, scale};

use crate::{ReferenceCollaborator, ReferenceError, ReferenceRequest};

const MAX_ITERATIONS: usize = 60;

/// Universal-variable Kepler propagation behind the collaborator trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniversalKeplerReference;

impl ReferenceCollaborator for UniversalKeplerReference {
    fn name(&self) -> &str {
        "universal-variable Kepler"
    }

    fn final_state(&self, request: &ReferenceRequest) -> Result<(Vector3, Vector3), ReferenceError> {
        let mut epoch_s = request.epoch_s;
        let mut position_km = request.position_km;
        let mut velocity_km_s = request.velocity_km_s;

        for burn in &request.impulses {
            if burn.epoch_s < epoch_s {
                return Err(ReferenceError::NonMonotonicSchedule {
                    epoch_s: burn.epoch_s,
                    previous_epoch_s: epoch_s,
                });
            }
            let (r, v) = universal_propagate(
                &position_km,
                &velocity_km_s,
                burn.epoch_s - epoch_s,
                request.mu_km3_s2,
            )?;
            // Frame axes rebuilt from this propagation path's own state.
            let t_hat = hat(&v);
            let w_hat = hat(&cross(&r, &v));
            let n_hat = cross(&w_hat, &t_hat);
            let dv = burn.delta_v_lof_km_s;
            let dv_inertial = add(
                &add(&scale(&t_hat, dv[0]), &scale(&n_hat, dv[1])),
                &scale(&w_hat, dv[2]),
            );
            position_km = r;
            velocity_km_s = add(&v, &dv_inertial);
            epoch_s = burn.epoch_s;
        }

        universal_propagate(
            &position_km,
            &velocity_km_s,
            request.target_epoch_s() - epoch_s,
            request.mu_km3_s2,
        )
    }
}

/// Advance (r, v) by a signed time offset via universal variables.
fn universal_propagate(
    r0: &Vector3,
    v0: &Vector3,
    dt_s: f64,
    mu_km3_s2: f64,
) -> Result<(Vector3, Vector3), ReferenceError> {
    let r0_mag = norm(r0);
    let v0_sq = dot(v0, v0);
    let rdotv = dot(r0, v0);
    let sqrt_mu = mu_km3_s2.sqrt();

    // Reciprocal semi-major axis; sign selects the conic regime.
    let alpha = 2.0 / r0_mag - v0_sq / mu_km3_s2;

    let mut chi = if alpha > 1e-12 {
        sqrt_mu * dt_s * alpha
    } else if alpha < -1e-12 {
        let a = 1.0 / alpha;
        let sign_dt = if dt_s >= 0.0 { 1.0 } else { -1.0 };
        sign_dt
            * (-a).sqrt()
            * ((-2.0 * mu_km3_s2 * alpha * dt_s)
                / (rdotv + sign_dt * (-mu_km3_s2 * a).sqrt() * (1.0 - r0_mag * alpha)))
                .ln()
    } else {
        // Near-parabolic
        sqrt_mu * dt_s / r0_mag
    };

    // Newton iteration on Kepler's equation in the universal anomaly.
    let tol = 1e-14 * dt_s.abs().max(1.0);
    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        let chi2 = chi * chi;
        let psi = alpha * chi2;
        let (c2, c3) = stumpff_c2c3(psi);

        let r = chi2 * c2 + rdotv / sqrt_mu * chi * (1.0 - psi * c3) + r0_mag * (1.0 - psi * c2);
        let f_val = r0_mag * chi * (1.0 - psi * c3) + rdotv / sqrt_mu * chi2 * c2 + chi2 * chi * c3
            - sqrt_mu * dt_s;

        let delta = f_val / r;
        chi -= delta;
        if delta.abs() < tol {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(ReferenceError::Diverged {
            iterations: MAX_ITERATIONS,
        });
    }

    // f and g scalars at the converged anomaly.
    let chi2 = chi * chi;
    let psi = alpha * chi2;
    let (c2, c3) = stumpff_c2c3(psi);
    let r_mag = chi2 * c2 + rdotv / sqrt_mu * chi * (1.0 - psi * c3) + r0_mag * (1.0 - psi * c2);

    let f = 1.0 - chi2 / r0_mag * c2;
    let g = dt_s - chi2 * chi / sqrt_mu * c3;
    let g_dot = 1.0 - chi2 / r_mag * c2;
    let f_dot = sqrt_mu / (r_mag * r0_mag) * chi * (psi * c3 - 1.0);

    let r_final = add(&scale(r0, f), &scale(v0, g));
    let v_final = add(&scale(r0, f_dot), &scale(v0, g_dot));
    Ok((r_final, v_final))
}

/// Stumpff functions c2(ψ) and c3(ψ), with a series fallback near ψ = 0.
fn stumpff_c2c3(psi: f64) -> (f64, f64) {
    if psi > 1e-6 {
        let sqrt_psi = psi.sqrt();
        (
            (1.0 - sqrt_psi.cos()) / psi,
            (sqrt_psi - sqrt_psi.sin()) / (psi * sqrt_psi),
        )
    } else if psi < -1e-6 {
        let sqrt_neg = (-psi).sqrt();
        (
            (1.0 - sqrt_neg.cosh()) / psi,
            (sqrt_neg.sinh() - sqrt_neg) / ((-psi) * sqrt_neg),
        )
    } else {
        (
            0.5 - psi / 24.0 + psi * psi / 720.0,
            1.0 / 6.0 - psi / 120.0 + psi * psi / 5040.0,
        )
    }
}
