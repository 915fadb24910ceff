//! Newton root-finder for Kepler's equation M = E − e·sin E.

use twobody_core::angle::wrap_two_pi;

use crate::PropagationError;

/// Iteration budget for the Newton solve.
pub const MAX_ITERATIONS: usize = 50;
/// Convergence tolerance on the residual of Kepler's equation (rad).
pub const RESIDUAL_TOL: f64 = 1e-12;

/// Eccentric anomaly for a mean anomaly and eccentricity in [0, 1).
///
/// Well inside the elliptic regime Newton converges in a handful of steps
/// from the standard starter E₀ = M + e·sin M; near-parabolic inputs can
/// exhaust the budget and are reported as [`PropagationError::Diverged`]
/// rather than returning a half-converged angle.
pub fn solve_kepler(mean_anomaly_rad: f64, ecc: f64) -> Result<f64, PropagationError> {
    let m = wrap_two_pi(mean_anomaly_rad);
    let mut e_anom = m + ecc * m.sin();
    let mut residual = e_anom - ecc * e_anom.sin() - m;
    let mut iterations = 0;
    // Negated comparison so a NaN residual keeps iterating and exhausts the
    // budget instead of passing as converged.
    while !(residual.abs() < RESIDUAL_TOL) {
        if iterations == MAX_ITERATIONS {
            return Err(PropagationError::Diverged {
                iterations,
                residual,
                ecc,
            });
        }
        // 1 − e·cos E stays positive for e < 1, so the step is finite.
        e_anom -= residual / (1.0 - ecc * e_anom.cos());
        residual = e_anom - ecc * e_anom.sin() - m;
        iterations += 1;
    }
    Ok(wrap_two_pi(e_anom))
}
