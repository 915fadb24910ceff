//! Application of a planned maneuver to a state.
//!
//! Triggers are resolved one burn at a time against the epoch reached after
//! the previous burn. Apsis triggers bind strictly after that epoch, so a
//! burn applied exactly at an apsis cannot be re-detected by the next
//! trigger; the bi-elliptic third burn in particular always lands on the
//! following periapsis instead of the one just consumed.

use twobody_core::vector::{Vector3, add};
use twobody_elements::StateVector;
use twobody_propagation::{PropagationError, next_apsis, propagate};

use crate::frame::LocalOrbitalFrame;
use crate::{Maneuver, Trigger};

/// Record of one impulse as it was actually applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedImpulse {
    pub epoch_s: f64,
    pub delta_v_lof_km_s: Vector3,
    pub delta_v_inertial_km_s: Vector3,
}

/// Post-burn state of a maneuver plus its resolved burn schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ManeuverOutcome {
    pub state: StateVector,
    pub impulses: Vec<AppliedImpulse>,
}

impl ManeuverOutcome {
    /// Elapsed time between the first and last applied burn (s).
    pub fn burn_span_s(&self) -> f64 {
        match (self.impulses.first(), self.impulses.last()) {
            (Some(first), Some(last)) => last.epoch_s - first.epoch_s,
            _ => 0.0,
        }
    }
}

/// Apply every impulse of `maneuver` in order, coasting between burns.
///
/// The returned state sits at the final burn epoch; any remaining coast to a
/// target epoch is the caller's follow-up propagation.
pub fn apply_maneuver(
    initial: &StateVector,
    maneuver: &Maneuver,
    mu_km3_s2: f64,
) -> Result<ManeuverOutcome, PropagationError> {
    let mut state = initial.clone();
    let mut applied = Vec::with_capacity(maneuver.impulses().len());
    for impulse in maneuver.impulses() {
        let fire_epoch_s = match impulse.trigger {
            Trigger::NextApsis(kind) => next_apsis(&state, kind, state.epoch_s, mu_km3_s2)?,
            Trigger::After { seconds } => state.epoch_s + seconds,
        };
        state = propagate(&state, fire_epoch_s - state.epoch_s, mu_km3_s2)?;

        let frame = LocalOrbitalFrame::at(&state);
        let delta_v_inertial_km_s = frame.to_inertial(&impulse.delta_v_lof_km_s);
        state = state.with_velocity(add(&state.velocity_km_s, &delta_v_inertial_km_s));
        applied.push(AppliedImpulse {
            epoch_s: fire_epoch_s,
            delta_v_lof_km_s: impulse.delta_v_lof_km_s,
            delta_v_inertial_km_s,
        });
    }
    Ok(ManeuverOutcome {
        state,
        impulses: applied,
    })
}
