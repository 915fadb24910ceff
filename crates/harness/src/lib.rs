//! Cross-validation harness for the two-body core.
//!
//! The harness never trusts the core: it recomputes every trajectory through
//! a [`ReferenceCollaborator`], an injected and algorithmically independent
//! implementation, and reports component-wise agreement. The shipped
//! [`UniversalKeplerReference`] keeps the comparison hermetic; external
//! tools plug in behind the same trait.

use std::f64::consts::TAU;

use thiserror::Error;
use twobody_core::vector::Vector3;

pub mod cases;
pub mod scenarios;
pub mod universal;

pub use cases::{
    CaseError, CaseReport, Discrepancy, ManeuverCase, PropagationCase, TransferKind,
    validate_maneuver, validate_propagation,
};
pub use universal::UniversalKeplerReference;

/// A resolved burn the reference must reproduce: a firing epoch and the
/// delta-v components on the velocity-aligned local frame of the firing
/// state. The frame convention is part of this contract; the reference
/// reconstructs the axes from its own propagated state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledImpulse {
    pub epoch_s: f64,
    pub delta_v_lof_km_s: Vector3,
}

/// Everything a reference implementation needs to independently reproduce a
/// trajectory: the initial Cartesian state, the gravitational parameter, the
/// resolved burn schedule, and the total elapsed time.
#[derive(Debug, Clone)]
pub struct ReferenceRequest {
    pub mu_km3_s2: f64,
    pub epoch_s: f64,
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
    pub elapsed_s: f64,
    pub impulses: Vec<ScheduledImpulse>,
}

impl ReferenceRequest {
    /// Epoch the final state is requested at.
    pub fn target_epoch_s(&self) -> f64 {
        self.epoch_s + self.elapsed_s
    }
}

/// An independent trajectory implementation the harness validates against.
pub trait ReferenceCollaborator {
    /// Implementation name quoted in reports.
    fn name(&self) -> &str;

    /// Final Cartesian state at the request's target epoch, with every
    /// scheduled impulse applied at its firing epoch.
    fn final_state(&self, request: &ReferenceRequest) -> Result<(Vector3, Vector3), ReferenceError>;
}

/// Failures inside a reference collaborator. These abort the case: a
/// reference that cannot answer yields no verdict, not a pass.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference collaborator failed: {message}")]
    Collaborator { message: String },
    #[error("reference propagation did not converge after {iterations} iterations")]
    Diverged { iterations: usize },
    #[error("impulse schedule not monotonic: burn at {epoch_s} s precedes {previous_epoch_s} s")]
    NonMonotonicSchedule { epoch_s: f64, previous_epoch_s: f64 },
}

/// Agreement thresholds for one comparison. Every component must satisfy
/// |actual − expected| ≤ abs + relative·|expected|, with `position_abs_km`
/// as the absolute floor on position components and zero floor on velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub relative: f64,
    pub position_abs_km: f64,
}

impl Tolerances {
    /// Propagation-only checks: 1e-5 relative with a 10 m absolute floor
    /// that absorbs reference-tool implementation differences.
    pub fn propagation() -> Self {
        Tolerances {
            relative: 1e-5,
            position_abs_km: 0.01,
        }
    }

    /// Maneuver checks: 1e-6 relative, no absolute floor.
    pub fn maneuver() -> Self {
        Tolerances {
            relative: 1e-6,
            position_abs_km: 0.0,
        }
    }
}

/// Map an angle quoted in the symmetric (−π, π] convention many reference
/// tools use onto this workspace's [0, 2π) convention.
pub fn from_reference_angle(angle_rad: f64) -> f64 {
    if angle_rad < 0.0 {
        angle_rad + TAU
    } else {
        angle_rad
    }
}
