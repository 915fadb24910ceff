//! Impulsive maneuver modeling: burn triggers, local-frame delta-v, and the
//! analytic transfer planners that emit them.
//!
//! A [`Maneuver`] is a plan, not a trajectory: triggers are resolved against
//! actual orbital geometry only when the maneuver is applied to a state (see
//! [`apply_maneuver`]), which keeps planning free of any propagation.

use thiserror::Error;
use twobody_core::vector::{self, Vector3};
use twobody_propagation::ApsisKind;

pub mod apply;
pub mod frame;
pub mod transfers;

pub use apply::{AppliedImpulse, ManeuverOutcome, apply_maneuver};
pub use frame::LocalOrbitalFrame;
pub use transfers::{bielliptic, hohmann};

/// Specific impulse recorded on planned burns when the caller does not
/// supply one (s). Propellant bookkeeping only; it never shapes the
/// trajectory.
pub const DEFAULT_ISP_S: f64 = 300.0;

/// When a burn fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// At the next crossing of the given apsis, strictly after the epoch
    /// reached once all earlier impulses have been applied.
    NextApsis(ApsisKind),
    /// A fixed non-negative delay from the post-previous-impulse epoch.
    After { seconds: f64 },
}

/// One impulsive burn: a trigger, a delta-v on the velocity-aligned local
/// frame axes of the firing state, and the specific impulse carried along
/// for propellant bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impulse {
    pub trigger: Trigger,
    pub delta_v_lof_km_s: Vector3,
    pub isp_s: f64,
}

impl Impulse {
    /// A purely along-track burn at the next crossing of `kind`.
    pub fn at_apsis(kind: ApsisKind, along_track_km_s: f64) -> Self {
        Impulse {
            trigger: Trigger::NextApsis(kind),
            delta_v_lof_km_s: [along_track_km_s, 0.0, 0.0],
            isp_s: DEFAULT_ISP_S,
        }
    }

    /// Burn magnitude |Δv| (km/s).
    pub fn magnitude_km_s(&self) -> f64 {
        vector::norm(&self.delta_v_lof_km_s)
    }
}

/// An ordered burn sequence plus the analytic time between its first and
/// last impulse.
#[derive(Debug, Clone, PartialEq)]
pub struct Maneuver {
    impulses: Vec<Impulse>,
    transfer_time_s: f64,
}

impl Maneuver {
    pub fn new(impulses: Vec<Impulse>, transfer_time_s: f64) -> Self {
        Maneuver {
            impulses,
            transfer_time_s,
        }
    }

    /// Burns in application order.
    pub fn impulses(&self) -> &[Impulse] {
        &self.impulses
    }

    /// Analytic time from the first burn to the last (s). The lead-in coast
    /// to the first trigger is not included; it depends on the state the
    /// maneuver is eventually applied to.
    pub fn transfer_time_s(&self) -> f64 {
        self.transfer_time_s
    }

    /// Total cost Σ|Δvᵢ| (km/s).
    pub fn total_delta_v_km_s(&self) -> f64 {
        self.impulses
            .iter()
            .map(Impulse::magnitude_km_s)
            .sum()
    }
}

/// Errors raised while planning a transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("target radius must be positive and finite, got {radius_km} km")]
    NonPositiveRadius { radius_km: f64 },
    #[error(
        "intermediate radius {rb_km} km must lie strictly outside the departure periapsis \
         {periapsis_km} km and the target radius {target_km} km"
    )]
    IntermediateRadiusInside {
        rb_km: f64,
        periapsis_km: f64,
        target_km: f64,
    },
    #[error("departure orbit must be elliptic to anchor apsis-triggered burns (ecc {ecc})")]
    OpenDepartureOrbit { ecc: f64 },
}
