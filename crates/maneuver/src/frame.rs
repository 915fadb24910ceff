//! Velocity-aligned local orbital frame.

use twobody_core::vector::{Vector3, cross, hat};
use twobody_elements::StateVector;

/// Right-handed orthonormal triad at a state: x̂ along the velocity, ẑ along
/// the orbital angular momentum, ŷ = ẑ × x̂ completing the set. Impulse
/// delta-v components are expressed on these axes, so a positive first
/// component is always a prograde burn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalOrbitalFrame {
    t_hat: Vector3,
    n_hat: Vector3,
    w_hat: Vector3,
}

impl LocalOrbitalFrame {
    /// Frame at a state. The state must have non-zero velocity and
    /// non-zero angular momentum (no radial plunge orbits).
    pub fn at(state: &StateVector) -> Self {
        let t_hat = hat(&state.velocity_km_s);
        let w_hat = hat(&cross(&state.position_km, &state.velocity_km_s));
        let n_hat = cross(&w_hat, &t_hat);
        LocalOrbitalFrame {
            t_hat,
            n_hat,
            w_hat,
        }
    }

    /// Rotate local-frame components into the inertial frame.
    pub fn to_inertial(&self, local: &Vector3) -> Vector3 {
        [
            local[0] * self.t_hat[0] + local[1] * self.n_hat[0] + local[2] * self.w_hat[0],
            local[0] * self.t_hat[1] + local[1] * self.n_hat[1] + local[2] * self.w_hat[1],
            local[0] * self.t_hat[2] + local[1] * self.n_hat[2] + local[2] * self.w_hat[2],
        ]
    }
}
