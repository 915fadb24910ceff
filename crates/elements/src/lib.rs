//! Cartesian state vectors, classical orbital elements, and the conversions
//! between them.
//!
//! All lengths are kilometres, all speeds km/s, all angles radians normalized
//! to [0, 2π), and epochs are seconds relative to an arbitrary mission zero.
//! The gravitational parameter is always passed explicitly so the conversion
//! math stays independent of any body catalog.

use std::fmt;

use twobody_core::vector::{self, Vector3};

pub mod anomaly;
pub mod conversion;

pub use conversion::{ECC_DEGENERACY_TOL, INC_DEGENERACY_TOL, coe2rv, rv2coe};

/// Reference frame tag. The workspace assumes a single non-rotating,
/// body-centered inertial frame for every state it handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frame {
    #[default]
    Gcrf,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Gcrf => write!(f, "GCRF"),
        }
    }
}

/// A Cartesian state about a central attractor at a given epoch.
///
/// The attractor is carried by name; resolving it to a gravitational
/// parameter is the caller's job (usually through `twobody_bodies`).
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    pub attractor: String,
    pub frame: Frame,
    pub epoch_s: f64,
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
}

impl StateVector {
    pub fn new(
        attractor: impl Into<String>,
        epoch_s: f64,
        position_km: Vector3,
        velocity_km_s: Vector3,
    ) -> Self {
        StateVector {
            attractor: attractor.into(),
            frame: Frame::default(),
            epoch_s,
            position_km,
            velocity_km_s,
        }
    }

    /// Build the state at `epoch_s` from classical elements.
    pub fn from_elements(
        attractor: impl Into<String>,
        epoch_s: f64,
        elements: &ClassicalElements,
        mu_km3_s2: f64,
    ) -> Self {
        let (position_km, velocity_km_s) = coe2rv(mu_km3_s2, elements);
        StateVector::new(attractor, epoch_s, position_km, velocity_km_s)
    }

    /// Position magnitude (km).
    pub fn rmag_km(&self) -> f64 {
        vector::norm(&self.position_km)
    }

    /// Velocity magnitude (km/s).
    pub fn vmag_km_s(&self) -> f64 {
        vector::norm(&self.velocity_km_s)
    }

    /// Osculating classical elements of this state.
    pub fn to_elements(&self, mu_km3_s2: f64) -> ClassicalElements {
        rv2coe(mu_km3_s2, &self.position_km, &self.velocity_km_s)
    }

    /// Same state with the velocity replaced, e.g. after an impulsive burn.
    pub fn with_velocity(&self, velocity_km_s: Vector3) -> Self {
        StateVector {
            velocity_km_s,
            ..self.clone()
        }
    }
}

/// Classical (Keplerian) orbital elements.
///
/// Angles are radians in [0, 2π). For the degenerate circular and equatorial
/// cases the conversion in [`conversion`] folds the undefined angles to zero
/// and measures the in-plane position with the surviving angle, so a
/// round trip through Cartesian coordinates reproduces the same tuple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassicalElements {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub inclination_rad: f64,
    pub raan_rad: f64,
    pub argp_rad: f64,
    pub true_anomaly_rad: f64,
}

impl ClassicalElements {
    /// Semi-latus rectum p = a(1 - e²) (km).
    pub fn semi_latus_rectum_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 - self.eccentricity * self.eccentricity)
    }

    /// Periapsis radius a(1 - e) (km).
    pub fn periapsis_radius_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 - self.eccentricity)
    }

    /// Apoapsis radius a(1 + e) (km).
    pub fn apoapsis_radius_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 + self.eccentricity)
    }

    /// Whether the orbit is a bound ellipse (the only regime the
    /// propagation layer accepts).
    pub fn is_elliptic(&self) -> bool {
        self.semi_major_axis_km > 0.0 && self.eccentricity < 1.0
    }

    /// Same geometry at a different position along the orbit.
    pub fn with_true_anomaly(mut self, true_anomaly_rad: f64) -> Self {
        self.true_anomaly_rad = true_anomaly_rad;
        self
    }
}
