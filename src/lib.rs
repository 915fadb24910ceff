//! Shared surface for the two-body cross-validation suite.
//!
//! The member crates hold the actual logic (attractor catalog, element
//! conversions, Kepler propagation, impulsive transfers, the reference
//! harness, and the batch case generator). Re-exporting them here lets
//! the binaries and the integration tests address everything through a
//! single crate.

pub use twobody_bodies as bodies;
pub use twobody_casegen as casegen;
pub use twobody_core as core;
pub use twobody_elements as elements;
pub use twobody_harness as harness;
pub use twobody_maneuver as maneuver;
pub use twobody_propagation as propagation;

/// Returns the version of the library for smoke tests while scaffolding.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
