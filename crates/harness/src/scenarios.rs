//! Named validation scenarios.
//!
//! These are the fixed cases the crosscheck CLI and the integration tests
//! run; the state vectors and windows come from the published comparison
//! campaign this workspace re-validates on every change.

use twobody_bodies::Registry;

use crate::cases::{ManeuverCase, PropagationCase, TransferKind};

fn earth_mu_km3_s2() -> f64 {
    Registry::builtin()
        .lookup("Earth")
        .expect("builtin registry provides Earth")
        .mu_km3_s2
}

/// Elliptic coast: a 1.5 h propagation of an inclined Earth ellipse.
pub fn elliptic_propagation() -> PropagationCase {
    PropagationCase {
        name: "earth_elliptic_propagation".to_string(),
        body: "Earth".to_string(),
        mu_km3_s2: earth_mu_km3_s2(),
        epoch_s: 0.0,
        position_km: [1_131.340, -2_282.343, 6_672.423],
        velocity_km_s: [-5.643_05, 4.303_33, 2.428_79],
        elapsed_s: 1.5 * 3_600.0,
    }
}

/// Hohmann raise from an eccentric orbit to a circular 35781.35 km radius,
/// watched over a 19800 s window that outlives both burns.
pub fn hohmann_raise() -> ManeuverCase {
    ManeuverCase {
        name: "earth_hohmann_raise".to_string(),
        body: "Earth".to_string(),
        mu_km3_s2: earth_mu_km3_s2(),
        epoch_s: 0.0,
        position_km: [7_200.0, -1_000.0, 0.0],
        velocity_km_s: [0.0, 8.0, 3.25],
        elapsed_s: 19_800.0,
        transfer: TransferKind::Hohmann {
            target_radius_km: 35_781.35,
        },
    }
}

/// Bi-elliptic raise to the same target through a 50000 km intermediate
/// apoapsis; the 72158.11 s window outlives all three burns.
pub fn bielliptic_raise() -> ManeuverCase {
    ManeuverCase {
        name: "earth_bielliptic_raise".to_string(),
        body: "Earth".to_string(),
        mu_km3_s2: earth_mu_km3_s2(),
        epoch_s: 0.0,
        position_km: [7_200.0, -1_000.0, 0.0],
        velocity_km_s: [0.0, 8.0, 3.25],
        elapsed_s: 72_158.11,
        transfer: TransferKind::Bielliptic {
            intermediate_radius_km: 50_000.0,
            target_radius_km: 35_781.35,
        },
    }
}
