//! Batch case generation for external reference-tool validation runs.
//!
//! For every body and every pair of sign-triplet directions this produces a
//! state whose position sits at one body radius along the position direction
//! and whose velocity is the unit vector along the velocity direction. The
//! enumeration is deterministic: same registry in, byte-identical output
//! artifact out, so regenerated batches diff clean against checked-in ones.

use serde::Serialize;
use twobody_bodies::AttractorBody;

pub mod output;

pub use output::{CSV_HEADER, write_cases_csv, write_manifest_json, writer_for_path};

/// Bodies enumerated when the caller does not pick their own set. Earth is
/// deliberately absent: it is the reference tool's implicit origin body.
pub const DEFAULT_BODY_NAMES: [&str; 9] = [
    "Sun", "Mercury", "Venus", "Moon", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
];

/// One generated validation case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchCase {
    pub name: String,
    pub body: String,
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// The 26 sign triplets covering every axis, diagonal, and semi-diagonal
/// direction: the full {-1, 0, 1}³ grid minus the zero vector, in grid order.
pub fn direction_set() -> Vec<[i8; 3]> {
    let mut directions = Vec::with_capacity(26);
    for x in [-1i8, 0, 1] {
        for y in [-1i8, 0, 1] {
            for z in [-1i8, 0, 1] {
                if [x, y, z] != [0, 0, 0] {
                    directions.push([x, y, z]);
                }
            }
        }
    }
    directions
}

/// Deterministic case name embedding both sign triplets.
pub fn case_name(body: &str, r_sign: [i8; 3], v_sign: [i8; 3]) -> String {
    format!(
        "{body}_frames_R{}{}{}_V{}{}{}",
        r_sign[0], r_sign[1], r_sign[2], v_sign[0], v_sign[1], v_sign[2]
    )
}

/// All 26 × 26 cases for one body.
pub fn cases_for_body(body: &AttractorBody) -> Vec<BatchCase> {
    let directions = direction_set();
    let mut cases = Vec::with_capacity(directions.len() * directions.len());
    for &r_sign in &directions {
        let r_norm = sign_norm(r_sign);
        let position_km = [
            f64::from(r_sign[0]) * body.radius_km / r_norm,
            f64::from(r_sign[1]) * body.radius_km / r_norm,
            f64::from(r_sign[2]) * body.radius_km / r_norm,
        ];
        for &v_sign in &directions {
            let v_norm = sign_norm(v_sign);
            let velocity_km_s = [
                f64::from(v_sign[0]) / v_norm,
                f64::from(v_sign[1]) / v_norm,
                f64::from(v_sign[2]) / v_norm,
            ];
            cases.push(BatchCase {
                name: case_name(&body.name, r_sign, v_sign),
                body: body.name.clone(),
                position_km,
                velocity_km_s,
            });
        }
    }
    cases
}

/// Cases for several bodies, in the order given.
pub fn enumerate_cases<'a, I>(bodies: I) -> Vec<BatchCase>
where
    I: IntoIterator<Item = &'a AttractorBody>,
{
    bodies.into_iter().flat_map(cases_for_body).collect()
}

fn sign_norm(sign: [i8; 3]) -> f64 {
    f64::from(
        i16::from(sign[0]) * i16::from(sign[0])
            + i16::from(sign[1]) * i16::from(sign[1])
            + i16::from(sign[2]) * i16::from(sign[2]),
    )
    .sqrt()
}
