//! Validation cases and their runners.
//!
//! A case pins down an initial state, an attractor, and what to do with it;
//! the runner executes it once through the two-body core and once through
//! the reference collaborator, then scores component-wise agreement.
//! Tolerance violations land in the report as discrepancies; collaborator
//! failures abort the case with an error instead of a verdict.

use serde::Serialize;
use thiserror::Error;
use twobody_core::vector::Vector3;
use twobody_elements::StateVector;
use twobody_maneuver::{TransferError, apply_maneuver, bielliptic, hohmann};
use twobody_propagation::{PropagationError, propagate};

use crate::{ReferenceCollaborator, ReferenceError, ReferenceRequest, ScheduledImpulse, Tolerances};

/// A propagation-only comparison: coast `elapsed_s` and compare end states.
#[derive(Debug, Clone)]
pub struct PropagationCase {
    pub name: String,
    pub body: String,
    pub mu_km3_s2: f64,
    pub epoch_s: f64,
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
    pub elapsed_s: f64,
}

/// Which transfer a maneuver case plans before applying it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransferKind {
    Hohmann {
        target_radius_km: f64,
    },
    Bielliptic {
        intermediate_radius_km: f64,
        target_radius_km: f64,
    },
}

/// A maneuver comparison: plan a transfer, apply it, coast out the elapsed
/// window, and compare end states. The resolved burn schedule is handed to
/// the reference so both sides fire identical impulses at identical epochs.
#[derive(Debug, Clone)]
pub struct ManeuverCase {
    pub name: String,
    pub body: String,
    pub mu_km3_s2: f64,
    pub epoch_s: f64,
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
    pub elapsed_s: f64,
    pub transfer: TransferKind,
}

/// One component that violated its tolerance.
#[derive(Debug, Clone, Serialize)]
pub struct Discrepancy {
    pub quantity: String,
    pub actual: f64,
    pub expected: f64,
    pub allowed_abs_error: f64,
}

/// Outcome of one validation case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub case: String,
    pub body: String,
    pub reference: String,
    pub elapsed_s: f64,
    pub passed: bool,
    pub max_position_error_km: f64,
    pub max_velocity_error_km_s: f64,
    pub discrepancies: Vec<Discrepancy>,
}

/// Errors that abort a case before a verdict can be formed.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("core propagation failed: {0}")]
    Propagation(#[from] PropagationError),
    #[error("transfer planning failed: {0}")]
    Transfer(#[from] TransferError),
    #[error("reference collaborator failed: {0}")]
    Reference(#[from] ReferenceError),
}

/// Run a propagation-only case against `reference`.
pub fn validate_propagation<C>(
    case: &PropagationCase,
    reference: &C,
    tolerances: &Tolerances,
) -> Result<CaseReport, CaseError>
where
    C: ReferenceCollaborator + ?Sized,
{
    let initial = StateVector::new(
        case.body.clone(),
        case.epoch_s,
        case.position_km,
        case.velocity_km_s,
    );
    let local = propagate(&initial, case.elapsed_s, case.mu_km3_s2)?;

    let request = ReferenceRequest {
        mu_km3_s2: case.mu_km3_s2,
        epoch_s: case.epoch_s,
        position_km: case.position_km,
        velocity_km_s: case.velocity_km_s,
        elapsed_s: case.elapsed_s,
        impulses: Vec::new(),
    };
    let (expected_r, expected_v) = reference.final_state(&request)?;

    Ok(build_report(
        &case.name,
        &case.body,
        reference.name(),
        case.elapsed_s,
        (&local.position_km, &local.velocity_km_s),
        (&expected_r, &expected_v),
        tolerances,
    ))
}

/// Run a maneuver case against `reference`.
pub fn validate_maneuver<C>(
    case: &ManeuverCase,
    reference: &C,
    tolerances: &Tolerances,
) -> Result<CaseReport, CaseError>
where
    C: ReferenceCollaborator + ?Sized,
{
    let initial = StateVector::new(
        case.body.clone(),
        case.epoch_s,
        case.position_km,
        case.velocity_km_s,
    );
    let maneuver = match case.transfer {
        TransferKind::Hohmann { target_radius_km } => {
            hohmann(&initial, target_radius_km, case.mu_km3_s2)?
        }
        TransferKind::Bielliptic {
            intermediate_radius_km,
            target_radius_km,
        } => bielliptic(
            &initial,
            intermediate_radius_km,
            target_radius_km,
            case.mu_km3_s2,
        )?,
    };

    let outcome = apply_maneuver(&initial, &maneuver, case.mu_km3_s2)?;
    let target_epoch_s = case.epoch_s + case.elapsed_s;
    let local = propagate(
        &outcome.state,
        target_epoch_s - outcome.state.epoch_s,
        case.mu_km3_s2,
    )?;

    let request = ReferenceRequest {
        mu_km3_s2: case.mu_km3_s2,
        epoch_s: case.epoch_s,
        position_km: case.position_km,
        velocity_km_s: case.velocity_km_s,
        elapsed_s: case.elapsed_s,
        impulses: outcome
            .impulses
            .iter()
            .map(|burn| ScheduledImpulse {
                epoch_s: burn.epoch_s,
                delta_v_lof_km_s: burn.delta_v_lof_km_s,
            })
            .collect(),
    };
    let (expected_r, expected_v) = reference.final_state(&request)?;

    Ok(build_report(
        &case.name,
        &case.body,
        reference.name(),
        case.elapsed_s,
        (&local.position_km, &local.velocity_km_s),
        (&expected_r, &expected_v),
        tolerances,
    ))
}

/// Render reports as pretty JSON for CLI output and CI artifacts.
pub fn reports_to_json(reports: &[CaseReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

fn build_report(
    case: &str,
    body: &str,
    reference: &str,
    elapsed_s: f64,
    actual: (&Vector3, &Vector3),
    expected: (&Vector3, &Vector3),
    tolerances: &Tolerances,
) -> CaseReport {
    let mut discrepancies = Vec::new();
    let max_position_error_km = compare_components(
        "position_km",
        actual.0,
        expected.0,
        tolerances.relative,
        tolerances.position_abs_km,
        &mut discrepancies,
    );
    let max_velocity_error_km_s = compare_components(
        "velocity_km_s",
        actual.1,
        expected.1,
        tolerances.relative,
        0.0,
        &mut discrepancies,
    );
    CaseReport {
        case: case.to_string(),
        body: body.to_string(),
        reference: reference.to_string(),
        elapsed_s,
        passed: discrepancies.is_empty(),
        max_position_error_km,
        max_velocity_error_km_s,
        discrepancies,
    }
}

fn compare_components(
    quantity: &str,
    actual: &Vector3,
    expected: &Vector3,
    relative: f64,
    abs_floor: f64,
    discrepancies: &mut Vec<Discrepancy>,
) -> f64 {
    let mut worst = 0.0_f64;
    for i in 0..3 {
        let error = (actual[i] - expected[i]).abs();
        worst = worst.max(error);
        let allowed = abs_floor + relative * expected[i].abs();
        if error > allowed {
            discrepancies.push(Discrepancy {
                quantity: format!("{quantity}[{i}]"),
                actual: actual[i],
                expected: expected[i],
                allowed_abs_error: allowed,
            });
        }
    }
    worst
}
