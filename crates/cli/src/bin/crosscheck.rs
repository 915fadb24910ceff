use clap::{Parser, ValueEnum};
use twobody_crosscheck::core::time::seconds_to_days;
use twobody_crosscheck::harness::cases::reports_to_json;
use twobody_crosscheck::harness::{
    CaseReport, Tolerances, UniversalKeplerReference, scenarios, validate_maneuver,
    validate_propagation,
};

/// Run the built-in validation scenarios through the two-body core and the
/// universal-variable reference propagator, and report their agreement.
#[derive(Parser, Debug)]
#[command(author, version, about = "Two-body cross-validation runner")]
struct Cli {
    /// Scenario selection
    #[arg(long, value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,

    /// Emit the full reports as pretty JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Scenario {
    All,
    Propagation,
    Hohmann,
    Bielliptic,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let reference = UniversalKeplerReference;

    let mut reports: Vec<CaseReport> = Vec::new();
    if matches!(cli.scenario, Scenario::All | Scenario::Propagation) {
        let case = scenarios::elliptic_propagation();
        reports.push(validate_propagation(
            &case,
            &reference,
            &Tolerances::propagation(),
        )?);
    }
    if matches!(cli.scenario, Scenario::All | Scenario::Hohmann) {
        let case = scenarios::hohmann_raise();
        reports.push(validate_maneuver(&case, &reference, &Tolerances::maneuver())?);
    }
    if matches!(cli.scenario, Scenario::All | Scenario::Bielliptic) {
        let case = scenarios::bielliptic_raise();
        reports.push(validate_maneuver(&case, &reference, &Tolerances::maneuver())?);
    }

    if cli.json {
        println!("{}", reports_to_json(&reports)?);
    } else {
        for report in &reports {
            println!(
                "{:<28} vs {:<26} {}  window = {:.0} s ({:.2} d), max Δr = {:.3e} km, max Δv = {:.3e} km/s",
                report.case,
                report.reference,
                if report.passed { "PASS" } else { "FAIL" },
                report.elapsed_s,
                seconds_to_days(report.elapsed_s),
                report.max_position_error_km,
                report.max_velocity_error_km_s,
            );
            for discrepancy in &report.discrepancies {
                println!(
                    "    {}: {} vs {} (allowed ±{:.3e})",
                    discrepancy.quantity,
                    discrepancy.actual,
                    discrepancy.expected,
                    discrepancy.allowed_abs_error,
                );
            }
        }
    }

    let failed = reports.iter().filter(|report| !report.passed).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} scenarios disagreed with the reference", reports.len());
    }
    Ok(())
}
