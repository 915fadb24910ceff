//! Attractor registry for the two-body cross-check workspace.
//!
//! Every state vector in the workspace is expressed about a central body, and
//! every downstream computation needs that body's gravitational parameter.
//! The registry resolves body names once, up front, so the math crates never
//! see an unknown attractor mid-computation.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

/// A celestial body acting as the central attractor of a two-body problem.
///
/// `mu_km3_s2` is the gravitational parameter GM (km³/s²) and `radius_km`
/// the mean equatorial radius, used by the batch case generator to place
/// states at one body radius.
#[derive(Debug, Deserialize, Clone)]
pub struct AttractorBody {
    pub name: String,
    pub mu_km3_s2: f64,
    pub radius_km: f64,
}

/// Errors raised while resolving bodies or loading body catalogs.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("unknown body `{name}`; known bodies: {known}")]
    UnknownBody { name: String, known: String },
    #[error("invalid body record `{name}`: {reason}")]
    InvalidBody { name: String, reason: String },
    #[error("failed to read body catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML body catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML body catalog: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Gravitational parameters (km³/s²) and mean radii (km), IAU nominal values.
const BUILTIN_BODIES: &[(&str, f64, f64)] = &[
    ("Sun", 1.327_124_400_18e11, 695_700.0),
    ("Mercury", 22_031.868_55, 2_439.7),
    ("Venus", 324_858.592, 6_051.8),
    ("Earth", 398_600.4418, 6_378.1366),
    ("Moon", 4_902.800_066, 1_737.4),
    ("Mars", 42_828.375_214, 3_396.19),
    ("Jupiter", 126_712_764.8, 71_492.0),
    ("Saturn", 37_940_585.2, 60_268.0),
    ("Uranus", 5_794_548.6, 25_559.0),
    ("Neptune", 6_836_527.100_58, 24_764.0),
];

/// An immutable set of attractor bodies, resolved by case-insensitive name.
#[derive(Debug, Clone)]
pub struct Registry {
    bodies: Vec<AttractorBody>,
}

static BUILTIN: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// The built-in solar-system registry. Constructed once per process.
    pub fn builtin() -> &'static Registry {
        BUILTIN.get_or_init(|| {
            let bodies = BUILTIN_BODIES
                .iter()
                .map(|&(name, mu_km3_s2, radius_km)| AttractorBody {
                    name: name.to_string(),
                    mu_km3_s2,
                    radius_km,
                })
                .collect();
            // The builtin table is validated by construction.
            Registry { bodies }
        })
    }

    /// Build a registry from caller-supplied records, validating each one.
    pub fn from_records(bodies: Vec<AttractorBody>) -> Result<Self, BodyError> {
        for body in &bodies {
            validate_body(body)?;
        }
        Ok(Registry { bodies })
    }

    /// Load a registry from a catalog path: a YAML file holding a list of
    /// bodies, a single-body `.toml` file, or a directory of `.toml` files.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BodyError> {
        Self::from_records(load_records(path)?)
    }

    /// Resolve a body by name, ignoring ASCII case.
    pub fn lookup(&self, name: &str) -> Result<&AttractorBody, BodyError> {
        self.bodies
            .iter()
            .find(|body| body.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| BodyError::UnknownBody {
                name: name.to_string(),
                known: self
                    .bodies
                    .iter()
                    .map(|body| body.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// All bodies in catalog order.
    pub fn bodies(&self) -> &[AttractorBody] {
        &self.bodies
    }
}

fn validate_body(body: &AttractorBody) -> Result<(), BodyError> {
    if body.name.trim().is_empty() {
        return Err(BodyError::InvalidBody {
            name: body.name.clone(),
            reason: "name must not be empty".to_string(),
        });
    }
    if !(body.mu_km3_s2.is_finite() && body.mu_km3_s2 > 0.0) {
        return Err(BodyError::InvalidBody {
            name: body.name.clone(),
            reason: format!("mu_km3_s2 must be finite and positive, got {}", body.mu_km3_s2),
        });
    }
    if !(body.radius_km.is_finite() && body.radius_km > 0.0) {
        return Err(BodyError::InvalidBody {
            name: body.name.clone(),
            reason: format!("radius_km must be finite and positive, got {}", body.radius_km),
        });
    }
    Ok(())
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, BodyError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, BodyError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
