//! Vector and angle primitives shared across the two-body cross-check workspace.

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in kilometres or km/s depending on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product of two vectors.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Unit vector along `v`. The caller guarantees `v` is non-zero.
    #[inline]
    pub fn hat(v: &Vector3) -> Vector3 {
        scale(v, 1.0 / norm(v))
    }
}

/// Angle helpers. Every angular quantity in this workspace is in radians
/// and normalized to the half-open interval [0, 2π).
pub mod angle {
    use std::f64::consts::TAU;

    /// Wrap an angle into [0, 2π).
    #[inline]
    pub fn wrap_two_pi(angle_rad: f64) -> f64 {
        let wrapped = angle_rad.rem_euclid(TAU);
        // rem_euclid can round up to exactly 2π when the input is a hair below zero
        if wrapped >= TAU { wrapped - TAU } else { wrapped }
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }
}
