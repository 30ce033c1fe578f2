//! Core units, constants, and shared primitives for the Sims-Flanagan leg workspace.

pub mod epoch;
pub mod state;

pub use epoch::Epoch;
pub use state::StateVector;

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.80665;
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 149_597_870.7;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Heliocentric gravitational parameter (km³/s²).
    pub const MU_SUN_KM3_S2: f64 = 1.327_124_400_18e11;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert kilometres per second to metres per second.
    #[inline]
    pub fn kms_to_ms(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert a gravitational parameter from km³/s² to m³/s².
    #[inline]
    pub fn km3_s2_to_m3_s2(mu: f64) -> f64 {
        mu * 1.0e9
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::SECONDS_PER_DAY;

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in metres, m/s or a dimensionless throttle depending on context.
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
}

#[cfg(test)]
mod tests {
    use super::vector::*;

    #[test]
    fn vector_helpers_behave() {
        let a = [1.0, 2.0, 2.0];
        let b = [0.5, -1.0, 4.0];
        assert_eq!(norm(&a), 3.0);
        assert_eq!(dot(&a, &b), 6.5);
        assert_eq!(add(&a, &b), [1.5, 1.0, 6.0]);
        assert_eq!(sub(&a, &b), [0.5, 3.0, -2.0]);
        assert_eq!(scale(&a, -2.0), [-2.0, -4.0, -4.0]);
    }
}
