//! Epochs expressed as days since the MJD2000 reference (2000-01-01 00:00).

use std::fmt;
use std::ops::Sub;

use serde::{Deserialize, Serialize};

use crate::time::days_to_seconds;

/// A point in time measured in days since MJD2000.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Epoch {
    mjd2000: f64,
}

impl Epoch {
    pub const fn from_mjd2000(days: f64) -> Self {
        Self { mjd2000: days }
    }

    #[inline]
    pub fn mjd2000(&self) -> f64 {
        self.mjd2000
    }

    /// Absolute time of this epoch in seconds since MJD2000.
    #[inline]
    pub fn seconds(&self) -> f64 {
        days_to_seconds(self.mjd2000)
    }

    /// Signed elapsed seconds from `earlier` to `self`.
    #[inline]
    pub fn seconds_since(&self, earlier: &Epoch) -> f64 {
        days_to_seconds(*self - *earlier)
    }

    /// Epoch shifted by a number of days (may be negative).
    pub fn add_days(&self, days: f64) -> Epoch {
        Epoch::from_mjd2000(self.mjd2000 + days)
    }
}

/// Elapsed time in days.
impl Sub for Epoch {
    type Output = f64;

    fn sub(self, rhs: Epoch) -> f64 {
        self.mjd2000 - rhs.mjd2000
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mjd2000", self.mjd2000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn elapsed_time_in_days_and_seconds() {
        let a = Epoch::from_mjd2000(7_000.0);
        let b = a.add_days(200.0);
        assert_eq!(b - a, 200.0);
        assert_relative_eq!(b.seconds_since(&a), 200.0 * 86_400.0);
        assert_relative_eq!(a.seconds_since(&b), -200.0 * 86_400.0);
        assert!(a < b);
    }

    #[test]
    fn displays_with_reference_suffix() {
        assert_eq!(Epoch::from_mjd2000(12.5).to_string(), "12.5 mjd2000");
    }
}
