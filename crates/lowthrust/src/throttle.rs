use serde::{Deserialize, Serialize};
use sf_core::Epoch;
use sf_core::constants::SECONDS_PER_DAY;
use sf_core::vector::{self, Vector3};

/// One impulsive manoeuvre standing in for thrust applied over `[start, end]`.
///
/// The value holds the cartesian components of the normalised delta-v; a physically
/// meaningful segment has `norm() <= 1`. Nothing is validated on construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThrottleSegment {
    start: Epoch,
    end: Epoch,
    value: Vector3,
}

impl ThrottleSegment {
    pub const fn new(start: Epoch, end: Epoch, value: Vector3) -> Self {
        Self { start, end, value }
    }

    /// `n` contiguous zero-valued segments of equal length spanning `[t_i, t_f]`.
    pub fn uniform_grid(t_i: Epoch, t_f: Epoch, n: usize) -> Vec<ThrottleSegment> {
        let span = t_f - t_i;
        let boundary = |k: usize| {
            if k == n {
                t_f
            } else {
                Epoch::from_mjd2000(t_i.mjd2000() + span * k as f64 / n as f64)
            }
        };
        (0..n)
            .map(|k| ThrottleSegment::new(boundary(k), boundary(k + 1), [0.0; 3]))
            .collect()
    }

    pub fn start(&self) -> Epoch {
        self.start
    }

    pub fn end(&self) -> Epoch {
        self.end
    }

    pub fn value(&self) -> &Vector3 {
        &self.value
    }

    /// Copy of this segment carrying a different throttle vector.
    pub fn with_value(&self, value: Vector3) -> Self {
        Self { value, ..*self }
    }

    /// Euclidean norm of the throttle vector.
    pub fn norm(&self) -> f64 {
        vector::norm(&self.value)
    }

    pub fn duration_seconds(&self) -> f64 {
        (self.end.mjd2000() - self.start.mjd2000()) * SECONDS_PER_DAY
    }

    /// Absolute time of the impulse, in seconds since MJD2000.
    pub fn midpoint_seconds(&self) -> f64 {
        (self.start.mjd2000() + self.end.mjd2000()) / 2.0 * SECONDS_PER_DAY
    }
}
