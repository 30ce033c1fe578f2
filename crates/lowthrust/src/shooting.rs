//! Forward/backward shooting across the throttle segments and the feasibility evaluators.

use log::trace;
use sf_core::constants::G0;
use sf_core::vector::{self, Vector3};
use sf_core::{Epoch, StateVector};
use sf_orbits::propagate_lagrangian;
use sf_propulsion::Spacecraft;

use crate::error::ConfigurationError;
use crate::leg::Leg;
use crate::throttle::ThrottleSegment;

/// Length of the mismatch vector `[drx, dry, drz, dvx, dvy, dvz, dm]`.
pub const MISMATCH_LEN: usize = 7;

/// Direction of traversal of one half of the leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Forward,
    Backward,
}

/// State carried by one half of the leg, with its clock in seconds since MJD2000.
#[derive(Debug, Clone, Copy)]
struct Branch {
    position: Vector3,
    velocity: Vector3,
    mass: f64,
    time_s: f64,
}

impl Branch {
    fn from_boundary(state: &StateVector, epoch: Epoch) -> Self {
        Self {
            position: state.position,
            velocity: state.velocity,
            mass: state.mass,
            time_s: epoch.seconds(),
        }
    }

    fn coast_to(&mut self, time_s: f64, mu: f64) {
        propagate_lagrangian(&mut self.position, &mut self.velocity, time_s - self.time_s, mu);
        self.time_s = time_s;
    }

    /// Coast to the segment midpoint, then apply its impulse and the matching mass change.
    fn apply(&mut self, segment: &ThrottleSegment, spacecraft: &Spacecraft, mu: f64, pass: Pass) {
        self.coast_to(segment.midpoint_seconds(), mu);

        let max_thrust = match pass {
            Pass::Forward => spacecraft.thrust(),
            Pass::Backward => -spacecraft.thrust(),
        };
        let dv = vector::scale(
            segment.value(),
            max_thrust / self.mass * segment.duration_seconds(),
        );
        let norm_dv = vector::norm(&dv);
        self.velocity = vector::add(&self.velocity, &dv);

        // Walking backwards in time the spacecraft regains the propellant it burned.
        let exponent = match pass {
            Pass::Forward => -norm_dv,
            Pass::Backward => norm_dv,
        };
        self.mass *= (exponent / spacecraft.isp() / G0).exp();
    }
}

/// Shoot from both boundaries to a common epoch and return the state difference.
fn shoot(leg: &Leg) -> [f64; MISMATCH_LEN] {
    let n_seg = leg.throttles.len();
    let n_fwd = n_seg.div_ceil(2);

    let (fwd_segments, back_segments) = leg.throttles.split_at(n_fwd);

    let mut fwd = Branch::from_boundary(&leg.x_i, leg.t_i);
    for segment in fwd_segments {
        fwd.apply(segment, &leg.spacecraft, leg.mu, Pass::Forward);
    }

    let mut back = Branch::from_boundary(&leg.x_f, leg.t_f);
    for segment in back_segments.iter().rev() {
        back.apply(segment, &leg.spacecraft, leg.mu, Pass::Backward);
    }

    // The two clocks only coincide when the middle segments share a midpoint.
    fwd.coast_to(back.time_s, leg.mu);

    let dr = vector::sub(&fwd.position, &back.position);
    let dv = vector::sub(&fwd.velocity, &back.velocity);
    trace!(
        "shooting over {n_seg} segments ({n_fwd} forward) matched at {} s",
        back.time_s
    );
    [dr[0], dr[1], dr[2], dv[0], dv[1], dv[2], fwd.mass - back.mass]
}

fn throttle_constraint(segment: &ThrottleSegment) -> f64 {
    let t = segment.value();
    -1.0 + t[0] * t[0] + t[1] * t[1] + t[2] * t[2]
}

/// Feasibility verdict from an already evaluated mismatch and throttle constraint set.
///
/// Every mismatch component must lie within `tolerance` of zero and every constraint must
/// be non-positive.
pub fn is_feasible_with(
    mismatch: &[f64; MISMATCH_LEN],
    constraints: &[f64],
    tolerance: f64,
) -> bool {
    mismatch.iter().all(|m| m.abs() <= tolerance) && constraints.iter().all(|c| *c <= 0.0)
}

impl Leg {
    /// Propagate from both boundary states to a common mid-point epoch and write the state
    /// mismatch `[drx, dry, drz, dvx, dvy, dvz, dm]` into `mismatch`.
    ///
    /// The first `ceil(n/2)` segments are applied forward from `x_i`, the remaining
    /// `floor(n/2)` backward from `x_f`. An all-zero result means the throttles connect the
    /// boundary states. Degenerate inputs (zero mass or isp, zero-length segments) are not
    /// trapped and surface as non-finite values.
    ///
    /// Nothing is written if `mismatch.len() != 7` or the leg is not configured.
    pub fn evaluate_mismatch(&self, mismatch: &mut [f64]) -> Result<(), ConfigurationError> {
        if mismatch.len() != MISMATCH_LEN {
            return Err(ConfigurationError::MismatchBufferLength {
                found: mismatch.len(),
            });
        }
        self.validate()?;
        mismatch.copy_from_slice(&shoot(self));
        Ok(())
    }

    /// Owned variant of [`Leg::evaluate_mismatch`].
    pub fn mismatch(&self) -> Result<[f64; MISMATCH_LEN], ConfigurationError> {
        let mut out = [0.0; MISMATCH_LEN];
        self.evaluate_mismatch(&mut out)?;
        Ok(out)
    }

    /// Mismatch packed as a state vector (position, velocity and mass differences).
    pub fn mismatch_state(&self) -> Result<StateVector, ConfigurationError> {
        self.mismatch().map(StateVector::from_array)
    }

    /// Write `|throttle_i|² - 1` for every segment, in list order. All values must be
    /// non-positive for the leg to be feasible.
    pub fn evaluate_throttle_constraints(
        &self,
        constraints: &mut [f64],
    ) -> Result<(), ConfigurationError> {
        if constraints.len() != self.throttles.len() {
            return Err(ConfigurationError::ConstraintBufferLength {
                expected: self.throttles.len(),
                found: constraints.len(),
            });
        }
        for (slot, segment) in constraints.iter_mut().zip(&self.throttles) {
            *slot = throttle_constraint(segment);
        }
        Ok(())
    }

    /// Owned variant of [`Leg::evaluate_throttle_constraints`].
    pub fn throttle_constraints(&self) -> Vec<f64> {
        self.throttles.iter().map(throttle_constraint).collect()
    }

    /// True when every mismatch component is within `tolerance` of zero and every throttle
    /// lies inside the unit ball.
    pub fn is_feasible(&self, tolerance: f64) -> Result<bool, ConfigurationError> {
        let mismatch = self.mismatch()?;
        Ok(is_feasible_with(&mismatch, &self.throttle_constraints(), tolerance))
    }
}
