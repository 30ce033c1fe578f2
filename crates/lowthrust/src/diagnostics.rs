//! Rough figures of merit for a leg. None of these feed the feasibility evaluators.

use crate::leg::Leg;

/// Approximate delta-v of the leg (m/s).
///
/// Sums `duration * |throttle| * thrust / mass` over all segments using the spacecraft's
/// reference mass throughout, so propellant depletion is ignored and the figure
/// underestimates the true delta-v. Use it for reporting, not for scoring.
pub fn approximate_delta_v(leg: &Leg) -> f64 {
    let acceleration = leg.spacecraft().max_acceleration();
    leg.throttles()
        .iter()
        .map(|segment| segment.duration_seconds() * segment.norm() * acceleration)
        .sum()
}
