//! Sims-Flanagan low-thrust legs.
//!
//! A [`Leg`] discretises a low-thrust arc between two spacecraft states into a sequence of
//! [`ThrottleSegment`]s, each replaced by an impulsive manoeuvre at its midpoint. The leg is
//! feasible when [`Leg::evaluate_mismatch`] yields all zeros and every value written by
//! [`Leg::evaluate_throttle_constraints`] is non-positive.
//!
//! All quantities are SI: metres, m/s, kg, N, s and m³/s². Epochs are MJD2000 days.

mod display;
mod error;
mod leg;
mod shooting;
mod throttle;

pub mod diagnostics;

pub use error::ConfigurationError;
pub use leg::Leg;
pub use shooting::{MISMATCH_LEN, is_feasible_with};
pub use throttle::ThrottleSegment;
