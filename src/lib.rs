//! Sims-Flanagan low-thrust leg evaluation.
//!
//! The leg model and its feasibility evaluators live in [`lowthrust`]; this crate ties them
//! to scenario files and export formats so optimisers and front-ends (CLI, scripts) share
//! one entry point.

pub mod scenario;

pub use sf_config as config;
pub use sf_core::{Epoch, StateVector, constants, time, units, vector};
pub use sf_export as export;
pub use sf_lowthrust as lowthrust;
pub use sf_lowthrust::{ConfigurationError, Leg, ThrottleSegment};
pub use sf_orbits as orbits;
pub use sf_propulsion as propulsion;
