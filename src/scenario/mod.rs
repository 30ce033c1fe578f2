//! Build legs from scenario files and summarise their evaluation.

use std::path::Path;

use log::{debug, info};
use sf_config::{BoundaryConfig, ConfigError, LegScenarioConfig, select_scenario};
use sf_core::units::{km_to_m, km3_s2_to_m3_s2, kms_to_ms};
use sf_core::vector;
use sf_core::{Epoch, StateVector};
use sf_lowthrust::diagnostics::approximate_delta_v;
use sf_lowthrust::{ConfigurationError, Leg, MISMATCH_LEN, ThrottleSegment, is_feasible_with};
use sf_propulsion::Spacecraft;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid leg: {0}")]
    Leg(#[from] ConfigurationError),
    #[error("scenario lists {throttles} throttles for {segments} segments")]
    ThrottleCount { segments: usize, throttles: usize },
}

/// Outcome of evaluating one leg.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: String,
    pub mismatch: [f64; MISMATCH_LEN],
    pub constraints: Vec<f64>,
    pub feasible: bool,
    pub position_mismatch_m: f64,
    pub velocity_mismatch_m_s: f64,
    /// Constant-mass estimate only; see [`approximate_delta_v`].
    pub approximate_delta_v_m_s: f64,
}

/// Convert a km-based scenario into an SI leg with equal-duration throttle segments.
pub fn build_leg(config: &LegScenarioConfig) -> Result<Leg, ScenarioError> {
    if config.throttles.len() > config.segments {
        return Err(ScenarioError::ThrottleCount {
            segments: config.segments,
            throttles: config.throttles.len(),
        });
    }

    let t_i = Epoch::from_mjd2000(config.departure.epoch_mjd2000);
    let t_f = Epoch::from_mjd2000(config.arrival.epoch_mjd2000);
    let spacecraft = Spacecraft::new(
        config.spacecraft.mass_kg,
        config.spacecraft.max_thrust_newtons,
        config.spacecraft.isp_seconds,
    );

    let throttles = ThrottleSegment::uniform_grid(t_i, t_f, config.segments)
        .into_iter()
        .enumerate()
        .map(|(index, segment)| {
            let value = config.throttles.get(index).copied().unwrap_or([0.0; 3]);
            segment.with_value(value)
        });

    let leg = Leg::new(
        t_i,
        boundary_state(&config.departure),
        throttles,
        t_f,
        boundary_state(&config.arrival),
        spacecraft,
        km3_s2_to_m3_s2(config.mu_km3_s2),
    )?;
    debug!(
        "built leg '{}' with {} segments over {} days",
        config.name,
        leg.throttles_len(),
        t_f - t_i
    );
    Ok(leg)
}

/// Load a scenario file and build the requested (or first) leg in it.
pub fn load_leg<P: AsRef<Path>>(
    path: P,
    name: Option<&str>,
) -> Result<(String, Leg), ScenarioError> {
    let scenarios = sf_config::load_scenarios(path)?;
    let config = select_scenario(&scenarios, name)?;
    Ok((config.name.clone(), build_leg(config)?))
}

/// Evaluate mismatch, throttle constraints and the approximate delta-v of a leg.
pub fn evaluate(name: &str, leg: &Leg, tolerance: f64) -> Result<ScenarioReport, ScenarioError> {
    let mismatch = leg.mismatch()?;
    let constraints = leg.throttle_constraints();
    let feasible = is_feasible_with(&mismatch, &constraints, tolerance);

    let report = ScenarioReport {
        name: name.to_string(),
        mismatch,
        position_mismatch_m: vector::norm(&[mismatch[0], mismatch[1], mismatch[2]]),
        velocity_mismatch_m_s: vector::norm(&[mismatch[3], mismatch[4], mismatch[5]]),
        constraints,
        feasible,
        approximate_delta_v_m_s: approximate_delta_v(leg),
    };
    info!(
        "leg '{}': |dr| = {:.3} m, |dv| = {:.6} m/s, feasible = {}",
        report.name, report.position_mismatch_m, report.velocity_mismatch_m_s, report.feasible
    );
    Ok(report)
}

fn boundary_state(boundary: &BoundaryConfig) -> StateVector {
    StateVector::new(
        boundary.position_km.map(km_to_m),
        boundary.velocity_km_s.map(kms_to_ms),
        boundary.mass_kg,
    )
}
